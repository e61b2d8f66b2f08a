//! The single shared JSON document all state lives in.
//!
//! Loading never fails: a missing, empty or malformed file regenerates
//! the default dataset, and a parsed document with missing top-level
//! keys is repaired key by key through `#[serde(default)]`. Saving
//! rewrites the whole file in place. There is deliberately no atomic
//! write, backup or locking: concurrent writers race on the
//! read-modify-write cycle, exactly like the system this store format
//! comes from.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ResultEngine, users::User};

/// Shared category names, per transaction direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Categories {
    #[serde(default)]
    pub income: Vec<String>,
    #[serde(default)]
    pub expense: Vec<String>,
}

/// A named target allocation used to benchmark the actual portfolio
/// mix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub stocks_ratio: f64,
    pub bonds_ratio: f64,
    pub cash_ratio: f64,
}

/// The whole persisted document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default = "default_users")]
    pub users: Vec<User>,
    #[serde(default = "default_categories")]
    pub categories: Categories,
    #[serde(default = "default_investment_types")]
    pub investment_types: Vec<String>,
    #[serde(default = "default_risk_profiles")]
    pub risk_profiles: Vec<RiskProfile>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            users: default_users(),
            categories: default_categories(),
            investment_types: default_investment_types(),
            risk_profiles: default_risk_profiles(),
        }
    }
}

fn default_users() -> Vec<User> {
    vec![User {
        id: 1,
        username: "demo".to_string(),
        // "demo123"
        password_hash: "d3ad9315b7be5dd53b31a273b3b3aba5defe700808305aa16a3062b76658a791"
            .to_string(),
        email: "demo@example.com".to_string(),
        created_at: "2024-01-01".to_string(),
        risk_profile: 2,
        transactions: Vec::new(),
        investments: Vec::new(),
        goals: Vec::new(),
    }]
}

fn default_categories() -> Categories {
    Categories {
        income: ["Зарплата", "Подработка", "Дивиденды", "Подарок", "Другое"]
            .map(String::from)
            .to_vec(),
        expense: [
            "Еда",
            "Транспорт",
            "Аренда",
            "Развлечения",
            "Коммуналка",
            "Другое",
        ]
        .map(String::from)
        .to_vec(),
    }
}

fn default_investment_types() -> Vec<String> {
    [
        "Акции",
        "Облигации",
        "Депозиты",
        "Недвижимость",
        "ETF",
        "Криптовалюта",
    ]
    .map(String::from)
    .to_vec()
}

fn default_risk_profiles() -> Vec<RiskProfile> {
    vec![
        RiskProfile {
            id: 1,
            name: "Консервативный".to_string(),
            description: "Минимальный риск, стабильный доход".to_string(),
            stocks_ratio: 20.0,
            bonds_ratio: 60.0,
            cash_ratio: 20.0,
        },
        RiskProfile {
            id: 2,
            name: "Умеренный".to_string(),
            description: "Баланс риска и доходности".to_string(),
            stocks_ratio: 50.0,
            bonds_ratio: 40.0,
            cash_ratio: 10.0,
        },
        RiskProfile {
            id: 3,
            name: "Агрессивный".to_string(),
            description: "Высокий риск, потенциально высокая доходность".to_string(),
            stocks_ratio: 80.0,
            bonds_ratio: 15.0,
            cash_ratio: 5.0,
        },
    ]
}

/// The fallback profile when the referenced id does not exist and the
/// shared list is too short to pick the moderate entry from.
pub(crate) fn moderate_profile() -> RiskProfile {
    RiskProfile {
        id: 2,
        name: "Умеренный".to_string(),
        description: "Баланс риска и доходности".to_string(),
        stocks_ratio: 50.0,
        bonds_ratio: 40.0,
        cash_ratio: 10.0,
    }
}

/// Reads the whole document, regenerating defaults on anything broken.
pub fn load(path: &Path) -> StoreData {
    if !path.exists() {
        tracing::warn!("data file {} does not exist, using default dataset", path.display());
        return StoreData::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!("failed to read data file: {err}, using default dataset");
            return StoreData::default();
        }
    };

    if content.trim().is_empty() {
        tracing::warn!("data file is empty, using default dataset");
        return StoreData::default();
    }

    match serde_json::from_str(&content) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!("data file is malformed: {err}, using default dataset");
            StoreData::default()
        }
    }
}

/// Overwrites the whole document: UTF-8, 2-space indent.
pub fn save(path: &Path, data: &StoreData) -> ResultEngine<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}
