//! The module contains the definition of a user and password hashing.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    goals::Goal,
    investments::Investment,
    store::{Categories, RiskProfile},
    transactions::Transaction,
};

/// A registered user and everything they own.
///
/// Users live inside the single store document and are identified by a
/// small integer id assigned at creation (`len + 1`). Ids are never
/// reused because users cannot be deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub email: String,
    pub created_at: String,
    /// References a [`RiskProfile`] id (1-3).
    #[serde(default = "default_risk_profile")]
    pub risk_profile: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

fn default_risk_profile() -> u32 {
    2
}

/// Hashes a password with a single unsalted SHA-256 round.
///
/// This mirrors the historical store format: the digest is weak
/// (rainbow-table vulnerable) and existing documents already contain
/// these hashes, so it stays as is.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

/// Public identity of a user, without the password hash.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub risk_profile: u32,
}

/// Per-user snapshot: the user's own lists plus the shared reference
/// data. This is also the JSON export shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub transactions: Vec<Transaction>,
    pub investments: Vec<Investment>,
    pub goals: Vec<Goal>,
    pub categories: Categories,
    pub investment_types: Vec<String>,
    pub risk_profiles: Vec<RiskProfile>,
    pub user_info: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_lowercase_hex_sha256() {
        // Digest of the demo password shipped with the default dataset.
        assert_eq!(
            hash_password("demo123"),
            "d3ad9315b7be5dd53b31a273b3b3aba5defe700808305aa16a3062b76658a791"
        );
    }

    #[test]
    fn hash_differs_per_password() {
        assert_ne!(hash_password("demo123"), hash_password("demo124"));
        assert_eq!(hash_password("").len(), 64);
    }
}
