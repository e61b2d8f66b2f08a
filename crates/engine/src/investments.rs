//! Portfolio positions.

use serde::{Deserialize, Serialize};

use crate::transactions::default_category;

/// A single portfolio position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Per-user sequential id (`len + 1`).
    pub id: u32,
    pub name: String,
    /// One of the shared `investment_types`, or "Другое".
    #[serde(rename = "type", default = "default_category")]
    pub kind: String,
    /// Purchase cost.
    pub amount: f64,
    /// Present-day value; consumers fall back to `amount` when absent.
    #[serde(default)]
    pub current_value: Option<f64>,
    /// "YYYY-MM-DD".
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default)]
    pub expected_return: Option<f64>,
    #[serde(default)]
    pub notes: String,
    /// "YYYY-MM-DD", set when the position is recorded.
    #[serde(default)]
    pub added_date: String,
}

impl Investment {
    /// Current value, falling back to the purchase cost.
    pub fn value(&self) -> f64 {
        self.current_value.unwrap_or(self.amount)
    }

    /// Absolute profit against the purchase cost.
    pub fn profit(&self) -> f64 {
        self.value() - self.amount
    }

    /// Profit relative to the purchase cost, in percent. 0 for a free
    /// position.
    pub fn profit_percent(&self) -> f64 {
        if self.amount > 0.0 {
            self.profit() / self.amount * 100.0
        } else {
            0.0
        }
    }
}

/// Input for [`Engine::add_investment`].
///
/// [`Engine::add_investment`]: crate::Engine::add_investment
#[derive(Clone, Debug)]
pub struct NewInvestment {
    pub name: String,
    pub kind: String,
    pub amount: f64,
    /// Defaults to `amount` when absent.
    pub current_value: Option<f64>,
    /// "YYYY-MM-DD"; today when absent.
    pub purchase_date: Option<String>,
    pub expected_return: Option<f64>,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investment(amount: f64, current_value: Option<f64>) -> Investment {
        Investment {
            id: 1,
            name: "Сбер".to_string(),
            kind: "Акции".to_string(),
            amount,
            current_value,
            purchase_date: "2024-01-10".to_string(),
            expected_return: None,
            notes: String::new(),
            added_date: "2024-01-10".to_string(),
        }
    }

    #[test]
    fn value_falls_back_to_amount() {
        assert_eq!(investment(100.0, None).value(), 100.0);
        assert_eq!(investment(100.0, Some(150.0)).value(), 150.0);
    }

    #[test]
    fn profit_and_percent() {
        let inv = investment(100.0, Some(150.0));
        assert_eq!(inv.profit(), 50.0);
        assert_eq!(inv.profit_percent(), 50.0);
    }

    #[test]
    fn free_position_has_zero_profit_percent() {
        assert_eq!(investment(0.0, Some(10.0)).profit_percent(), 0.0);
    }
}
