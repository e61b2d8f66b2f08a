//! Income and expense records.

use serde::{Deserialize, Serialize};

/// Direction of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single income or expense entry.
///
/// Expenses carry a negative `amount`; the sign is forced at creation
/// time and never re-validated afterwards (documents edited by hand
/// keep whatever they contain).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Per-user sequential id (`len + 1`).
    pub id: u32,
    /// "YYYY-MM-DD".
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
}

pub(crate) fn default_category() -> String {
    "Другое".to_string()
}

/// Input for [`Engine::add_transaction`].
///
/// [`Engine::add_transaction`]: crate::Engine::add_transaction
#[derive(Clone, Debug)]
pub struct NewTransaction {
    /// "YYYY-MM-DD"; today when absent.
    pub date: Option<String>,
    pub kind: TransactionKind,
    /// Submitted unsigned; expenses are stored as `-abs(amount)`.
    pub amount: f64,
    pub description: String,
    pub category: String,
}
