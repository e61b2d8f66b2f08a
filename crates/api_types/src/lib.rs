//! Request and response payloads shared by the HTTP layer.

use serde::{Deserialize, Serialize};

fn default_category() -> String {
    "Другое".to_string()
}

pub mod user {
    use super::*;

    /// Request body for `POST /register`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterNew {
        pub username: String,
        pub password: String,
        #[serde(default)]
        pub email: String,
    }

    /// Request body for `POST /login`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub username: String,
        pub password: String,
    }

    /// The authenticated user, as returned by login/register.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionUser {
        pub id: u32,
        pub username: String,
        pub email: String,
        /// References a shared risk profile id (1-3).
        pub risk_profile: u32,
    }

    /// Response body for `POST /reset`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResetDone {
        /// "YYYY-MM-DD HH:MM:SS".
        pub timestamp: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// Request body for `POST /transactions`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        /// "YYYY-MM-DD"; the server uses today when absent.
        pub date: Option<String>,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        /// Submitted unsigned; expenses are stored negative.
        pub amount: f64,
        #[serde(default)]
        pub description: String,
        #[serde(default = "super::default_category")]
        pub category: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: u32,
        pub date: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        /// Signed: expenses are negative.
        pub amount: f64,
        pub description: String,
        pub category: String,
    }

    /// Response body for `GET /transactions`; newest first.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: u32,
    }
}

pub mod investment {
    use super::*;
    use std::collections::BTreeMap;

    /// Request body for `POST /investments`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvestmentNew {
        pub name: String,
        /// One of the shared investment types, or "Другое".
        #[serde(rename = "type", default = "super::default_category")]
        pub kind: String,
        /// Purchase cost.
        pub amount: f64,
        /// Defaults to `amount` when absent.
        pub current_value: Option<f64>,
        /// "YYYY-MM-DD"; the server uses today when absent.
        pub purchase_date: Option<String>,
        pub expected_return: Option<f64>,
        #[serde(default)]
        pub notes: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvestmentView {
        pub id: u32,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub amount: f64,
        pub current_value: f64,
        pub purchase_date: String,
        pub expected_return: Option<f64>,
        pub notes: String,
        pub added_date: String,
        pub profit: f64,
        pub profit_percent: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvestmentCreated {
        pub id: u32,
    }

    /// One asset type's share of the portfolio.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AllocationSlice {
        pub value: f64,
        pub percentage: f64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum RecommendationKind {
        Info,
        Warning,
        Advice,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Priority {
        High,
        Medium,
        Low,
    }

    /// A single portfolio recommendation.
    ///
    /// The list arrives in fixed rule order; `priority` is
    /// informational, not a sort key.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Recommendation {
        #[serde(rename = "type")]
        pub kind: RecommendationKind,
        pub title: String,
        pub message: String,
        pub priority: Priority,
    }

    /// Response body for `GET /investments`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PortfolioResponse {
        pub investments: Vec<InvestmentView>,
        pub total_value: f64,
        pub allocation: BTreeMap<String, AllocationSlice>,
        pub recommendations: Vec<Recommendation>,
    }

    /// Per-type rollup inside an [`InvestmentSummaryView`].
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TypeSummaryView {
        pub value: f64,
        pub count: u32,
        pub profit: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvestmentSummaryView {
        pub total_value: f64,
        pub total_invested: f64,
        pub total_profit: f64,
        pub profit_percentage: f64,
        pub by_type: BTreeMap<String, TypeSummaryView>,
    }

    /// Response body for `GET /investments/report`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvestmentReport {
        pub total_value: f64,
        pub total_invested: f64,
        pub total_profit: f64,
        pub total_profit_percent: f64,
        pub allocation: BTreeMap<String, AllocationSlice>,
        pub summary: InvestmentSummaryView,
    }
}

pub mod goal {
    use super::*;

    /// Request body for `POST /goals`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub target: f64,
        #[serde(default)]
        pub saved: f64,
        /// "YYYY-MM-DD"; the server uses today when absent.
        pub deadline: Option<String>,
    }

    /// Full-replace request body for `PATCH /goals/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalUpdate {
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub target: f64,
        pub saved: f64,
        pub deadline: String,
    }

    /// Request body for `POST /goals/{id}/add`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalDeposit {
        pub amount: f64,
    }

    /// Response body for `POST /goals/{id}/add`.
    ///
    /// `saved` is not capped at the target; `progress` is.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalDeposited {
        pub saved: f64,
        pub progress: f64,
    }

    /// Derived goal classification.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum GoalStatus {
        Completed,
        Overdue,
        Urgent,
        GoodProgress,
        Active,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalView {
        pub id: u32,
        pub name: String,
        pub description: String,
        pub target: f64,
        pub saved: f64,
        pub deadline: String,
        pub created_date: String,
        /// In [0, 100].
        pub progress: f64,
        pub status: GoalStatus,
    }

    /// Response body for `GET /goals`; sorted urgent-first,
    /// completed last.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalsResponse {
        pub goals: Vec<GoalView>,
        pub total_target: f64,
        pub total_saved: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalCreated {
        pub id: u32,
    }
}

pub mod reports {
    use super::*;
    use crate::investment::{InvestmentSummaryView, InvestmentView};
    use crate::transaction::TransactionView;

    /// Response body for `GET /summary` (the dashboard).
    ///
    /// Totals here group by the transaction **type** field.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Summary {
        pub balance: f64,
        pub total_income: f64,
        pub total_expense: f64,
        /// Last 5, in stored order.
        pub recent_transactions: Vec<TransactionView>,
        /// Last 3, in stored order.
        pub recent_investments: Vec<InvestmentView>,
    }

    /// One calendar month of activity.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthView {
        /// "YYYY-MM".
        pub month: String,
        /// Display name, e.g. "March 2024".
        pub name: String,
        pub income: f64,
        pub expense: f64,
        pub balance: f64,
        pub transactions: u32,
    }

    /// One category's share of a direction's total.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub category: String,
        pub amount: f64,
        pub count: u32,
        pub percentage: f64,
    }

    /// Response body for `GET /reports`.
    ///
    /// Transaction totals here group by the **sign** of the amount.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReportsResponse {
        /// Newest 6 months, descending.
        pub monthly: Vec<MonthView>,
        /// Top 8 per direction, by amount.
        pub expense_categories: Vec<CategoryView>,
        pub income_categories: Vec<CategoryView>,
        pub investment_summary: InvestmentSummaryView,
        pub total_income: f64,
        pub total_expense: f64,
        pub total_balance: f64,
        pub total_goals_target: f64,
        pub total_goals_saved: f64,
        pub goals_progress: f64,
    }
}

pub mod export {
    use super::*;

    /// Response body for `GET /export`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExportOverview {
        pub transactions_count: usize,
        pub investments_count: usize,
        pub goals_count: usize,
        /// Rough serialized size of the user's lists, in kilobytes.
        pub total_size_kb: f64,
    }
}
