//! Dashboard and reports API endpoints

use api_types::reports::{CategoryView, MonthView, ReportsResponse, Summary};
use axum::{Extension, Json};
use engine::reports;

use crate::{ServerError, investments, transactions};

fn category_views(categories: Vec<reports::CategorySummary>) -> Vec<CategoryView> {
    categories
        .into_iter()
        .map(|c| CategoryView {
            category: c.category,
            amount: c.amount,
            count: c.count,
            percentage: c.percentage,
        })
        .collect()
}

/// The dashboard: balance by transaction type plus the latest entries.
pub async fn summary(
    Extension(user): Extension<engine::User>,
) -> Result<Json<Summary>, ServerError> {
    let totals = reports::balance_by_kind(&user.transactions);

    let tx_tail = &user.transactions[user.transactions.len().saturating_sub(5)..];
    let inv_tail = &user.investments[user.investments.len().saturating_sub(3)..];

    Ok(Json(Summary {
        balance: totals.balance,
        total_income: totals.income,
        total_expense: totals.expense,
        recent_transactions: tx_tail.iter().map(transactions::view).collect(),
        recent_investments: inv_tail.iter().map(investments::view).collect(),
    }))
}

/// The reports page: monthly and category breakdowns plus goal totals.
///
/// Unlike the dashboard, the income/expense totals here go by the sign
/// of the stored amounts.
pub async fn full(
    Extension(user): Extension<engine::User>,
) -> Result<Json<ReportsResponse>, ServerError> {
    let totals = reports::balance_by_sign(&user.transactions);
    let goal_totals = reports::goal_totals(&user.goals);

    let monthly = reports::monthly_summary(&user.transactions)
        .into_iter()
        .map(|m| MonthView {
            month: m.month,
            name: m.name,
            income: m.income,
            expense: m.expense,
            balance: m.balance,
            transactions: m.transactions,
        })
        .collect();

    Ok(Json(ReportsResponse {
        monthly,
        expense_categories: category_views(reports::category_summary(
            &user.transactions,
            engine::TransactionKind::Expense,
        )),
        income_categories: category_views(reports::category_summary(
            &user.transactions,
            engine::TransactionKind::Income,
        )),
        investment_summary: investments::summary_view(reports::investment_summary(
            &user.investments,
        )),
        total_income: totals.income,
        total_expense: totals.expense,
        total_balance: totals.balance,
        total_goals_target: goal_totals.target,
        total_goals_saved: goal_totals.saved,
        goals_progress: goal_totals.progress,
    }))
}
