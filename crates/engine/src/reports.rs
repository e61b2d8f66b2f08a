//! The aggregation/reporting module.
//!
//! Everything here is a pure pass over an in-memory snapshot: no state
//! machine, no I/O. Callers feed it the lists from a [`UserData`]
//! snapshot and render whatever comes back.
//!
//! [`UserData`]: crate::UserData

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    goals::{Goal, GoalStatus},
    investments::Investment,
    store::{RiskProfile, moderate_profile},
    transactions::{Transaction, TransactionKind},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Total portfolio value: current value per position, falling back to
/// the purchase cost.
pub fn portfolio_value(investments: &[Investment]) -> f64 {
    investments.iter().map(Investment::value).sum()
}

/// One asset type's share of the portfolio.
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationSlice {
    pub value: f64,
    pub percentage: f64,
}

/// Portfolio value broken down by asset type.
///
/// An empty or zero-total portfolio yields an empty map.
pub fn portfolio_allocation(investments: &[Investment]) -> BTreeMap<String, AllocationSlice> {
    let mut allocation = BTreeMap::new();
    let total = portfolio_value(investments);
    if total == 0.0 {
        return allocation;
    }

    for inv in investments {
        let slice = allocation
            .entry(inv.kind.clone())
            .or_insert(AllocationSlice {
                value: 0.0,
                percentage: 0.0,
            });
        slice.value += inv.value();
    }

    for slice in allocation.values_mut() {
        slice.percentage = slice.value / total * 100.0;
    }

    allocation
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecommendationKind {
    Info,
    Warning,
    Advice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
}

fn start_investing() -> Recommendation {
    Recommendation {
        kind: RecommendationKind::Info,
        title: "Начните инвестировать".to_string(),
        message: "Ваш портфель пуст. Начните с создания диверсифицированного портфеля."
            .to_string(),
        priority: Priority::High,
    }
}

/// Rule-based portfolio advice, benchmarked against the selected risk
/// profile.
///
/// The rules fire in fixed order (the priority field is informational,
/// not a sort key) and at most three recommendations are returned:
///
/// 1. empty portfolio: a single "start investing" entry;
/// 2. fewer than 3 distinct asset types: diversification warning;
/// 3. stock/bond ratios deviating more than 15 points from the
///    profile's targets: rebalance advice;
/// 4. total value below 50 000: recurring-contribution tip.
pub fn recommendations(
    investments: &[Investment],
    risk_profiles: &[RiskProfile],
    risk_profile_id: u32,
) -> Vec<Recommendation> {
    let total = portfolio_value(investments);
    if investments.is_empty() || total == 0.0 {
        return vec![start_investing()];
    }

    let profile = risk_profiles
        .iter()
        .find(|p| p.id == risk_profile_id)
        .or_else(|| risk_profiles.get(1))
        .cloned()
        .unwrap_or_else(moderate_profile);

    let allocation = portfolio_allocation(investments);
    let mut recommendations = Vec::new();

    if allocation.len() < 3 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Warning,
            title: "Низкая диверсификация".to_string(),
            message: format!(
                "У вас всего {} типа активов. Рекомендуется не менее 3 для снижения рисков.",
                allocation.len()
            ),
            priority: Priority::Medium,
        });
    }

    let value_of = |kind: &str| allocation.get(kind).map_or(0.0, |slice| slice.value);
    let stocks_ratio = (value_of("Акции") + value_of("ETF")) / total * 100.0;
    let bonds_ratio = value_of("Облигации") / total * 100.0;

    if (stocks_ratio - profile.stocks_ratio).abs() > 15.0 {
        let action = if stocks_ratio < profile.stocks_ratio {
            "увеличьте"
        } else {
            "уменьшите"
        };
        recommendations.push(Recommendation {
            kind: RecommendationKind::Advice,
            title: "Баланс акций".to_string(),
            message: format!(
                "{action} долю акций с {stocks_ratio:.1}% до {}%",
                profile.stocks_ratio
            ),
            priority: Priority::Medium,
        });
    }

    if (bonds_ratio - profile.bonds_ratio).abs() > 15.0 {
        let action = if bonds_ratio < profile.bonds_ratio {
            "увеличьте"
        } else {
            "уменьшите"
        };
        recommendations.push(Recommendation {
            kind: RecommendationKind::Advice,
            title: "Баланс облигаций".to_string(),
            message: format!(
                "{action} долю облигаций с {bonds_ratio:.1}% до {}%",
                profile.bonds_ratio
            ),
            priority: Priority::Medium,
        });
    }

    if total < 50_000.0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Info,
            title: "Регулярные инвестиции".to_string(),
            message: "Рассмотрите возможность регулярных пополнений портфеля, даже небольшими суммами."
                .to_string(),
            priority: Priority::Low,
        });
    }

    recommendations.truncate(3);
    recommendations
}

/// Goal completion in percent, in `[0, 100]`. A non-positive target
/// yields 0.
pub fn goal_progress(goal: &Goal) -> f64 {
    if goal.target <= 0.0 {
        return 0.0;
    }
    (goal.saved / goal.target * 100.0).min(100.0)
}

/// Classifies a goal from its progress and deadline proximity.
///
/// An unparseable deadline silently falls back to `Active`, matching
/// how the store treats hand-edited documents everywhere else.
pub fn goal_status(goal: &Goal, today: NaiveDate) -> GoalStatus {
    let progress = goal_progress(goal);
    if progress >= 100.0 {
        return GoalStatus::Completed;
    }

    match NaiveDate::parse_from_str(&goal.deadline, DATE_FORMAT) {
        Ok(deadline) => {
            let days_left = (deadline - today).num_days();
            if days_left < 0 {
                GoalStatus::Overdue
            } else if days_left < 30 {
                GoalStatus::Urgent
            } else if progress > 50.0 {
                GoalStatus::GoodProgress
            } else {
                GoalStatus::Active
            }
        }
        Err(_) => GoalStatus::Active,
    }
}

/// Aggregate over all goals: Σ target, Σ saved and the overall
/// completion percentage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalTotals {
    pub target: f64,
    pub saved: f64,
    pub progress: f64,
}

pub fn goal_totals(goals: &[Goal]) -> GoalTotals {
    let target: f64 = goals.iter().map(|g| g.target).sum();
    let saved: f64 = goals.iter().map(|g| g.saved).sum();
    let progress = if target > 0.0 {
        saved / target * 100.0
    } else {
        0.0
    };
    GoalTotals {
        target,
        saved,
        progress,
    }
}

/// One calendar month of transaction activity.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthSummary {
    /// "YYYY-MM" sort key.
    pub month: String,
    /// Display name, e.g. "March 2024".
    pub name: String,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub transactions: u32,
}

/// Groups transactions by calendar month; newest 6 months first.
///
/// Income/expense split by the sign of the amount; entries with
/// unparseable dates are skipped.
pub fn monthly_summary(transactions: &[Transaction]) -> Vec<MonthSummary> {
    let mut months: BTreeMap<String, MonthSummary> = BTreeMap::new();

    for t in transactions {
        let Ok(date) = NaiveDate::parse_from_str(&t.date, DATE_FORMAT) else {
            continue;
        };
        let key = date.format("%Y-%m").to_string();
        let entry = months.entry(key.clone()).or_insert_with(|| MonthSummary {
            month: key,
            name: date.format("%B %Y").to_string(),
            income: 0.0,
            expense: 0.0,
            balance: 0.0,
            transactions: 0,
        });

        if t.amount > 0.0 {
            entry.income += t.amount;
        } else {
            entry.expense += t.amount.abs();
        }
        entry.balance += t.amount;
        entry.transactions += 1;
    }

    months.into_values().rev().take(6).collect()
}

/// One category's share of the filtered transactions.
#[derive(Clone, Debug, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub amount: f64,
    pub count: u32,
    pub percentage: f64,
}

/// Per-category totals for one direction, top 8 by amount.
///
/// Filtering goes by the **sign** of the stored amount, not the type
/// field, so a hand-edited positive "expense" counts as income here.
/// Percentages are shares of the full filtered total, which only sums
/// to 100 across the returned entries when there are at most 8
/// categories.
pub fn category_summary(transactions: &[Transaction], kind: TransactionKind) -> Vec<CategorySummary> {
    let mut by_category: BTreeMap<String, (f64, u32)> = BTreeMap::new();

    for t in transactions {
        let keep = match kind {
            TransactionKind::Expense => t.amount < 0.0,
            TransactionKind::Income => t.amount >= 0.0,
        };
        if !keep {
            continue;
        }
        let entry = by_category.entry(t.category.clone()).or_insert((0.0, 0));
        entry.0 += t.amount.abs();
        entry.1 += 1;
    }

    let total: f64 = by_category.values().map(|(amount, _)| amount).sum();
    let mut categories: Vec<CategorySummary> = by_category
        .into_iter()
        .map(|(category, (amount, count))| CategorySummary {
            category,
            amount,
            count,
            percentage: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    categories.truncate(8);
    categories
}

/// Per-type rollup inside [`InvestmentSummary`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeSummary {
    pub value: f64,
    pub count: u32,
    pub profit: f64,
}

/// Portfolio-wide totals plus a per-type breakdown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvestmentSummary {
    pub total_value: f64,
    pub total_invested: f64,
    pub total_profit: f64,
    pub profit_percentage: f64,
    pub by_type: BTreeMap<String, TypeSummary>,
}

pub fn investment_summary(investments: &[Investment]) -> InvestmentSummary {
    let mut summary = InvestmentSummary::default();

    for inv in investments {
        let value = inv.value();
        let profit = inv.profit();

        summary.total_value += value;
        summary.total_invested += inv.amount;
        summary.total_profit += profit;

        let entry = summary.by_type.entry(inv.kind.clone()).or_default();
        entry.value += value;
        entry.count += 1;
        entry.profit += profit;
    }

    if summary.total_invested > 0.0 {
        summary.profit_percentage = summary.total_profit / summary.total_invested * 100.0;
    }

    summary
}

/// Income/expense/balance triple used by the dashboard and reports.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Totals grouped by the transaction **type** field (dashboard view).
pub fn balance_by_kind(transactions: &[Transaction]) -> BalanceSummary {
    let income: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Income)
        .map(|t| t.amount)
        .sum();
    let expense: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .map(|t| t.amount.abs())
        .sum();
    BalanceSummary {
        income,
        expense,
        balance: income - expense,
    }
}

/// Totals grouped by the **sign** of the amount (reports view).
pub fn balance_by_sign(transactions: &[Transaction]) -> BalanceSummary {
    let income: f64 = transactions
        .iter()
        .filter(|t| t.amount > 0.0)
        .map(|t| t.amount)
        .sum();
    let expense: f64 = transactions
        .iter()
        .filter(|t| t.amount < 0.0)
        .map(|t| t.amount.abs())
        .sum();
    BalanceSummary {
        income,
        expense,
        balance: income - expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn inv(kind: &str, amount: f64, current_value: Option<f64>) -> Investment {
        Investment {
            id: 0,
            name: kind.to_string(),
            kind: kind.to_string(),
            amount,
            current_value,
            purchase_date: "2024-01-01".to_string(),
            expected_return: None,
            notes: String::new(),
            added_date: "2024-01-01".to_string(),
        }
    }

    fn tx(date: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            id: 0,
            date: date.to_string(),
            kind: if amount >= 0.0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            },
            amount,
            description: String::new(),
            category: category.to_string(),
        }
    }

    fn goal(target: f64, saved: f64, deadline: &str) -> Goal {
        Goal {
            id: 1,
            name: "Отпуск".to_string(),
            description: String::new(),
            target,
            saved,
            deadline: deadline.to_string(),
            created_date: "2024-01-01".to_string(),
            progress: 0.0,
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad test date")
    }

    #[test]
    fn allocation_values_sum_to_portfolio_value() {
        let investments = [
            inv("Акции", 100.0, Some(150.0)),
            inv("Облигации", 200.0, None),
            inv("Акции", 50.0, Some(40.0)),
        ];
        let allocation = portfolio_allocation(&investments);
        let sum: f64 = allocation.values().map(|s| s.value).sum();
        assert!((sum - portfolio_value(&investments)).abs() < EPS);

        let percentages: f64 = allocation.values().map(|s| s.percentage).sum();
        assert!((percentages - 100.0).abs() < EPS);
    }

    #[test]
    fn empty_portfolio_has_empty_allocation() {
        assert!(portfolio_allocation(&[]).is_empty());
        // All-zero positions count as an empty portfolio too.
        assert!(portfolio_allocation(&[inv("Акции", 0.0, None)]).is_empty());
    }

    #[test]
    fn empty_portfolio_gets_single_start_recommendation() {
        let profiles = crate::StoreData::default().risk_profiles;
        let recs = recommendations(&[], &profiles, 2);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Начните инвестировать");
        assert_eq!(recs[0].priority, Priority::High);
    }

    #[test]
    fn few_asset_types_warn_about_diversification() {
        let profiles = crate::StoreData::default().risk_profiles;
        // Two asset types in roughly the moderate 50/40 proportion, so
        // no rebalance advice fires; the small total still triggers the
        // recurring tip.
        let investments = [inv("Акции", 500.0, None), inv("Облигации", 400.0, None)];
        let recs = recommendations(&investments, &profiles, 2);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "Низкая диверсификация");
        assert_eq!(recs[1].title, "Регулярные инвестиции");
    }

    #[test]
    fn skewed_portfolio_gets_rebalance_advice() {
        let profiles = crate::StoreData::default().risk_profiles;
        // 100% stocks vs the moderate 50/40/10 target: both ratios are
        // off by more than 15 points.
        let investments = [
            inv("Акции", 40_000.0, None),
            inv("ETF", 20_000.0, None),
            inv("Недвижимость", 0.1, None),
        ];
        let recs = recommendations(&investments, &profiles, 2);
        let titles: Vec<_> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Баланс акций", "Баланс облигаций"]);
        assert!(recs[0].message.starts_with("уменьшите"));
        assert!(recs[1].message.starts_with("увеличьте"));
    }

    #[test]
    fn recommendations_cap_at_three() {
        let profiles = crate::StoreData::default().risk_profiles;
        // One asset type, fully skewed, tiny total: all four rules
        // would fire but the list is truncated in rule order.
        let investments = [inv("Акции", 1_000.0, None)];
        let recs = recommendations(&investments, &profiles, 2);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].title, "Низкая диверсификация");
        assert_eq!(recs[1].title, "Баланс акций");
        assert_eq!(recs[2].title, "Баланс облигаций");
    }

    #[test]
    fn unknown_profile_falls_back_to_second_entry() {
        let profiles = crate::StoreData::default().risk_profiles;
        let investments = [inv("Акции", 30_000.0, None), inv("Облигации", 30_000.0, None)];
        // id 99 does not exist: the moderate (second) profile applies,
        // so a 50/50 split only trips the bonds rule by 10 points -> no
        // rebalance advice for stocks.
        let recs = recommendations(&investments, &profiles, 99);
        assert!(recs.iter().all(|r| r.title != "Баланс акций"));
    }

    #[test]
    fn goal_progress_is_capped_and_guarded() {
        assert_eq!(goal_progress(&goal(1000.0, 500.0, "2030-01-01")), 50.0);
        assert_eq!(goal_progress(&goal(1000.0, 2500.0, "2030-01-01")), 100.0);
        assert_eq!(goal_progress(&goal(0.0, 500.0, "2030-01-01")), 0.0);
        assert_eq!(goal_progress(&goal(-10.0, 500.0, "2030-01-01")), 0.0);
    }

    #[test]
    fn goal_status_classification() {
        let today = day("2024-06-15");
        assert_eq!(
            goal_status(&goal(1000.0, 1000.0, "2024-01-01"), today),
            GoalStatus::Completed
        );
        assert_eq!(
            goal_status(&goal(1000.0, 100.0, "2024-06-01"), today),
            GoalStatus::Overdue
        );
        assert_eq!(
            goal_status(&goal(1000.0, 100.0, "2024-07-01"), today),
            GoalStatus::Urgent
        );
        assert_eq!(
            goal_status(&goal(1000.0, 600.0, "2025-06-01"), today),
            GoalStatus::GoodProgress
        );
        assert_eq!(
            goal_status(&goal(1000.0, 500.0, "2025-06-01"), today),
            GoalStatus::Active
        );
        // Exactly 50% is not "good progress" yet.
        assert_eq!(
            goal_status(&goal(1000.0, 500.0, "2025-06-01"), today),
            GoalStatus::Active
        );
        assert_eq!(
            goal_status(&goal(1000.0, 100.0, "someday"), today),
            GoalStatus::Active
        );
    }

    #[test]
    fn monthly_summary_groups_and_truncates() {
        let mut transactions = vec![
            tx("2024-03-10", 1000.0, "Зарплата"),
            tx("2024-03-15", -400.0, "Еда"),
            tx("2024-03-20", -100.0, "Транспорт"),
            tx("not-a-date", 999.0, "Зарплата"),
        ];
        for month in 1..=7 {
            transactions.push(tx(&format!("2023-{month:02}-01"), 10.0, "Подарок"));
        }

        let months = monthly_summary(&transactions);
        assert_eq!(months.len(), 6);
        assert_eq!(months[0].month, "2024-03");
        assert_eq!(months[0].name, "March 2024");
        assert_eq!(months[0].income, 1000.0);
        assert_eq!(months[0].expense, 500.0);
        assert_eq!(months[0].balance, 500.0);
        assert_eq!(months[0].transactions, 3);
        // Newest first, oldest months dropped.
        assert_eq!(months[5].month, "2023-03");
    }

    #[test]
    fn category_summary_filters_by_sign() {
        let transactions = [
            tx("2024-03-10", -40.0, "Еда"),
            tx("2024-03-11", -60.0, "Еда"),
            tx("2024-03-12", -120.0, "Транспорт"),
            tx("2024-03-13", 5000.0, "Зарплата"),
        ];

        let expenses = category_summary(&transactions, TransactionKind::Expense);
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].category, "Транспорт");
        assert_eq!(expenses[0].amount, 120.0);
        assert_eq!(expenses[1].category, "Еда");
        assert_eq!(expenses[1].amount, 100.0);
        assert_eq!(expenses[1].count, 2);
        let total: f64 = expenses.iter().map(|c| c.percentage).sum();
        assert!((total - 100.0).abs() < EPS);

        let income = category_summary(&transactions, TransactionKind::Income);
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].category, "Зарплата");
        assert!((income[0].percentage - 100.0).abs() < EPS);
    }

    #[test]
    fn category_summary_returns_at_most_eight() {
        let transactions: Vec<_> = (0..12)
            .map(|i| tx("2024-01-05", -(10.0 + f64::from(i)), &format!("cat{i}")))
            .collect();
        let summary = category_summary(&transactions, TransactionKind::Expense);
        assert_eq!(summary.len(), 8);
        // Percentages are shares of the full filtered total, so the
        // truncated tail leaves them short of 100 here.
        let total: f64 = summary.iter().map(|c| c.percentage).sum();
        assert!(total < 100.0);
    }

    #[test]
    fn investment_summary_totals() {
        let investments = [
            inv("Акции", 100.0, Some(150.0)),
            inv("Акции", 100.0, Some(50.0)),
            inv("Облигации", 200.0, None),
        ];
        let summary = investment_summary(&investments);
        assert_eq!(summary.total_invested, 400.0);
        assert_eq!(summary.total_value, 400.0);
        assert_eq!(summary.total_profit, 0.0);
        assert_eq!(summary.profit_percentage, 0.0);

        let stocks = &summary.by_type["Акции"];
        assert_eq!(stocks.count, 2);
        assert_eq!(stocks.value, 200.0);
        assert_eq!(stocks.profit, 0.0);
    }

    #[test]
    fn balance_split_by_kind_and_sign_can_differ() {
        // A hand-edited positive "expense" is an expense for the
        // dashboard but counts as income in the sign-based reports.
        let odd = Transaction {
            id: 1,
            date: "2024-01-01".to_string(),
            kind: TransactionKind::Expense,
            amount: 30.0,
            description: String::new(),
            category: "Еда".to_string(),
        };
        let by_kind = balance_by_kind(std::slice::from_ref(&odd));
        assert_eq!(by_kind.expense, 30.0);
        assert_eq!(by_kind.balance, -30.0);

        let by_sign = balance_by_sign(std::slice::from_ref(&odd));
        assert_eq!(by_sign.income, 30.0);
        assert_eq!(by_sign.balance, 30.0);
    }

    #[test]
    fn goal_totals_guard_zero_target() {
        assert_eq!(goal_totals(&[]).progress, 0.0);
        let totals = goal_totals(&[goal(1000.0, 250.0, "2030-01-01"), goal(1000.0, 750.0, "2030-01-01")]);
        assert_eq!(totals.target, 2000.0);
        assert_eq!(totals.saved, 1000.0);
        assert_eq!(totals.progress, 50.0);
    }
}
