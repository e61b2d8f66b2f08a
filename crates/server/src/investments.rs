//! Investments API endpoints

use std::collections::BTreeMap;

use api_types::investment::{
    AllocationSlice, InvestmentCreated, InvestmentNew, InvestmentReport, InvestmentSummaryView,
    InvestmentView, PortfolioResponse, Priority as ApiPriority, Recommendation,
    RecommendationKind as ApiRecommendationKind, TypeSummaryView,
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::reports;

use crate::{ServerError, server::ServerState};

pub(crate) fn view(inv: &engine::Investment) -> InvestmentView {
    InvestmentView {
        id: inv.id,
        name: inv.name.clone(),
        kind: inv.kind.clone(),
        amount: inv.amount,
        current_value: inv.value(),
        purchase_date: inv.purchase_date.clone(),
        expected_return: inv.expected_return,
        notes: inv.notes.clone(),
        added_date: inv.added_date.clone(),
        profit: inv.profit(),
        profit_percent: inv.profit_percent(),
    }
}

fn allocation_view(
    allocation: BTreeMap<String, reports::AllocationSlice>,
) -> BTreeMap<String, AllocationSlice> {
    allocation
        .into_iter()
        .map(|(kind, slice)| {
            (
                kind,
                AllocationSlice {
                    value: slice.value,
                    percentage: slice.percentage,
                },
            )
        })
        .collect()
}

fn recommendation_view(rec: reports::Recommendation) -> Recommendation {
    Recommendation {
        kind: match rec.kind {
            reports::RecommendationKind::Info => ApiRecommendationKind::Info,
            reports::RecommendationKind::Warning => ApiRecommendationKind::Warning,
            reports::RecommendationKind::Advice => ApiRecommendationKind::Advice,
        },
        title: rec.title,
        message: rec.message,
        priority: match rec.priority {
            reports::Priority::High => ApiPriority::High,
            reports::Priority::Medium => ApiPriority::Medium,
            reports::Priority::Low => ApiPriority::Low,
        },
    }
}

pub(crate) fn summary_view(summary: reports::InvestmentSummary) -> InvestmentSummaryView {
    InvestmentSummaryView {
        total_value: summary.total_value,
        total_invested: summary.total_invested,
        total_profit: summary.total_profit,
        profit_percentage: summary.profit_percentage,
        by_type: summary
            .by_type
            .into_iter()
            .map(|(kind, t)| {
                (
                    kind,
                    TypeSummaryView {
                        value: t.value,
                        count: t.count,
                        profit: t.profit,
                    },
                )
            })
            .collect(),
    }
}

/// The portfolio page: positions, total value, allocation and advice.
pub async fn portfolio(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<PortfolioResponse>, ServerError> {
    // Recommendations benchmark against the shared risk profiles.
    let data = state.engine.user_data(user.id)?;

    let recommendations = reports::recommendations(
        &data.investments,
        &data.risk_profiles,
        data.user_info.risk_profile,
    )
    .into_iter()
    .map(recommendation_view)
    .collect();

    Ok(Json(PortfolioResponse {
        investments: data.investments.iter().map(view).collect(),
        total_value: reports::portfolio_value(&data.investments),
        allocation: allocation_view(reports::portfolio_allocation(&data.investments)),
        recommendations,
    }))
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<InvestmentNew>,
) -> Result<(StatusCode, Json<InvestmentCreated>), ServerError> {
    let stored = state.engine.add_investment(
        user.id,
        engine::NewInvestment {
            name: payload.name,
            kind: payload.kind,
            amount: payload.amount,
            current_value: payload.current_value,
            purchase_date: payload.purchase_date,
            expected_return: payload.expected_return,
            notes: payload.notes,
        },
    )?;

    Ok((StatusCode::CREATED, Json(InvestmentCreated { id: stored.id })))
}

/// Portfolio totals and per-type breakdown.
pub async fn report(
    Extension(user): Extension<engine::User>,
) -> Result<Json<InvestmentReport>, ServerError> {
    let summary = reports::investment_summary(&user.investments);

    Ok(Json(InvestmentReport {
        total_value: summary.total_value,
        total_invested: summary.total_invested,
        total_profit: summary.total_profit,
        total_profit_percent: summary.profit_percentage,
        allocation: allocation_view(reports::portfolio_allocation(&user.investments)),
        summary: summary_view(summary),
    }))
}
