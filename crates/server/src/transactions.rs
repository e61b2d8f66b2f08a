//! Transactions API endpoints

use api_types::transaction::{
    TransactionCreated, TransactionKind as ApiKind, TransactionListResponse, TransactionNew,
    TransactionView,
};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

fn unmap_kind(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Income => engine::TransactionKind::Income,
        ApiKind::Expense => engine::TransactionKind::Expense,
    }
}

pub(crate) fn view(t: &engine::Transaction) -> TransactionView {
    TransactionView {
        id: t.id,
        date: t.date.clone(),
        kind: map_kind(t.kind),
        amount: t.amount,
        description: t.description.clone(),
        category: t.category.clone(),
    }
}

/// The user's transactions, newest date first.
pub async fn list(
    Extension(user): Extension<engine::User>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let mut transactions = user.transactions;
    // Stable sort, so same-day entries keep their stored order.
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(Json(TransactionListResponse {
        transactions: transactions.iter().map(view).collect(),
    }))
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let stored = state.engine.add_transaction(
        user.id,
        engine::NewTransaction {
            date: payload.date,
            kind: unmap_kind(payload.kind),
            amount: payload.amount,
            description: payload.description,
            category: payload.category,
        },
    )?;

    Ok((StatusCode::CREATED, Json(TransactionCreated { id: stored.id })))
}
