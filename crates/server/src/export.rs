//! Export API endpoints

use api_types::export::ExportOverview;
use axum::{
    Extension, Json,
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::{ServerError, server::ServerState};

fn serialized_len<T: serde::Serialize>(list: &[T]) -> Result<usize, ServerError> {
    Ok(serde_json::to_string(list)
        .map_err(engine::EngineError::from)?
        .len())
}

/// What an export would contain, before downloading one.
///
/// The size figure covers only the user-owned lists, not the shared
/// reference data the full snapshot carries alongside them.
pub async fn overview(
    Extension(user): Extension<engine::User>,
) -> Result<Json<ExportOverview>, ServerError> {
    let size = serialized_len(&user.transactions)?
        + serialized_len(&user.investments)?
        + serialized_len(&user.goals)?;

    Ok(Json(ExportOverview {
        transactions_count: user.transactions.len(),
        investments_count: user.investments.len(),
        goals_count: user.goals.len(),
        total_size_kb: (size as f64 / 1024.0 * 100.0).round() / 100.0,
    }))
}

/// The transaction list as a spreadsheet-friendly CSV attachment.
pub async fn csv(
    Extension(user): Extension<engine::User>,
) -> Result<impl IntoResponse, ServerError> {
    let bytes = engine::export::transactions_csv(&user.transactions)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"finance_export.csv\"",
            ),
        ],
        bytes,
    ))
}

/// The full per-user snapshot as a JSON attachment.
pub async fn json(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let data = state.engine.user_data(user.id)?;
    let body = engine::export::user_data_json(&data)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"finance_export.json\"",
            ),
        ],
        body,
    ))
}
