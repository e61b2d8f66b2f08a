use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, app, run, run_with_listener, signing_key, spawn_with_listener};

mod export;
mod goals;
mod investments;
mod reports;
mod server;
mod session;
mod transactions;
mod user;

pub mod types {
    pub mod user {
        pub use api_types::user::{Credentials, RegisterNew, ResetDone, SessionUser};
    }

    pub mod transaction {
        pub use api_types::transaction::{
            TransactionCreated, TransactionKind, TransactionListResponse, TransactionNew,
            TransactionView,
        };
    }

    pub mod investment {
        pub use api_types::investment::{
            AllocationSlice, InvestmentCreated, InvestmentNew, InvestmentReport,
            InvestmentSummaryView, InvestmentView, PortfolioResponse, Recommendation,
        };
    }

    pub mod goal {
        pub use api_types::goal::{
            GoalCreated, GoalDeposit, GoalDeposited, GoalNew, GoalStatus, GoalUpdate, GoalView,
            GoalsResponse,
        };
    }

    pub mod reports {
        pub use api_types::reports::{CategoryView, MonthView, ReportsResponse, Summary};
    }

    pub mod export {
        pub use api_types::export::ExportOverview;
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Storage(_) | EngineError::Serialize(_) | EngineError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Storage(_) | EngineError::Serialize(_) | EngineError::Export(_) => {
            tracing::error!("storage error: {err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_bad_credentials_map_to_401() {
        let res = ServerError::from(EngineError::InvalidCredentials).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidInput("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_storage_errors_map_to_masked_500() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let res = ServerError::from(EngineError::Storage(io)).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
