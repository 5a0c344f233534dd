use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod budgets;
mod savings_goals;
mod server;
mod transactions;
pub mod user;

pub mod types {
    pub use api_types::Removed;

    pub mod transaction {
        pub use api_types::transaction::{
            TransactionCreate, TransactionListResponse, TransactionStatsQuery, TransactionUpdate,
            TransactionView,
        };
    }

    pub mod budget {
        pub use api_types::budget::{BudgetCreate, BudgetListResponse, BudgetUpdate, BudgetView};
    }

    pub mod savings_goal {
        pub use api_types::savings_goal::{
            Deposit, SavingsGoalCreate, SavingsGoalListResponse, SavingsGoalUpdate,
            SavingsGoalView,
        };
    }

    pub mod stats {
        pub use api_types::stats::{BudgetStats, SavingsGoalStats, TransactionStats};
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
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::NotAuthorized(_) => StatusCode::UNAUTHORIZED,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_) | EngineError::InvalidField(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
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
