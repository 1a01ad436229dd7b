use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::StoreError;

use serde::Serialize;
pub use server::{router, run, run_with_listener, spawn_with_listener};

mod categories;
mod expenses;
mod server;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{
            ExpenseListResponse, ExpenseNew, ExpenseUpdate, ExpenseView,
        };
    }

    pub mod category {
        pub use api_types::category::{CategoryTotalsResponse, CategoryTotalView};
    }
}

pub struct ServerError(StoreError);

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_store_error(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        StoreError::MissingField(_)
        | StoreError::TooLong { .. }
        | StoreError::InvalidAmount(_)
        | StoreError::InvalidDate(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_store_error(err: StoreError) -> String {
    match err {
        StoreError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for_store_error(&self.0);
        let error = message_for_store_error(self.0);

        (status, Json(Error { error })).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        Self(value)
    }
}
