//! Error types for the duties API
//!
//! Provides unified error handling using thiserror. Infrastructure failures
//! are logged here and reach the client only as a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body sent for every 500 response
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

// == Duty Error Enum ==
#[derive(Error, Debug)]
pub enum DutyError {
    /// Request data failed validation
    #[error("{0}")]
    Validation(String),

    /// No duty with the requested id
    #[error("Duty not found")]
    NotFound,

    /// Query or connection failure in the data store
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DutyError {
    pub fn status(&self) -> StatusCode {
        match self {
            DutyError::Validation(_) => StatusCode::BAD_REQUEST,
            DutyError::NotFound => StatusCode::NOT_FOUND,
            DutyError::Database(_) | DutyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for DutyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, DutyError>;
