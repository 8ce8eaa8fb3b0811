use axum::response::{IntoResponse, Response};
use axum_helpers::{ErrorCode, ErrorResponse};
use thiserror::Error;

use crate::models::UserId;

#[derive(Debug, Error)]
pub enum UserError {
    /// Malformed id, username or email, or a request missing required fields
    #[error("{0}")]
    Validation(String),

    #[error("user with email {0} already exists")]
    DuplicateEmail(String),

    #[error("User {0} not found")]
    NotFound(UserId),
}

impl UserError {
    /// Whether this is a rejected write (malformed input or a uniqueness
    /// violation). Such failures never change repository state.
    pub fn is_validation(&self) -> bool {
        matches!(self, UserError::Validation(_) | UserError::DuplicateEmail(_))
    }
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let body = match &self {
            UserError::Validation(_) | UserError::DuplicateEmail(_) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Rejected user write: {}",
                    self
                );
                ErrorResponse::with_message(ErrorCode::ValidationError, self.to_string())
            }
            UserError::NotFound(id) => {
                tracing::debug!(user_id = id, "User not found");
                ErrorResponse::with_message(ErrorCode::NotFound, "User not found")
            }
        };

        body.into_response()
    }
}
