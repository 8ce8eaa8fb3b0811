use axum::response::{IntoResponse, Response};
use std::any::Any;

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    ErrorResponse::new(ErrorCode::NotFound).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    ErrorResponse::new(ErrorCode::MethodNotAllowed).into_response()
}

/// Converts a handler panic into a 500 response.
///
/// Meant for `tower_http::catch_panic::CatchPanicLayer::custom`. The panic
/// payload is logged but never sent to the client.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    tracing::error!(
        error_code = ErrorCode::InternalError.code(),
        panic = %detail,
        "Request handler panicked"
    );

    ErrorResponse::new(ErrorCode::InternalError).into_response()
}
