//! JSON extractor with automatic validation using the validator crate.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    body::Bytes,
    extract::{FromRequest, Json, Request, rejection::JsonRejection},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

/// JSON extractor with automatic validation.
///
/// Rejections always use [`ErrorResponse`] with status 400:
/// - no JSON content type, empty body, `{}` or unparsable JSON → `MISSING_JSON`
/// - well-formed JSON of the wrong shape → `INVALID_JSON`
/// - `Validate` failures → `VALIDATION_ERROR`, with the first message (by
///   field name) as `error` and every message under `details`
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(length(min = 3, message = "username is too short"))]
///     username: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     format!("Creating user: {}", payload.username)
/// }
///
/// let app = Router::new().route("/users", post(create_user));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(ErrorResponse::new(ErrorCode::MissingJson).into_response());
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Failed to buffer request body: {}", e);
            ErrorResponse::new(ErrorCode::MissingJson).into_response()
        })?;

        if bytes.is_empty() || is_empty_object(&bytes) {
            return Err(ErrorResponse::new(ErrorCode::MissingJson).into_response());
        }

        let Json(data) = Json::<T>::from_bytes(&bytes).map_err(rejection_response)?;

        data.validate().map_err(validation_response)?;

        Ok(ValidatedJson(data))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// `{}` carries nothing to act on and counts as an absent body. Objects with
/// only unknown or null members are not empty and pass through.
fn is_empty_object(bytes: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(bytes)
        .is_ok_and(|object| object.is_empty())
}

fn rejection_response(rejection: JsonRejection) -> Response {
    tracing::debug!(
        error_code = ErrorCode::InvalidJson.code(),
        "JSON extraction error: {}",
        rejection.body_text()
    );

    match rejection {
        JsonRejection::JsonDataError(e) => ErrorResponse::new(ErrorCode::InvalidJson)
            .with_details(serde_json::json!({ "reason": e.body_text() }))
            .into_response(),
        _ => ErrorResponse::new(ErrorCode::MissingJson).into_response(),
    }
}

fn validation_response(errors: ValidationErrors) -> Response {
    let fields: BTreeMap<String, Vec<String>> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    let message = fields
        .values()
        .flatten()
        .next()
        .cloned()
        .unwrap_or_else(|| ErrorCode::ValidationError.default_message().to_string());

    tracing::info!(
        error_code = ErrorCode::ValidationError.code(),
        "Request validation failed: {}",
        message
    );

    ErrorResponse::with_message(ErrorCode::ValidationError, message)
        .with_details(serde_json::json!(fields))
        .into_response()
}
