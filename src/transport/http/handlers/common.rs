use crate::error::TramosError;
use crate::transport::http::types::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Returns the trimmed value of a required request field.
pub fn require_field(value: Option<String>, name: &str) -> Result<String, TramosError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TramosError::Validation(format!("'{}' is required", name))),
    }
}

/// Logs `err` and turns it into the client-facing response.
///
/// Validation failures are reported as 400 with their own message; every
/// other failure is a 500 carrying only `generic`.
pub fn error_response(err: &TramosError, generic: &str) -> Response {
    if err.is_client_error() {
        tracing::warn!(error = %err, "Rejected request");
        return (StatusCode::BAD_REQUEST, Json(ErrorBody::new(err.to_string()))).into_response();
    }
    tracing::error!(error = %err, "Request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(generic))).into_response()
}
