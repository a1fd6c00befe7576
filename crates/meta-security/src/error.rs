use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Authentication failures surfaced while extracting the caller `Identity`.
#[derive(Debug)]
pub enum SecurityError {
    /// The `Authorization` header is missing from the request.
    MissingAuthHeader,
    /// The authorization scheme is not `Basic`, or the value is malformed.
    InvalidAuthScheme,
    /// The presented `uuid:key` pair did not resolve to a known identity.
    InvalidCredentials,
    /// The auth backend itself failed.
    BackendError(String),
}

impl std::fmt::Display for SecurityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityError::MissingAuthHeader => write!(f, "missing Authorization header"),
            SecurityError::InvalidAuthScheme => write!(f, "invalid authorization scheme"),
            SecurityError::InvalidCredentials => write!(f, "invalid credentials"),
            SecurityError::BackendError(msg) => write!(f, "auth backend error: {msg}"),
        }
    }
}

impl std::error::Error for SecurityError {}

impl SecurityError {
    fn public_message(&self) -> &'static str {
        "Unauthorized"
    }
}

impl IntoResponse for SecurityError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.public_message() });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
