use axum::response::{IntoResponse, Response};
use axum::{Json, http::StatusCode};

/// Helper to create a JSON error response with a standard `{ "error": message }` body.
fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

/// Top-level HTTP-facing error for the meta gateway.
///
/// `Custom` is the escape hatch `ErrorTranslator` (in `meta-router`) uses to
/// produce the exact response shapes `spec.md` §4.8 lists — including bodies
/// that are *not* `{"error": ...}` (the 202 `{"code": ...}` shape) and
/// responses with no body at all (404/405).
pub enum AppError {
    NotFound(String),
    MethodNotAllowed(String),
    UnsupportedMedia(String),
    Internal(String),
    Custom {
        status: StatusCode,
        body: Option<serde_json::Value>,
    },
}

impl AppError {
    pub fn custom(status: StatusCode, body: serde_json::Value) -> Self {
        AppError::Custom { status, body: Some(body) }
    }

    pub fn empty(status: StatusCode) -> Self {
        AppError::Custom { status, body: None }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Custom { status, body: Some(body) } => (status, Json(body)).into_response(),
            AppError::Custom { status, body: None } => status.into_response(),
            AppError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            AppError::MethodNotAllowed(msg) => error_response(StatusCode::METHOD_NOT_ALLOWED, msg),
            AppError::UnsupportedMedia(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg).into_response(),
            AppError::Internal(msg) => error_response(StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::MethodNotAllowed(msg) => write!(f, "Method Not Allowed: {msg}"),
            AppError::UnsupportedMedia(msg) => write!(f, "Unsupported Media Type: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Custom { status, body } => write!(f, "Custom Error ({status}): {body:?}"),
        }
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for AppError {}
