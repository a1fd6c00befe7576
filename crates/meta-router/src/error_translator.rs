use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use meta_core::{ActivationOutcome, AppError};
use serde_json::json;

use crate::merger::MergeError;
use crate::resolver::ResolveError;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Deterministic opaque numeric code derived from a string id (`spec.md` §9
/// open question, resolved in `SPEC_FULL.md` §3: FNV-1a truncated to `u32`).
/// Clients are expected only to echo this value back, never interpret it.
pub fn numeric_code(source: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in source.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// C8: maps an [`ActivationOutcome`] to the exact response shape `spec.md`
/// §4.8 specifies.
pub fn translate_outcome(outcome: ActivationOutcome) -> Response {
    match outcome {
        ActivationOutcome::Success(record) => (StatusCode::OK, Json(record)).into_response(),
        ActivationOutcome::Pending(activation_id) => {
            let code = numeric_code(&activation_id);
            (StatusCode::ACCEPTED, Json(json!({ "code": code }))).into_response()
        }
        ActivationOutcome::Failure(cause) => {
            let code = numeric_code(cause.code_source());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": cause.message, "code": code }))).into_response()
        }
    }
}

/// Maps a [`ResolveError`] to its response shape — both variants are 405
/// with an empty body, `spec.md` §4.5's state machine.
pub fn translate_resolve_error(error: ResolveError) -> Response {
    match error {
        ResolveError::NotMeta | ResolveError::VerbNotMapped => AppError::empty(StatusCode::METHOD_NOT_ALLOWED).into_response(),
        ResolveError::InternalError(msg) => internal_error(msg),
    }
}

/// Maps a [`MergeError`] to its response shape.
pub fn translate_merge_error(error: MergeError) -> Response {
    match error {
        MergeError::UnsupportedMedia => {
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, "request body must be a JSON object (application/json)").into_response()
        }
        MergeError::ActionMissing(id) => internal_error(format!("mapped action does not exist: {id}")),
        MergeError::InternalError(msg) => internal_error(msg),
    }
}

fn internal_error(msg: String) -> Response {
    AppError::custom(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })).into_response()
}
