use std::sync::Arc;

use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{body::Bytes, Json, Router};
use meta_security::CallerIdentity;
use meta_store::{AuthStore, EntityStore, StoreError};
use serde_json::{json, Value};

use crate::trigger_activation_writer::TriggerActivationWriter;

/// Shared dependencies for the trigger-fire HTTP endpoint — the one piece of
/// `spec.md`'s trigger fan-out subsystem that needs an HTTP entry point of
/// its own, the way C5 is C3/C4/C1's entry point.
#[derive(Clone)]
pub struct TriggerFanoutState {
    pub entity_store: Arc<dyn EntityStore>,
    pub auth_store: Arc<dyn AuthStore>,
    pub writer: TriggerActivationWriter,
}

impl FromRef<TriggerFanoutState> for Arc<dyn AuthStore> {
    fn from_ref(state: &TriggerFanoutState) -> Self {
        state.auth_store.clone()
    }
}

/// `POST /<namespace>/<name>` fires a trigger: loads it, hands it to
/// [`TriggerActivationWriter::fire`], and answers `202 Accepted` with the
/// activation id immediately (`spec.md` §4.7).
pub fn trigger_router(state: TriggerFanoutState) -> Router {
    Router::new().route("/{namespace}/{name}", post(fire_trigger)).with_state(state)
}

async fn fire_trigger(
    State(state): State<TriggerFanoutState>,
    Path((namespace, name)): Path<(String, String)>,
    CallerIdentity(identity): CallerIdentity,
    body: Bytes,
) -> Response {
    let trigger = match state.entity_store.get_trigger(&namespace, &name).await {
        Ok(trigger) => trigger,
        Err(StoreError::NoDocument(_)) => return StatusCode::NOT_FOUND.into_response(),
        Err(StoreError::BackendError(msg)) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": msg }))).into_response()
        }
    };

    let payload = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) if value.is_object() => Some(value),
            _ => {
                return (StatusCode::UNSUPPORTED_MEDIA_TYPE, "request body must be a JSON object (application/json)")
                    .into_response()
            }
        }
    };

    let activation_id = state.writer.fire(trigger, payload, identity);
    (StatusCode::ACCEPTED, Json(json!({ "activationId": activation_id }))).into_response()
}
