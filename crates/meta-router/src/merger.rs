use std::sync::Arc;

use meta_core::Parameters;
use meta_store::{EntityStore, StoreError};
use serde_json::Value;

use crate::resolver::ResolvedAction;

/// Failure modes of [`ParameterMerger::merge`] — `spec.md` §4.4 / §4.7.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeError {
    /// The request carried a body that parses to something other than a
    /// JSON object (or does not parse as JSON at all).
    UnsupportedMedia,
    /// `resolved.action_name` does not exist in the action store.
    ActionMissing(String),
    /// The action store itself failed.
    InternalError(String),
}

/// The inputs a request contributes to the merge, beyond what C3 already
/// resolved.
pub struct RequestParameters<'a> {
    pub verb: &'a str,
    /// Raw, not-yet-percent-decoded residual path (`""`, `"/"`, `"/a/b"`, ...).
    pub residual_path: &'a str,
    pub caller_namespace: &'a str,
    pub query_pairs: &'a [(String, String)],
    /// Raw request body bytes, empty slice if none were sent.
    pub raw_body: &'a [u8],
}

/// C4: folds package parameters, action defaults, query parameters, the
/// request body and the system-injected `__ow_meta_*` fields into the single
/// JSON object posted to the backend action.
pub struct ParameterMerger {
    entity_store: Arc<dyn EntityStore>,
    system_namespace: String,
}

impl ParameterMerger {
    pub fn new(entity_store: Arc<dyn EntityStore>, system_namespace: impl Into<String>) -> Self {
        Self {
            entity_store,
            system_namespace: system_namespace.into(),
        }
    }

    pub async fn merge(&self, resolved: &ResolvedAction, request: &RequestParameters<'_>) -> Result<Value, MergeError> {
        let action = self
            .entity_store
            .get_action(&self.system_namespace, Some(&resolved.package.name), &resolved.action_name)
            .await
            .map_err(|err| match err {
                StoreError::NoDocument(id) => MergeError::ActionMissing(id),
                StoreError::BackendError(msg) => MergeError::InternalError(msg),
            })?;

        let body = parse_body(request.raw_body)?;

        let merged = resolved
            .package
            .parameters
            .clone()
            .merged_with(action.parameters)
            .merged_with(flatten_query(request.query_pairs))
            .merged_with(body);

        let mut merged = merged.to_json_object();
        let object = merged.as_object_mut().expect("Parameters::to_json_object always returns an object");
        object.insert("__ow_meta_verb".to_string(), Value::String(request.verb.to_ascii_lowercase()));
        object.insert("__ow_meta_path".to_string(), Value::String(request.residual_path.to_string()));
        object.insert("__ow_meta_namespace".to_string(), Value::String(request.caller_namespace.to_string()));

        Ok(merged)
    }
}

/// Query keys repeated in the string resolve to their last occurrence
/// (`SPEC_FULL.md` §3 — last-one-wins, consistent with the right-biased
/// merge philosophy elsewhere).
fn flatten_query(pairs: &[(String, String)]) -> Parameters {
    let mut params = Parameters::new();
    for (key, value) in pairs {
        params.set(key.clone(), Value::String(value.clone()));
    }
    params
}

/// Absent or empty body → empty object. A non-empty body that fails to
/// parse as JSON, or parses to a non-object, is `UnsupportedMedia` (`spec.md`
/// §4.4: "if the parsed value is not an object → 415").
fn parse_body(raw_body: &[u8]) -> Result<Parameters, MergeError> {
    if raw_body.is_empty() {
        return Ok(Parameters::new());
    }
    let value: Value = serde_json::from_slice(raw_body).map_err(|_| MergeError::UnsupportedMedia)?;
    Parameters::from_json_object(&value).ok_or(MergeError::UnsupportedMedia)
}
