use std::sync::Arc;

use axum::extract::{FromRef, OriginalUri, RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{body::Bytes, http::Method, Router};
use meta_client::{ActivationClient, SystemCredentialSource};
use meta_security::CallerIdentity;
use meta_store::{AuthStore, EntityStore};

use crate::error_translator::{translate_merge_error, translate_outcome, translate_resolve_error};
use crate::merger::{MergeError, ParameterMerger, RequestParameters};
use crate::resolver::PackageResolver;

/// Shared dependencies for the meta-routing handlers — an explicit struct
/// passed at construction time rather than an ambient service locator
/// (`spec.md` §9 design note on trait mix-ins/shared services).
#[derive(Clone)]
pub struct MetaRouterState {
    pub entity_store: Arc<dyn EntityStore>,
    pub auth_store: Arc<dyn AuthStore>,
    pub activation_client: ActivationClient,
    pub credential_source: Arc<SystemCredentialSource>,
    pub system_namespace: String,
    /// The full path this router is mounted at (e.g. `/api/v1/meta`), with
    /// no trailing slash — used to recover the raw, not-yet-percent-decoded
    /// residual path from [`OriginalUri`] regardless of how deeply this
    /// router is nested.
    pub mount_path: String,
}

impl FromRef<MetaRouterState> for Arc<dyn AuthStore> {
    fn from_ref(state: &MetaRouterState) -> Self {
        state.auth_store.clone()
    }
}

/// Builds the meta-routing `Router` (C5). Matches `GET`/`POST`/`DELETE` at
/// `<mount>/<metaPackage>[/<residual>]`; axum answers any other verb at a
/// matched path with 405 automatically, and a bare `<mount>` with no package
/// segment falls through to axum's default 404 — both before any resolver or
/// store access happens.
pub fn meta_router(state: MetaRouterState) -> Router {
    Router::new()
        .route("/{meta_package}", get(meta_handler).post(meta_handler).delete(meta_handler))
        .route("/{meta_package}/{*residual}", get(meta_handler).post(meta_handler).delete(meta_handler))
        .with_state(state)
}

async fn meta_handler(
    State(state): State<MetaRouterState>,
    method: Method,
    OriginalUri(original_uri): OriginalUri,
    RawQuery(raw_query): RawQuery,
    CallerIdentity(identity): CallerIdentity,
    body: Bytes,
) -> Response {
    let tail = original_uri
        .path()
        .strip_prefix(state.mount_path.as_str())
        .unwrap_or("")
        .trim_start_matches('/');

    if tail.is_empty() {
        return (axum::http::StatusCode::NOT_FOUND).into_response();
    }

    let (meta_package, residual_path) = match tail.split_once('/') {
        Some((pkg, rest)) => (pkg, format!("/{rest}")),
        None => (tail, String::new()),
    };

    let resolver = PackageResolver::new(state.entity_store.clone(), state.system_namespace.clone());
    let resolved = match resolver.resolve(meta_package, method.as_str()).await {
        Ok(resolved) => resolved,
        Err(err) => return translate_resolve_error(err),
    };

    let merger = ParameterMerger::new(state.entity_store.clone(), state.system_namespace.clone());
    let query_pairs = parse_query(raw_query.as_deref().unwrap_or(""));
    let request = RequestParameters {
        verb: method.as_str(),
        residual_path: &residual_path,
        caller_namespace: &identity.namespace,
        query_pairs: &query_pairs,
        raw_body: &body,
    };
    let payload = match merger.merge(&resolved, &request).await {
        Ok(payload) => payload,
        Err(err) => return translate_merge_error(err),
    };

    let credentials = match state.credential_source.credentials().await {
        Ok(credentials) => credentials.clone(),
        Err(err) => {
            return translate_merge_error(MergeError::InternalError(format!("system credentials unavailable: {err}")))
        }
    };

    let outcome = state
        .activation_client
        .invoke(&credentials, &state.system_namespace, Some(&resolved.package.name), &resolved.action_name, payload)
        .await;

    translate_outcome(outcome)
}

/// Parses `k=v&k=v2` query strings, percent-decoding each component and
/// letting repeated keys resolve to their last occurrence (`SPEC_FULL.md`
/// §3 — no external form-encoding crate needed for this small a grammar).
fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((k, v)) => (percent_decode(k), percent_decode(v)),
            None => (percent_decode(segment), String::new()),
        })
        .collect()
}

fn percent_decode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut bytes = s.bytes().peekable();
    let mut buf = Vec::new();
    while let Some(b) = bytes.next() {
        match b {
            b'+' => buf.push(b' '),
            b'%' => {
                let hi = bytes.next();
                let lo = bytes.next();
                match (hi.and_then(hex_val), lo.and_then(hex_val)) {
                    (Some(hi), Some(lo)) => buf.push(hi * 16 + lo),
                    _ => buf.push(b'%'),
                }
            }
            other => buf.push(other),
        }
    }
    out.push_str(&String::from_utf8_lossy(&buf));
    out
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_occurrence_of_a_repeated_key_wins() {
        let pairs = parse_query("a=1&a=2&b=3");
        assert_eq!(pairs, vec![("a".to_string(), "1".to_string()), ("a".to_string(), "2".to_string()), ("b".to_string(), "3".to_string())]);
    }

    #[test]
    fn percent_decode_handles_space_and_plus() {
        assert_eq!(percent_decode("foo%20bar"), "foo bar");
        assert_eq!(percent_decode("foo+bar"), "foo bar");
    }

    #[test]
    fn empty_query_string_yields_no_pairs() {
        assert!(parse_query("").is_empty());
    }
}
