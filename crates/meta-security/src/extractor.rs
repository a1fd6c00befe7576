use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::{Parts, AUTHORIZATION};
use base64::Engine;
use meta_core::Identity;
use meta_store::AuthStore;
use tracing::warn;

use crate::error::SecurityError;

/// Decode a `Basic <base64(uuid:key)>` header value into `(uuid, key)`.
///
/// Credential *decoding* of a correctly-formed Basic header is the one piece
/// of "authentication decoding" this codebase does itself — resolving the
/// decoded `uuid:key` pair to an entitlement-checked `Identity` is delegated
/// to the auth store, which is the boundary `spec.md` §1 puts out of scope.
fn decode_basic_auth(header_value: &str) -> Result<(String, String), SecurityError> {
    let mut parts = header_value.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let encoded = parts.next().ok_or(SecurityError::InvalidAuthScheme)?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return Err(SecurityError::InvalidAuthScheme);
    }
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| SecurityError::InvalidAuthScheme)?;
    let decoded = String::from_utf8(decoded).map_err(|_| SecurityError::InvalidAuthScheme)?;
    let mut split = decoded.splitn(2, ':');
    let uuid = split.next().ok_or(SecurityError::InvalidAuthScheme)?;
    let key = split.next().ok_or(SecurityError::InvalidAuthScheme)?;
    Ok((uuid.to_string(), key.to_string()))
}

/// Axum extractor that resolves the caller's `Identity` from an HTTP Basic
/// `Authorization` header, via the application's `AuthStore`.
///
/// `S` must expose `Arc<dyn AuthStore>` through [`FromRef`], following the
/// same state-extension convention the reference framework uses for its own
/// identity extractors.
pub struct CallerIdentity(pub Identity);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
    Arc<dyn AuthStore>: FromRef<S>,
{
    type Rejection = SecurityError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                warn!(uri = %parts.uri, "missing Authorization header on meta request");
                SecurityError::MissingAuthHeader
            })?
            .to_str()
            .map_err(|_| SecurityError::InvalidAuthScheme)?;

        let (uuid, key) = decode_basic_auth(header)?;
        let auth_store = Arc::<dyn AuthStore>::from_ref(state);
        let identity = auth_store.resolve_identity(&uuid, &key).await.map_err(|err| {
            warn!(uri = %parts.uri, error = %err, "credential resolution failed");
            SecurityError::InvalidCredentials
        })?;

        Ok(CallerIdentity(identity))
    }
}
