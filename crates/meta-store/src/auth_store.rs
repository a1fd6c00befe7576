use crate::StoreError;
use meta_core::{AuthKey, Identity};

/// Resolves subjects and raw Basic-auth credentials against the auth
/// backend. Backs both `SystemCredentialSource` (C2) — looking up the
/// privileged system identity's own credentials by subject — and the
/// caller-identity extractor in `meta-security` — validating the caller's
/// `uuid:key` Basic credentials and resolving them to an `Identity`.
#[async_trait::async_trait]
pub trait AuthStore: Send + Sync {
    /// Look up the `{uuid, key}` credentials for a known subject.
    async fn get_authkey(&self, subject: &str) -> Result<AuthKey, StoreError>;

    /// Validate a presented `uuid`/`key` pair and resolve the full `Identity`
    /// (subject + namespace) it belongs to. `NoDocument` signals an unknown
    /// or invalid credential pair.
    async fn resolve_identity(&self, uuid: &str, key: &str) -> Result<Identity, StoreError>;
}
