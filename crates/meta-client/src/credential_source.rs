use std::sync::Arc;

use meta_core::AuthKey;
use meta_store::{AuthStore, StoreError};
use tokio::sync::OnceCell;

/// Resolves the privileged system identity's credentials once, lazily, and
/// caches them for the process lifetime (`spec.md` §4.2).
///
/// Backed by `tokio::sync::OnceCell`: if the first lookup fails, the cell
/// stays uninitialized and every subsequent call retries the lookup against
/// the auth store, rather than caching the failure.
pub struct SystemCredentialSource {
    system_subject: String,
    auth_store: Arc<dyn AuthStore>,
    cached: OnceCell<AuthKey>,
}

impl SystemCredentialSource {
    pub fn new(system_subject: impl Into<String>, auth_store: Arc<dyn AuthStore>) -> Self {
        Self {
            system_subject: system_subject.into(),
            auth_store,
            cached: OnceCell::new(),
        }
    }

    pub async fn credentials(&self) -> Result<&AuthKey, StoreError> {
        self.cached
            .get_or_try_init(|| async { self.auth_store.get_authkey(&self.system_subject).await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meta_store::InMemoryStore;

    #[tokio::test]
    async fn resolves_and_caches_on_success() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_authkey("whisk.system", AuthKey { uuid: "sys-uuid".into(), key: "sys-key".into() })
            .await;
        let source = SystemCredentialSource::new("whisk.system", store.clone() as Arc<dyn AuthStore>);

        let first = source.credentials().await.unwrap().clone();
        assert_eq!(first.uuid, "sys-uuid");

        // Even if the backing store changes, the cached value is returned.
        store.put_authkey("whisk.system", AuthKey { uuid: "rotated".into(), key: "rotated".into() }).await;
        let second = source.credentials().await.unwrap().clone();
        assert_eq!(second.uuid, "sys-uuid");
    }

    #[tokio::test]
    async fn retries_after_a_failed_lookup() {
        let store = Arc::new(InMemoryStore::new());
        let source = SystemCredentialSource::new("whisk.system", store.clone() as Arc<dyn AuthStore>);

        assert!(source.credentials().await.is_err());

        store
            .put_authkey("whisk.system", AuthKey { uuid: "sys-uuid".into(), key: "sys-key".into() })
            .await;
        let resolved = source.credentials().await.unwrap();
        assert_eq!(resolved.uuid, "sys-uuid");
    }
}
