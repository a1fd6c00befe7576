use crate::StoreError;
use meta_core::{Action, Package, Trigger};

/// Read-only access to packages, actions and triggers.
///
/// This is the `get(documentId) -> Future<Entity>` interface from `spec.md`
/// §6, split into per-entity-type methods for a typed call site — the
/// underlying store is still a single opaque document store, `NoDocument`
/// is still the only distinguished failure mode.
#[async_trait::async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_package(&self, namespace: &str, name: &str) -> Result<Package, StoreError>;

    async fn get_action(
        &self,
        namespace: &str,
        package: Option<&str>,
        name: &str,
    ) -> Result<Action, StoreError>;

    async fn get_trigger(&self, namespace: &str, name: &str) -> Result<Trigger, StoreError>;
}
