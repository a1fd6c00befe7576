use crate::{ActivationStore, AuthStore, EntityStore, StoreError};
use meta_core::{Action, AuthKey, Identity, Package, Trigger, TriggerActivation};
use std::collections::HashMap;
use tokio::sync::RwLock;

fn doc_id(namespace: &str, package: Option<&str>, name: &str) -> String {
    match package {
        Some(pkg) => format!("{namespace}/{pkg}/{name}"),
        None => format!("{namespace}/{name}"),
    }
}

/// In-memory `EntityStore`/`ActivationStore`/`AuthStore` used by the test
/// suites in `meta-router` and `meta-fanout`, and as a development fallback
/// for `meta-server` when no external store is configured. Never intended
/// for production use — the real stores are external systems out of scope
/// for this codebase (`spec.md` §1).
#[derive(Default)]
pub struct InMemoryStore {
    packages: RwLock<HashMap<String, Package>>,
    actions: RwLock<HashMap<String, Action>>,
    triggers: RwLock<HashMap<String, Trigger>>,
    authkeys: RwLock<HashMap<String, AuthKey>>,
    /// Keyed by `uuid` — the credential presented over Basic auth.
    identities: RwLock<HashMap<String, (AuthKey, Identity)>>,
    activations: RwLock<Vec<TriggerActivation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_package(&self, pkg: Package) {
        let id = doc_id(&pkg.namespace, None, &pkg.name);
        self.packages.write().await.insert(id, pkg);
    }

    pub async fn put_action(&self, action: Action, package: Option<&str>) {
        let id = doc_id(&action.namespace, package, &action.name);
        self.actions.write().await.insert(id, action);
    }

    pub async fn put_trigger(&self, trigger: Trigger) {
        let id = doc_id(&trigger.namespace, None, &trigger.name);
        self.triggers.write().await.insert(id, trigger);
    }

    pub async fn put_authkey(&self, subject: impl Into<String>, key: AuthKey) {
        self.authkeys.write().await.insert(subject.into(), key);
    }

    /// Register a caller identity reachable by Basic auth `{uuid, key}`.
    pub async fn put_identity(&self, key: AuthKey, identity: Identity) {
        self.identities.write().await.insert(key.uuid.clone(), (key, identity));
    }

    /// All persisted trigger activations, in write order — used by tests to
    /// assert on the record `TriggerActivationWriter` produced.
    pub async fn trigger_activations(&self) -> Vec<TriggerActivation> {
        self.activations.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EntityStore for InMemoryStore {
    async fn get_package(&self, namespace: &str, name: &str) -> Result<Package, StoreError> {
        let id = doc_id(namespace, None, name);
        self.packages
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NoDocument(id))
    }

    async fn get_action(
        &self,
        namespace: &str,
        package: Option<&str>,
        name: &str,
    ) -> Result<Action, StoreError> {
        let id = doc_id(namespace, package, name);
        self.actions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NoDocument(id))
    }

    async fn get_trigger(&self, namespace: &str, name: &str) -> Result<Trigger, StoreError> {
        let id = doc_id(namespace, None, name);
        self.triggers
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NoDocument(id))
    }
}

#[async_trait::async_trait]
impl AuthStore for InMemoryStore {
    async fn get_authkey(&self, subject: &str) -> Result<AuthKey, StoreError> {
        self.authkeys
            .read()
            .await
            .get(subject)
            .cloned()
            .ok_or_else(|| StoreError::NoDocument(subject.to_string()))
    }

    async fn resolve_identity(&self, uuid: &str, key: &str) -> Result<Identity, StoreError> {
        let identities = self.identities.read().await;
        match identities.get(uuid) {
            Some((stored_key, identity)) if stored_key.key == key => Ok(identity.clone()),
            _ => Err(StoreError::NoDocument(uuid.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl ActivationStore for InMemoryStore {
    async fn put_trigger_activation(&self, activation: TriggerActivation) -> Result<(), StoreError> {
        self.activations.write().await.push(activation);
        Ok(())
    }
}
