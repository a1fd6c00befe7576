use std::sync::Arc;

use meta_core::Package;
use meta_store::{EntityStore, StoreError};
use tracing::warn;

/// A package + verb pair resolved to a concrete system-namespace action.
#[derive(Debug, Clone)]
pub struct ResolvedAction {
    pub package: Package,
    pub action_name: String,
}

/// Failure modes of [`PackageResolver::resolve`] — `spec.md` §4.3.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The package does not exist, or exists but lacks `meta=true`.
    NotMeta,
    /// The package is meta-routable but has no annotation for this verb.
    VerbNotMapped,
    /// The entity store itself failed (not a missing-document outcome).
    InternalError(String),
}

/// C3: given a meta-package name and an HTTP verb, loads the package
/// document and validates it is meta-routable for that verb.
pub struct PackageResolver {
    entity_store: Arc<dyn EntityStore>,
    system_namespace: String,
}

impl PackageResolver {
    pub fn new(entity_store: Arc<dyn EntityStore>, system_namespace: impl Into<String>) -> Self {
        Self {
            entity_store,
            system_namespace: system_namespace.into(),
        }
    }

    /// `verb` is matched case-insensitively against the package's per-verb
    /// annotations (`spec.md` §4.3 step 3 — the caller need not lower-case
    /// it first).
    pub async fn resolve(&self, meta_package_name: &str, verb: &str) -> Result<ResolvedAction, ResolveError> {
        let package = match self.entity_store.get_package(&self.system_namespace, meta_package_name).await {
            Ok(package) => package,
            Err(StoreError::NoDocument(_)) => return Err(ResolveError::NotMeta),
            Err(StoreError::BackendError(msg)) => return Err(ResolveError::InternalError(msg)),
        };

        if !package.annotations.is_truthy_bool("meta") {
            return Err(ResolveError::NotMeta);
        }

        let verb = verb.to_ascii_lowercase();
        let action_name = match package.action_for_verb(&verb) {
            Some(name) => name.to_string(),
            None => return Err(ResolveError::VerbNotMapped),
        };

        if package.publish {
            warn!(
                package = %package.fully_qualified_name(),
                "meta package {} is public",
                package.name,
            );
        }

        Ok(ResolvedAction { package, action_name })
    }
}
