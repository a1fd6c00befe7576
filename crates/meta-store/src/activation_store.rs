use crate::StoreError;
use meta_core::TriggerActivation;

/// Write-only persistence for trigger activation records.
///
/// `spec.md` §6: `put(document) -> Future<Unit>`; failure is logged by the
/// caller (`TriggerActivationWriter`), never surfaced or retried.
#[async_trait::async_trait]
pub trait ActivationStore: Send + Sync {
    async fn put_trigger_activation(&self, activation: TriggerActivation) -> Result<(), StoreError>;
}
