//! Blocking action-invocation HTTP client (C1) and cached system
//! credentials (C2).

mod activation_client;
mod credential_source;

pub use activation_client::ActivationClient;
pub use credential_source::SystemCredentialSource;
