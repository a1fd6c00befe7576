use serde::{Deserialize, Serialize};

/// Credentials used to authenticate an invocation against the action backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthKey {
    pub uuid: String,
    pub key: String,
}

/// An authenticated principal, resolved by the layer in front of the meta
/// router (JWT/Basic decoding and entitlement checks are out of scope for
/// this system — see `spec.md` §1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject: String,
    pub namespace: String,
    pub authkey: AuthKey,
}

impl Identity {
    pub fn new(subject: impl Into<String>, namespace: impl Into<String>, authkey: AuthKey) -> Self {
        Self {
            subject: subject.into(),
            namespace: namespace.into(),
            authkey,
        }
    }
}
