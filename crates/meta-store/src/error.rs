/// Errors surfaced by the opaque document stores this system depends on
/// (entity store, auth store, activation store). The concrete backends are
/// out of scope (`spec.md` §1) — this is the interface they must satisfy.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// The requested document does not exist.
    NoDocument(String),
    /// Any other failure talking to the backend (connection, serialization, ...).
    BackendError(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NoDocument(id) => write!(f, "no document: {id}"),
            StoreError::BackendError(msg) => write!(f, "store backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
