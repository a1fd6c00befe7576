//! Opaque document-store abstractions: entity store, auth store, and
//! activation store. The concrete backends (Postgres, CouchDB, whatever)
//! are out of scope for this system (`spec.md` §1) — only the `get`/`put`
//! contracts and their `NoDocument` failure mode are modeled here, plus an
//! in-memory double used across the workspace's test suites.

mod activation_store;
mod auth_store;
mod entity_store;
mod error;
mod in_memory;

pub use activation_store::ActivationStore;
pub use auth_store::AuthStore;
pub use entity_store::EntityStore;
pub use error::StoreError;
pub use in_memory::InMemoryStore;
