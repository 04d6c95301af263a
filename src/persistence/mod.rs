//! Durable state for the herald.
//!
//! The whole [`Ledger`](crate::state::Ledger) is one JSON file, rewritten
//! atomically after every poll that touched it (write-through, no batching).
//! A single process owns the file; the observability server only reads it.
//!
//! # Recovery
//!
//! On startup the file is loaded if present. A missing file is an empty
//! ledger; an unparseable one is moved aside and also yields an empty ledger.
//! Either way the first poll of each collection is a quiet bootstrap.

pub mod snapshot;
pub mod store;

pub use snapshot::{
    PersistedState, SnapshotError, load_snapshot, save_snapshot_atomic, try_load_snapshot,
};
pub use store::StateStore;
