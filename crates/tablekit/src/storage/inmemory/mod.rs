//! In-memory storage backend.
//!
//! Keeps tables in a `BTreeMap` behind `Arc<RwLock<_>>`. Nothing is persisted.
//! Used by the test suite and by `--backend memory` for offline runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use tablekit::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! store.create_table("golang-example", "dummy").await;
//! ```

mod store;

pub use store::InMemoryStore;
