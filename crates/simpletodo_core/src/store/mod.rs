//! Persistence layer for the to-do list.
//!
//! # Responsibility
//! - Define the load/save contract the service depends on.
//! - Keep file format details (one item per line) inside the store.
//!
//! # Invariants
//! - `load` never fails: unreadable storage degrades to an empty list.
//! - `save` rewrites the whole sequence; there is no incremental write.

pub mod list_store;
