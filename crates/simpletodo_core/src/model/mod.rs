//! Domain model for the to-do list and the edit hand-off values.
//!
//! # Responsibility
//! - Define the ordered item sequence shared by store, presenter and service.
//! - Define the transient request/result pair exchanged with an edit surface.
//!
//! # Invariants
//! - An item has no identity beyond its zero-based position.
//! - List order is display order and on-disk line order.

pub mod edit;
pub mod todo_list;
