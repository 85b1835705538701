//! Use-case layer.
//!
//! # Responsibility
//! - Own the session state (list, presenter, edit flow, input buffer).
//! - Run the add / edit / remove handlers against a `ListStore`.
//!
//! # Invariants
//! - Every mutation is followed by exactly one presenter notification and
//!   one full save.

pub mod todo_service;
