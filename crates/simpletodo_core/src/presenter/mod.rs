//! Row binding between the to-do list and a rendering layer.
//!
//! # Responsibility
//! - Mirror the list as rendered rows.
//! - Translate row gestures into listener calls.
//! - Queue per-index change notifications for the rendering layer.
//!
//! # Invariants
//! - After each `notify_*` call the rendered rows equal the list items.
//! - Each `notify_*` call queues exactly one `RowChange`.

pub mod list_presenter;
