//! Modal edit interaction.
//!
//! # Responsibility
//! - Track the single pending edit between tap and completion.
//! - Define the synchronous surface contract used to collect edited text.
//!
//! # Invariants
//! - At most one edit is pending at a time.
//! - Invalid transitions are reported, never applied.

pub mod edit_flow;
