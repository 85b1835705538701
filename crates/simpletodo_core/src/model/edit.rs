//! Edit hand-off values.
//!
//! `EditRequest` travels from the list to an edit surface and `EditResult`
//! travels back. Both serialize with the boundary field names used by the
//! mobile shell (`todo_item_text`, `todo_item_position`).

use serde::{Deserialize, Serialize};

/// Boundary name of the item text field.
pub const KEY_ITEM_TEXT: &str = "todo_item_text";
/// Boundary name of the item position field.
pub const KEY_ITEM_POSITION: &str = "todo_item_position";

/// Current text and position handed to the edit surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    #[serde(rename = "todo_item_text")]
    pub text: String,
    #[serde(rename = "todo_item_position")]
    pub position: usize,
}

/// Edited text plus the original position, returned on confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditResult {
    #[serde(rename = "todo_item_text")]
    pub text: String,
    #[serde(rename = "todo_item_position")]
    pub position: usize,
}

impl EditResult {
    /// Builds a result from optional boundary fields.
    ///
    /// Returns `None` when either field is missing; callers treat that as a
    /// no-op completion.
    pub fn from_parts(text: Option<String>, position: Option<usize>) -> Option<Self> {
        Some(Self {
            text: text?,
            position: position?,
        })
    }
}

/// How an edit interaction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Confirmed(EditResult),
    Cancelled,
}
