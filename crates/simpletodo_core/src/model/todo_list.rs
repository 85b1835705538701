//! Ordered to-do item sequence.
//!
//! # Responsibility
//! - Hold the in-memory items for one application session.
//! - Provide position-checked mutation helpers.
//!
//! # Invariants
//! - Positions are zero-based and dense (`0..len`).
//! - No uniqueness rule: duplicates and empty strings are valid items.
//! - Mutation helpers never panic on a bad position; they return
//!   `ListError::OutOfRange`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ListResult<T> = Result<T, ListError>;

/// Position-related failures for list mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    OutOfRange { position: usize, len: usize },
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { position, len } => {
                write!(f, "position {position} is out of range for list of length {len}")
            }
        }
    }
}

impl Error for ListError {}

/// In-memory ordered sequence of to-do items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<String>,
}

impl TodoList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already ordered sequence, e.g. one freshly loaded from disk.
    pub fn from_items(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.items.get(position).map(String::as_str)
    }

    /// Appends an item and returns the position it landed at.
    pub fn push(&mut self, item: impl Into<String>) -> usize {
        self.items.push(item.into());
        self.items.len() - 1
    }

    /// Replaces the item at `position` in place and returns the old text.
    pub fn replace(&mut self, position: usize, item: impl Into<String>) -> ListResult<String> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(position)
            .ok_or(ListError::OutOfRange { position, len })?;
        Ok(std::mem::replace(slot, item.into()))
    }

    /// Removes the item at `position`; later items shift down by one.
    pub fn remove(&mut self, position: usize) -> ListResult<String> {
        self.check(position)?;
        Ok(self.items.remove(position))
    }

    fn check(&self, position: usize) -> ListResult<()> {
        if position < self.items.len() {
            Ok(())
        } else {
            Err(ListError::OutOfRange {
                position,
                len: self.items.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListError, TodoList};

    fn list(items: &[&str]) -> TodoList {
        TodoList::from_items(items.iter().map(|item| item.to_string()).collect())
    }

    #[test]
    fn push_returns_last_position() {
        let mut todos = list(&["a", "b"]);
        assert_eq!(todos.push("c"), 2);
        assert_eq!(todos.get(2), Some("c"));
    }

    #[test]
    fn remove_shifts_following_items() {
        let mut todos = list(&["a", "b", "c"]);
        assert_eq!(todos.remove(0).unwrap(), "a");
        assert_eq!(todos.items(), ["b", "c"]);
    }

    #[test]
    fn replace_keeps_other_positions() {
        let mut todos = list(&["a", "b", "c"]);
        assert_eq!(todos.replace(1, "B").unwrap(), "b");
        assert_eq!(todos.items(), ["a", "B", "c"]);
    }

    #[test]
    fn out_of_range_is_reported_not_panicking() {
        let mut todos = list(&["a"]);
        assert_eq!(
            todos.remove(3),
            Err(ListError::OutOfRange {
                position: 3,
                len: 1
            })
        );
        assert!(todos.replace(1, "x").is_err());
        assert_eq!(todos.len(), 1);
    }
}
