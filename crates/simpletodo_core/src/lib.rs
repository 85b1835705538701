//! Core logic for SimpleTodo.
//! This crate owns the list, its persistence and every user-facing handler;
//! front ends only forward gestures and render rows.

pub mod config;
pub mod edit;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigOverrides};
pub use edit::edit_flow::{EditFlow, EditFlowError, EditState, EditSurface};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::edit::{EditOutcome, EditRequest, EditResult, KEY_ITEM_POSITION, KEY_ITEM_TEXT};
pub use model::todo_list::{ListError, ListResult, TodoList};
pub use presenter::list_presenter::{ItemGestureListener, ListPresenter, RowChange, RowGesture};
pub use service::todo_service::{Acknowledgment, TodoAction, TodoService};
pub use store::list_store::{
    FileListStore, ListStore, MemoryListStore, StoreError, StoreResult, DATA_FILE_NAME,
    LINE_ENDING,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
