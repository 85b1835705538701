//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the to-do session to Dart via FRB as plain sync functions.
//! - Translate boundary shapes (optional fields, `u32` positions) into core
//!   calls.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One session per process; `todo_open` replaces it.

use log::warn;
use simpletodo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Acknowledgment, EditResult, FileListStore, RowChange, TodoService,
};
use std::sync::{Mutex, MutexGuard};

type Session = TodoService<FileListStore>;

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result of a list mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// Whether the mutation was applied in memory.
    pub ok: bool,
    /// Whether the list file was written afterwards.
    pub persisted: bool,
    /// Toast text for the UI.
    pub message: String,
}

impl TodoActionResponse {
    fn applied(ack: Acknowledgment) -> Self {
        Self {
            ok: true,
            persisted: ack.persisted,
            message: ack.to_string(),
        }
    }

    fn ignored(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Edit surface launch payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoEditRequest {
    pub text: String,
    pub position: u32,
}

/// Row notification kind mirrored for Dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoRowChangeKind {
    Inserted,
    Removed,
    Changed,
}

/// Row notification for the list widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoRowChange {
    pub kind: TodoRowChangeKind,
    pub position: u32,
}

/// Opens the session over `data_dir/data.txt` and returns the loaded items.
///
/// # FFI contract
/// - Sync call; reads one small file.
/// - Missing or unreadable files open as an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_open(data_dir: String) -> Vec<String> {
    let service = TodoService::open(FileListStore::in_dir(data_dir.trim()));
    let items = service.items().to_vec();
    *lock_session() = Some(service);
    items
}

/// Returns rendered rows; empty when no session is open.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_items() -> Vec<String> {
    lock_session()
        .as_ref()
        .map(|service| service.rows().to_vec())
        .unwrap_or_default()
}

/// Mirrors the text field into the session input buffer.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_set_input(text: String) {
    if let Some(service) = lock_session().as_mut() {
        service.set_input(text);
    }
}

/// Adds the current input buffer as a new item.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add() -> TodoActionResponse {
    with_session(|service| Some(service.add()))
}

/// Long-press handler: removes the item at `position`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_remove(position: u32) -> TodoActionResponse {
    with_session(|service| service.long_press(position as usize))
}

/// Tap handler: opens an edit and returns the payload for the edit screen.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_begin_edit(position: u32) -> Option<TodoEditRequest> {
    let mut session = lock_session();
    let request = session.as_mut()?.tap(position as usize)?;
    Some(TodoEditRequest {
        text: request.text,
        position: u32::try_from(request.position).ok()?,
    })
}

/// Edit screen result handler.
///
/// Missing fields or `confirmed == false` drop the pending edit without
/// changing the list.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_complete_edit(
    text: Option<String>,
    position: Option<u32>,
    confirmed: bool,
) -> TodoActionResponse {
    let result = if confirmed {
        EditResult::from_parts(text, position.map(|value| value as usize))
    } else {
        None
    };
    with_session(|service| service.complete_edit(result))
}

/// Drains row notifications raised since the last call.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_take_changes() -> Vec<TodoRowChange> {
    lock_session()
        .as_mut()
        .map(|service| {
            service
                .take_changes()
                .into_iter()
                .map(to_row_change)
                .collect()
        })
        .unwrap_or_default()
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    // Each handler mutates the list before notifying the presenter and
    // saving; a panic after that leaves the list itself intact.
    SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_session(f: impl FnOnce(&mut Session) -> Option<Acknowledgment>) -> TodoActionResponse {
    let mut session = lock_session();
    let Some(service) = session.as_mut() else {
        warn!("event=ffi_call module=ffi status=ignored reason=no_session");
        return TodoActionResponse::ignored("No list is open.");
    };
    match f(service) {
        Some(ack) => TodoActionResponse::applied(ack),
        None => TodoActionResponse::ignored("Nothing changed."),
    }
}

fn to_row_change(change: RowChange) -> TodoRowChange {
    let (kind, position) = match change {
        RowChange::Inserted(position) => (TodoRowChangeKind::Inserted, position),
        RowChange::Removed(position) => (TodoRowChangeKind::Removed, position),
        RowChange::Changed(position) => (TodoRowChangeKind::Changed, position),
    };
    TodoRowChange {
        kind,
        position: u32::try_from(position).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, todo_add, todo_begin_edit, todo_complete_edit,
        todo_items, todo_open, todo_remove, todo_set_input, todo_take_changes, TodoRowChange,
        TodoRowChangeKind,
    };
    use std::sync::Mutex;

    // The session is process-global; serialize tests that open it.
    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn add_edit_remove_round_trip_through_session() {
        let _guard = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_str().unwrap().to_string();

        assert!(todo_open(data_dir.clone()).is_empty());

        todo_set_input("Buy milk".to_string());
        let added = todo_add();
        assert!(added.ok && added.persisted, "{}", added.message);
        assert_eq!(added.message, "Item was added");
        todo_set_input("Walk dog".to_string());
        todo_add();

        let request = todo_begin_edit(0).expect("row 0 is editable");
        assert_eq!(request.text, "Buy milk");
        let updated = todo_complete_edit(Some("Buy oat milk".to_string()), Some(0), true);
        assert_eq!(updated.message, "Successfully updated item");

        let removed = todo_remove(1);
        assert_eq!(removed.message, "Successfully removed item");

        assert_eq!(todo_items(), vec!["Buy oat milk".to_string()]);
        assert_eq!(
            todo_take_changes(),
            vec![
                TodoRowChange {
                    kind: TodoRowChangeKind::Inserted,
                    position: 0
                },
                TodoRowChange {
                    kind: TodoRowChangeKind::Inserted,
                    position: 1
                },
                TodoRowChange {
                    kind: TodoRowChangeKind::Changed,
                    position: 0
                },
                TodoRowChange {
                    kind: TodoRowChangeKind::Removed,
                    position: 1
                },
            ]
        );
        assert_eq!(todo_open(data_dir), vec!["Buy oat milk".to_string()]);
    }

    #[test]
    fn incomplete_edit_result_is_a_no_op() {
        let _guard = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        let dir = tempfile::tempdir().unwrap();
        todo_open(dir.path().to_str().unwrap().to_string());
        todo_set_input("keep".to_string());
        todo_add();

        todo_begin_edit(0).expect("row 0 is editable");
        let missing = todo_complete_edit(Some("lost".to_string()), None, true);
        assert!(!missing.ok);

        todo_begin_edit(0).expect("row 0 is editable");
        let cancelled = todo_complete_edit(Some("lost".to_string()), Some(0), false);
        assert!(!cancelled.ok);

        assert_eq!(todo_items(), vec!["keep".to_string()]);
        assert!(todo_begin_edit(9).is_none());
    }

    #[test]
    fn second_edit_is_refused_until_first_completes() {
        let _guard = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        let dir = tempfile::tempdir().unwrap();
        todo_open(dir.path().to_str().unwrap().to_string());
        for text in ["a", "b"] {
            todo_set_input(text.to_string());
            todo_add();
        }

        assert_eq!(todo_begin_edit(0).map(|r| r.position), Some(0));
        assert!(todo_begin_edit(1).is_none());

        todo_complete_edit(None, None, false);
        assert_eq!(todo_begin_edit(1).map(|r| r.text), Some("b".to_string()));
    }

    #[test]
    fn session_survives_a_poisoned_lock() {
        let _guard = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        let dir = tempfile::tempdir().unwrap();
        todo_open(dir.path().to_str().unwrap().to_string());
        todo_set_input("before".to_string());
        todo_add();

        let poisoned = std::thread::spawn(|| {
            let _session = super::lock_session();
            panic!("poison the session lock");
        })
        .join();
        assert!(poisoned.is_err());

        assert_eq!(todo_items(), vec!["before".to_string()]);
        todo_set_input("after".to_string());
        assert!(todo_add().ok);
        assert_eq!(
            todo_items(),
            vec!["before".to_string(), "after".to_string()]
        );
    }
}
