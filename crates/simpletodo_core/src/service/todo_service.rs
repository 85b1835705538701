//! To-do session service.
//!
//! # Responsibility
//! - Load the list at startup and keep the presenter bound to it.
//! - Apply add / edit / remove, notify, persist, acknowledge.
//! - Gate edit completions through the `EditFlow` state machine.
//!
//! # Invariants
//! - Stored items never contain line breaks (they would split on reload).
//! - A failed save keeps the in-memory change and marks the
//!   acknowledgment as not persisted.
//! - Invalid edit completions are logged and change nothing.
//! - A pending edit always points at the item it was opened for.

use crate::edit::edit_flow::{EditFlow, EditSurface};
use crate::model::edit::{EditOutcome, EditRequest, EditResult};
use crate::model::todo_list::TodoList;
use crate::presenter::list_presenter::{
    ItemGestureListener, ListPresenter, RowChange, RowGesture,
};
use crate::store::list_store::ListStore;
use log::{info, warn};
use std::fmt::{Display, Formatter};

/// User action behind an acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoAction {
    Added,
    Updated,
    Removed,
}

impl TodoAction {
    fn label(self) -> &'static str {
        match self {
            Self::Added => "add",
            Self::Updated => "update",
            Self::Removed => "remove",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Added => "Item was added",
            Self::Updated => "Successfully updated item",
            Self::Removed => "Successfully removed item",
        }
    }
}

/// Transient user-facing confirmation of an applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgment {
    pub action: TodoAction,
    pub position: usize,
    /// `false` when the in-memory change could not be written to storage.
    pub persisted: bool,
}

impl Display for Acknowledgment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.persisted {
            f.write_str(self.action.message())
        } else {
            write!(f, "{}, but it could not be saved", self.action.message())
        }
    }
}

/// One to-do session over a list store.
pub struct TodoService<S: ListStore> {
    store: S,
    list: TodoList,
    presenter: ListPresenter,
    edit: EditFlow,
    input: String,
}

/// What a delivered row gesture produced.
enum GestureReply {
    Edit(Option<EditRequest>),
    Removed(Option<Acknowledgment>),
}

impl<S: ListStore> TodoService<S> {
    /// Loads the persisted list and binds the presenter to it.
    pub fn open(store: S) -> Self {
        let list = TodoList::from_items(store.load());
        let presenter = ListPresenter::bind(&list);
        info!(
            "event=session_open module=service status=ok items={}",
            list.len()
        );
        Self {
            store,
            list,
            presenter,
            edit: EditFlow::new(),
            input: String::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn items(&self) -> &[String] {
        self.list.items()
    }

    pub fn presenter(&self) -> &ListPresenter {
        &self.presenter
    }

    /// Rows as currently rendered.
    pub fn rows(&self) -> &[String] {
        self.presenter.rows()
    }

    /// Drains presenter notifications for the rendering layer.
    pub fn take_changes(&mut self) -> Vec<RowChange> {
        self.presenter.take_changes()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Pending edit request, if an edit is open.
    pub fn pending_edit(&self) -> Option<&EditRequest> {
        self.edit.pending()
    }

    /// Appends the input buffer as a new item and clears the buffer.
    ///
    /// Empty input is accepted and stored as an empty item.
    pub fn add(&mut self) -> Acknowledgment {
        let text = single_line(&std::mem::take(&mut self.input));
        let position = self.list.push(text);
        self.presenter.notify_inserted(&self.list, position);
        let persisted = self.persist();
        self.acknowledge(TodoAction::Added, position, persisted)
    }

    /// Sets the input buffer to `text` and adds it.
    pub fn add_text(&mut self, text: impl Into<String>) -> Acknowledgment {
        self.set_input(text);
        self.add()
    }

    /// Removes the item at `position`. Out-of-range positions change nothing.
    ///
    /// A pending edit of the removed item is dropped; a pending edit further
    /// down follows its item to the new position.
    pub fn remove(&mut self, position: usize) -> Option<Acknowledgment> {
        if let Err(err) = self.list.remove(position) {
            warn!("event=item_remove module=service status=ignored error={err}");
            return None;
        }
        self.edit.item_removed(position);
        self.presenter.notify_removed(&self.list, position);
        let persisted = self.persist();
        Some(self.acknowledge(TodoAction::Removed, position, persisted))
    }

    /// Opens an edit for the item at `position` and returns the request to
    /// show on the edit surface.
    ///
    /// Returns `None` while another edit is pending; that edit must be
    /// completed or cancelled first.
    pub fn begin_edit(&mut self, position: usize) -> Option<EditRequest> {
        let Some(text) = self.list.get(position) else {
            warn!(
                "event=edit_begin module=service status=ignored position={} items={}",
                position,
                self.list.len()
            );
            return None;
        };
        let request = EditRequest {
            text: text.to_string(),
            position,
        };
        self.edit.begin(request.clone()).ok()?;
        Some(request)
    }

    /// Applies an edit-surface completion.
    ///
    /// `None` means the surface closed without a confirmed result (or with
    /// missing fields); the pending edit is dropped and nothing changes.
    pub fn complete_edit(&mut self, result: Option<EditResult>) -> Option<Acknowledgment> {
        match result {
            Some(result) => self.finish_edit(EditOutcome::Confirmed(result)),
            None => {
                warn!("event=edit_complete module=service status=ignored reason=no_result");
                self.edit.reset();
                None
            }
        }
    }

    /// Resolves the pending edit with a surface outcome.
    pub fn finish_edit(&mut self, outcome: EditOutcome) -> Option<Acknowledgment> {
        let finished = self.edit.finish(outcome);
        self.edit.reset();
        let result = match finished {
            Ok(Some(result)) => result,
            Ok(None) => {
                warn!("event=edit_complete module=service status=ignored reason=cancelled");
                return None;
            }
            Err(err) => {
                warn!("event=edit_complete module=service status=ignored error={err}");
                return None;
            }
        };

        let position = result.position;
        if let Err(err) = self.list.replace(position, single_line(&result.text)) {
            warn!("event=edit_complete module=service status=ignored error={err}");
            return None;
        }
        self.presenter.notify_changed(&self.list, position);
        let persisted = self.persist();
        Some(self.acknowledge(TodoAction::Updated, position, persisted))
    }

    /// Runs a full modal edit of `position` through `surface`.
    pub fn edit_with<E: EditSurface + ?Sized>(
        &mut self,
        surface: &mut E,
        position: usize,
    ) -> Option<Acknowledgment> {
        let request = self.begin_edit(position)?;
        let outcome = surface.edit(&request);
        self.finish_edit(outcome)
    }

    /// Row tap: opens an edit for a rendered row.
    pub fn tap(&mut self, position: usize) -> Option<EditRequest> {
        match self.respond(self.presenter.tap(position)?) {
            GestureReply::Edit(request) => request,
            GestureReply::Removed(_) => None,
        }
    }

    /// Row long-press: removes a rendered row.
    pub fn long_press(&mut self, position: usize) -> Option<Acknowledgment> {
        match self.respond(self.presenter.long_press(position)?) {
            GestureReply::Removed(ack) => ack,
            GestureReply::Edit(_) => None,
        }
    }

    fn respond(&mut self, gesture: RowGesture) -> GestureReply {
        match gesture {
            RowGesture::Tapped(position) => GestureReply::Edit(self.begin_edit(position)),
            RowGesture::LongPressed(position) => GestureReply::Removed(self.remove(position)),
        }
    }

    fn persist(&mut self) -> bool {
        match self.store.save(self.list.items()) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=list_persist module=service status=error items={} error={}",
                    self.list.len(),
                    err
                );
                false
            }
        }
    }

    fn acknowledge(
        &self,
        action: TodoAction,
        position: usize,
        persisted: bool,
    ) -> Acknowledgment {
        info!(
            "event=item_{} module=service status=ok position={} persisted={}",
            action.label(),
            position,
            persisted
        );
        Acknowledgment {
            action,
            position,
            persisted,
        }
    }
}

impl<S: ListStore> ItemGestureListener for TodoService<S> {
    fn on_item_tapped(&mut self, position: usize) {
        self.respond(RowGesture::Tapped(position));
    }

    fn on_item_long_pressed(&mut self, position: usize) {
        self.respond(RowGesture::LongPressed(position));
    }
}

/// Replaces line breaks so one item stays one stored line.
fn single_line(text: &str) -> String {
    if !text.contains(['\r', '\n']) {
        return text.to_string();
    }
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
