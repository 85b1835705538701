//! List presenter and gesture dispatch.

use crate::model::todo_list::TodoList;
use log::{debug, warn};

/// One per-index change the rendering layer must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    /// A new row appeared at this position.
    Inserted(usize),
    /// The row at this position is gone; later rows shift up.
    Removed(usize),
    /// The row at this position was replaced in place.
    Changed(usize),
}

/// Gesture on a bound row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowGesture {
    Tapped(usize),
    LongPressed(usize),
}

impl RowGesture {
    /// Hands the gesture to the matching listener method.
    pub fn deliver<L: ItemGestureListener + ?Sized>(self, listener: &mut L) {
        match self {
            Self::Tapped(position) => listener.on_item_tapped(position),
            Self::LongPressed(position) => listener.on_item_long_pressed(position),
        }
    }
}

/// Receiver for row gestures.
pub trait ItemGestureListener {
    fn on_item_tapped(&mut self, position: usize);
    fn on_item_long_pressed(&mut self, position: usize);
}

/// Rendered rows plus the pending change queue.
#[derive(Debug, Default)]
pub struct ListPresenter {
    rows: Vec<String>,
    changes: Vec<RowChange>,
}

impl ListPresenter {
    /// Renders one row per item of `list`.
    pub fn bind(list: &TodoList) -> Self {
        Self {
            rows: list.items().to_vec(),
            changes: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the tap gesture for a bound row, or `None` for a stale index.
    pub fn tap(&self, position: usize) -> Option<RowGesture> {
        self.gesture(position, RowGesture::Tapped(position))
    }

    /// Returns the long-press gesture for a bound row, or `None` for a stale index.
    pub fn long_press(&self, position: usize) -> Option<RowGesture> {
        self.gesture(position, RowGesture::LongPressed(position))
    }

    pub fn notify_inserted(&mut self, list: &TodoList, position: usize) {
        match list.get(position) {
            Some(text) if position <= self.rows.len() => {
                self.rows.insert(position, text.to_string());
            }
            _ => warn!(
                "event=row_notify module=presenter status=invalid change=inserted position={} rows={}",
                position,
                self.rows.len()
            ),
        }
        self.record(list, RowChange::Inserted(position));
    }

    pub fn notify_removed(&mut self, list: &TodoList, position: usize) {
        if position < self.rows.len() {
            self.rows.remove(position);
        } else {
            warn!(
                "event=row_notify module=presenter status=invalid change=removed position={} rows={}",
                position,
                self.rows.len()
            );
        }
        self.record(list, RowChange::Removed(position));
    }

    pub fn notify_changed(&mut self, list: &TodoList, position: usize) {
        match (list.get(position), self.rows.get_mut(position)) {
            (Some(text), Some(row)) => {
                row.clear();
                row.push_str(text);
            }
            _ => warn!(
                "event=row_notify module=presenter status=invalid change=changed position={} rows={}",
                position,
                self.rows.len()
            ),
        }
        self.record(list, RowChange::Changed(position));
    }

    /// Drains queued notifications in the order they were raised.
    pub fn take_changes(&mut self) -> Vec<RowChange> {
        std::mem::take(&mut self.changes)
    }

    fn gesture(&self, position: usize, gesture: RowGesture) -> Option<RowGesture> {
        if position < self.rows.len() {
            debug!("event=row_gesture module=presenter gesture={gesture:?}");
            Some(gesture)
        } else {
            warn!(
                "event=row_gesture module=presenter status=ignored position={} rows={}",
                position,
                self.rows.len()
            );
            None
        }
    }

    fn record(&mut self, list: &TodoList, change: RowChange) {
        self.changes.push(change);
        if self.rows.as_slice() != list.items() {
            warn!(
                "event=row_rebind module=presenter status=drift rows={} items={}",
                self.rows.len(),
                list.len()
            );
            self.rows = list.items().to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemGestureListener, ListPresenter, RowChange, RowGesture};
    use crate::model::todo_list::TodoList;

    #[derive(Default)]
    struct Recorder {
        tapped: Vec<usize>,
        pressed: Vec<usize>,
    }

    impl ItemGestureListener for Recorder {
        fn on_item_tapped(&mut self, position: usize) {
            self.tapped.push(position);
        }

        fn on_item_long_pressed(&mut self, position: usize) {
            self.pressed.push(position);
        }
    }

    fn list(items: &[&str]) -> TodoList {
        TodoList::from_items(items.iter().map(|item| item.to_string()).collect())
    }

    #[test]
    fn bind_renders_raw_item_text() {
        let presenter = ListPresenter::bind(&list(&["a", "", "c"]));
        assert_eq!(presenter.rows(), ["a", "", "c"]);
    }

    #[test]
    fn notifications_keep_rows_in_step() {
        let mut todos = list(&["a", "b"]);
        let mut presenter = ListPresenter::bind(&todos);

        let position = todos.push("c");
        presenter.notify_inserted(&todos, position);
        todos.remove(0).unwrap();
        presenter.notify_removed(&todos, 0);
        todos.replace(1, "C").unwrap();
        presenter.notify_changed(&todos, 1);

        assert_eq!(presenter.rows(), ["b", "C"]);
        assert_eq!(
            presenter.take_changes(),
            vec![
                RowChange::Inserted(2),
                RowChange::Removed(0),
                RowChange::Changed(1)
            ]
        );
        assert!(presenter.take_changes().is_empty());
    }

    #[test]
    fn drift_is_repaired_by_rebinding() {
        let mut todos = list(&["a"]);
        let mut presenter = ListPresenter::bind(&todos);
        todos.push("b");
        todos.push("c");
        presenter.notify_inserted(&todos, 2);
        assert_eq!(presenter.rows(), ["a", "b", "c"]);
    }

    #[test]
    fn gestures_route_to_listener_and_ignore_stale_rows() {
        let presenter = ListPresenter::bind(&list(&["a", "b"]));
        let mut recorder = Recorder::default();

        presenter.tap(1).unwrap().deliver(&mut recorder);
        presenter.long_press(0).unwrap().deliver(&mut recorder);

        assert_eq!(recorder.tapped, vec![1]);
        assert_eq!(recorder.pressed, vec![0]);
        assert_eq!(presenter.tap(2), None);
        assert_eq!(presenter.long_press(5), None);
        assert_eq!(RowGesture::Tapped(1), presenter.tap(1).unwrap());
    }
}
