//! Edit flow state machine: `Idle -> Editing -> (Confirmed | Cancelled)`.

use crate::model::edit::{EditOutcome, EditRequest, EditResult};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current edit state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(EditRequest),
    Confirmed(EditResult),
    Cancelled,
}

impl EditState {
    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing(_) => "editing",
            Self::Confirmed(_) => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Rejected edit transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditFlowError {
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl Display for EditFlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { from, action } => {
                write!(f, "cannot {action} an edit while {from}")
            }
        }
    }
}

impl Error for EditFlowError {}

/// Synchronous edit surface: shows the request and returns how it ended.
pub trait EditSurface {
    fn edit(&mut self, request: &EditRequest) -> EditOutcome;
}

/// Single pending-edit tracker.
#[derive(Debug, Default)]
pub struct EditFlow {
    state: EditState,
}

impl EditFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Returns the pending request while editing.
    pub fn pending(&self) -> Option<&EditRequest> {
        match &self.state {
            EditState::Editing(request) => Some(request),
            _ => None,
        }
    }

    /// `Idle -> Editing`. Finished states are treated as idle.
    pub fn begin(&mut self, request: EditRequest) -> Result<(), EditFlowError> {
        if matches!(self.state, EditState::Editing(_)) {
            return Err(self.reject("begin"));
        }
        debug!(
            "event=edit_begin module=edit position={} text_len={}",
            request.position,
            request.text.len()
        );
        self.state = EditState::Editing(request);
        Ok(())
    }

    /// `Editing -> Confirmed` with the edited text at the original position.
    pub fn confirm(&mut self, text: impl Into<String>) -> Result<EditResult, EditFlowError> {
        let EditState::Editing(request) = &self.state else {
            return Err(self.reject("confirm"));
        };
        let result = EditResult {
            text: text.into(),
            position: request.position,
        };
        debug!("event=edit_confirm module=edit position={}", result.position);
        self.state = EditState::Confirmed(result.clone());
        Ok(result)
    }

    /// `Editing -> Cancelled`.
    pub fn cancel(&mut self) -> Result<(), EditFlowError> {
        if !matches!(self.state, EditState::Editing(_)) {
            return Err(self.reject("cancel"));
        }
        debug!("event=edit_cancel module=edit");
        self.state = EditState::Cancelled;
        Ok(())
    }

    /// Resolves the pending edit from a surface outcome.
    ///
    /// A confirmed result must target the pending position; otherwise the
    /// completion is rejected and the flow stays in `Editing`.
    pub fn finish(&mut self, outcome: EditOutcome) -> Result<Option<EditResult>, EditFlowError> {
        match outcome {
            EditOutcome::Cancelled => self.cancel().map(|()| None),
            EditOutcome::Confirmed(result) => {
                let Some(request) = self.pending() else {
                    return Err(self.reject("confirm"));
                };
                if request.position != result.position {
                    warn!(
                        "event=edit_finish module=edit status=rejected pending_position={} result_position={}",
                        request.position, result.position
                    );
                    return Err(EditFlowError::InvalidTransition {
                        from: "editing another position",
                        action: "confirm",
                    });
                }
                self.confirm(result.text).map(Some)
            }
        }
    }

    /// Keeps the pending edit aligned after the item at `removed` is gone.
    ///
    /// A pending edit of the removed item is dropped; one below it moves up
    /// by one position. Returns `false` when the pending edit was dropped.
    pub fn item_removed(&mut self, removed: usize) -> bool {
        let EditState::Editing(request) = &mut self.state else {
            return true;
        };
        if request.position == removed {
            warn!("event=edit_dropped module=edit reason=item_removed position={removed}");
            self.state = EditState::Cancelled;
            return false;
        }
        if request.position > removed {
            request.position -= 1;
        }
        true
    }

    /// Returns to `Idle` and hands back the finished state.
    pub fn reset(&mut self) -> EditState {
        std::mem::take(&mut self.state)
    }

    fn reject(&self, action: &'static str) -> EditFlowError {
        let from = self.state.label();
        warn!("event=edit_transition module=edit status=rejected from={from} action={action}");
        EditFlowError::InvalidTransition { from, action }
    }
}
