// src/entries/edit_flow.rs
//! Explicit lifecycle of a single entry edit.
//!
//! ```text
//! Idle --begin--> Editing --submit--> Submitting --succeed--> Success
//!                   |                     |
//!                 cancel                 fail
//!                   v                     v
//!                  Idle                 Failed --submit--> Submitting
//! ```
//! `Success` and `Failed` may `begin` a new edit.

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing { entry_id: i64 },
    Submitting { entry_id: i64 },
    Success { entry_id: i64 },
    Failed { entry_id: i64, reason: String },
}

impl EditState {
    pub fn name(&self) -> &'static str {
        match self {
            EditState::Idle => "idle",
            EditState::Editing { .. } => "editing",
            EditState::Submitting { .. } => "submitting",
            EditState::Success { .. } => "success",
            EditState::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("cannot {action} while {from}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
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

    fn transition(&mut self, action: &'static str, next: EditState) {
        debug!(from = self.state.name(), to = next.name(), action, "Edit flow transition");
        self.state = next;
    }

    fn reject(&self, action: &'static str) -> InvalidTransition {
        InvalidTransition {
            from: self.state.name(),
            action,
        }
    }

    pub fn begin(&mut self, entry_id: i64) -> Result<(), InvalidTransition> {
        match self.state {
            EditState::Idle | EditState::Success { .. } | EditState::Failed { .. } => {
                self.transition("begin", EditState::Editing { entry_id });
                Ok(())
            }
            _ => Err(self.reject("begin")),
        }
    }

    pub fn cancel(&mut self) -> Result<(), InvalidTransition> {
        match self.state {
            EditState::Editing { .. } => {
                self.transition("cancel", EditState::Idle);
                Ok(())
            }
            _ => Err(self.reject("cancel")),
        }
    }

    pub fn submit(&mut self) -> Result<(), InvalidTransition> {
        match self.state {
            EditState::Editing { entry_id } | EditState::Failed { entry_id, .. } => {
                self.transition("submit", EditState::Submitting { entry_id });
                Ok(())
            }
            _ => Err(self.reject("submit")),
        }
    }

    pub fn succeed(&mut self) -> Result<(), InvalidTransition> {
        match self.state {
            EditState::Submitting { entry_id } => {
                self.transition("succeed", EditState::Success { entry_id });
                Ok(())
            }
            _ => Err(self.reject("succeed")),
        }
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), InvalidTransition> {
        match self.state {
            EditState::Submitting { entry_id } => {
                self.transition(
                    "fail",
                    EditState::Failed {
                        entry_id,
                        reason: reason.into(),
                    },
                );
                Ok(())
            }
            _ => Err(self.reject("fail")),
        }
    }
}
