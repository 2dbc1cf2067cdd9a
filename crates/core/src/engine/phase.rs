use serde::Serialize;

use crate::model::{ItemId, SessionId};

/// Current state of a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Item `index` is shown and no answer is locked in.
    Presenting { index: usize },
    /// The answer to item `index` is locked and feedback is visible.
    Answered {
        index: usize,
        choice: ItemId,
        correct: bool,
    },
    /// Free navigation over all items after the last question.
    Reviewing { index: usize },
}

impl Phase {
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Phase::Presenting { index }
            | Phase::Answered { index, .. }
            | Phase::Reviewing { index } => *index,
        }
    }

    #[must_use]
    pub fn is_presenting(&self) -> bool {
        matches!(self, Phase::Presenting { .. })
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self, Phase::Answered { .. })
    }

    #[must_use]
    pub fn is_reviewing(&self) -> bool {
        matches!(self, Phase::Reviewing { .. })
    }
}

/// Why an operation left the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The operation is not valid in the current phase.
    WrongPhase,
    /// `submit_answer` without a tentative choice.
    NoSelection,
    /// The chosen id is not one of the session's items.
    UnknownChoice,
}

/// Outcome of an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored(IgnoredReason),
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Transition::Applied)
    }
}

/// Read-only copy of a session's state for views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub phase: Phase,
    pub current_index: usize,
    pub total: usize,
    pub score: u32,
    pub selected_answer: Option<ItemId>,
    /// Only set while reviewing.
    pub review_index: Option<usize>,
}
