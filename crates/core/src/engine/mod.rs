//! The quiz state machine.
//!
//! One generic engine drives any ordered item list through
//! `Presenting → Answered → … → Reviewing`. Operations that do not fit the
//! current phase are ignored and reported as [`Transition::Ignored`].

mod observer;
mod phase;
mod quiz_engine;

use thiserror::Error;

use crate::model::ItemId;

pub use observer::ScoreObserver;
pub use phase::{IgnoredReason, Phase, SessionSnapshot, Transition};
pub use quiz_engine::{QuizEngine, QuizEngineBuilder};

/// Errors raised while constructing an engine. A session never starts with them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("a quiz needs at least one item")]
    EmptyItems,

    #[error("duplicate item id in quiz: {id}")]
    DuplicateItem { id: ItemId },
}
