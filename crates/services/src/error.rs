//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::engine::EngineError;
use quiz_core::model::{QuizItemError, SettingsError};

/// Errors emitted while starting quiz sessions or browsing content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Item(#[from] QuizItemError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
