use thiserror::Error;

use crate::engine::EngineError;
use crate::model::{MediaError, QuizItemError, SessionSummaryError, SettingsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Item(#[from] QuizItemError),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
