use quiz_core::Clock;
use quiz_core::catalog;
use quiz_core::engine::{QuizEngine, QuizEngineBuilder, ScoreObserver};
use quiz_core::model::{QuizItem, QuizSettings, Section};

use super::plan::OptionPlanner;
use super::service::QuizSession;
use crate::error::QuizServiceError;

/// Starts quiz sessions over catalog sections or custom item lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizService {
    clock: Clock,
    settings: QuizSettings,
}

impl QuizService {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            clock: Clock::default(),
            settings,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Start a session over a catalog section.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if the section's content fails validation.
    pub fn start(&self, section: Section) -> Result<QuizSession, QuizServiceError> {
        self.launch(self.section_engine(section)?)
    }

    /// Start a session over a catalog section, reporting score increments to `observer`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if the section's content fails validation.
    pub fn start_observed(
        &self,
        section: Section,
        observer: impl ScoreObserver + 'static,
    ) -> Result<QuizSession, QuizServiceError> {
        self.launch(self.section_engine(section)?.with_observer(observer))
    }

    /// Start a session over an arbitrary item list.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Engine` for an empty list or duplicate ids.
    pub fn start_with_items(&self, items: Vec<QuizItem>) -> Result<QuizSession, QuizServiceError> {
        self.launch(self.configure(QuizEngine::builder(items)))
    }

    fn section_engine(&self, section: Section) -> Result<QuizEngineBuilder, QuizServiceError> {
        let items = catalog::items(section)?;
        Ok(self.configure(QuizEngine::builder(items)).with_section(section))
    }

    fn configure(&self, builder: QuizEngineBuilder) -> QuizEngineBuilder {
        builder
            .with_clock(self.clock)
            .with_scoring(self.settings.scoring())
    }

    fn launch(&self, builder: QuizEngineBuilder) -> Result<QuizSession, QuizServiceError> {
        let engine = builder.build()?;
        tracing::info!(
            session = %engine.session_id(),
            section = ?engine.section(),
            questions = engine.total(),
            scoring = ?engine.scoring_mode(),
            "quiz started"
        );
        Ok(QuizSession::new(engine, OptionPlanner::new(&self.settings)))
    }
}
