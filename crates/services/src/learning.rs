use quiz_core::catalog;
use quiz_core::model::{QuizItem, Section};

use crate::error::QuizServiceError;

/// Flashcard-style browsing of a section without scoring.
///
/// Navigation stops at both ends; switching sections starts at the first item.
#[derive(Debug, Clone)]
pub struct LearningBrowser {
    section: Section,
    items: Vec<QuizItem>,
    index: usize,
}

impl LearningBrowser {
    /// # Errors
    ///
    /// Returns `QuizServiceError::Item` if the section's content fails validation.
    pub fn new(section: Section) -> Result<Self, QuizServiceError> {
        Ok(Self {
            section,
            items: catalog::items(section)?,
            index: 0,
        })
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Item` if the section's content fails validation.
    pub fn select_section(&mut self, section: Section) -> Result<(), QuizServiceError> {
        self.items = catalog::items(section)?;
        self.section = section;
        self.index = 0;
        tracing::debug!(%section, items = self.items.len(), "learning section selected");
        Ok(())
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn current(&self) -> Option<&QuizItem> {
        self.items.get(self.index)
    }

    /// 1-based position and item count.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.items.len())
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.items.len()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.index -= 1;
            true
        } else {
            false
        }
    }
}
