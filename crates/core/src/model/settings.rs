use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a user's pick is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    /// A pick is tentative until it is submitted.
    #[default]
    TwoStep,
    /// A pick is scored immediately.
    SingleStep,
}

/// Order in which answer options are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionOrder {
    /// Same order as the item list.
    #[default]
    Catalog,
    Shuffled,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("max_options must be at least 2, got {0}")]
    TooFewOptions(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuizSettings {
    scoring: ScoringMode,
    option_order: OptionOrder,
    max_options: Option<usize>,
    seed: Option<u64>,
}

/// Unvalidated settings as read from a config file or flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuizSettingsDraft {
    pub scoring: Option<ScoringMode>,
    pub option_order: Option<OptionOrder>,
    pub max_options: Option<usize>,
    pub seed: Option<u64>,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: QuizSettingsDraft) -> Self {
        Self {
            scoring: other.scoring.or(self.scoring),
            option_order: other.option_order.or(self.option_order),
            max_options: other.max_options.or(self.max_options),
            seed: other.seed.or(self.seed),
        }
    }

    /// Validate the draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::TooFewOptions` if `max_options` is below 2.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        if let Some(max) = self.max_options {
            if max < 2 {
                return Err(SettingsError::TooFewOptions(max));
            }
        }

        Ok(QuizSettings {
            scoring: self.scoring.unwrap_or_default(),
            option_order: self.option_order.unwrap_or_default(),
            max_options: self.max_options,
            seed: self.seed,
        })
    }
}

impl QuizSettings {
    #[must_use]
    pub fn scoring(&self) -> ScoringMode {
        self.scoring
    }

    #[must_use]
    pub fn option_order(&self) -> OptionOrder {
        self.option_order
    }

    /// Upper bound on options per question, `None` offers every item.
    #[must_use]
    pub fn max_options(&self) -> Option<usize> {
        self.max_options
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }
}
