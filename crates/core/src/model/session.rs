use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::{Section, SessionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score ({score}) exceeds the number of questions ({total})")]
    ScoreOutOfRange { score: u32, total: u32 },
}

/// Outcome of a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    session_id: SessionId,
    section: Option<Section>,
    total: u32,
    score: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Build a summary, checking the score and time range.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SessionSummaryError::ScoreOutOfRange` if `score > total`.
    pub fn new(
        session_id: SessionId,
        section: Option<Section>,
        total: u32,
        score: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        if score > total {
            return Err(SessionSummaryError::ScoreOutOfRange { score, total });
        }

        Ok(Self {
            session_id,
            section,
            total,
            score,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn section(&self) -> Option<Section> {
        self.section
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Share of correct answers, rounded to the nearest whole percent.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let scaled = u64::from(self.score) * 100 + u64::from(self.total) / 2;
        u32::try_from(scaled / u64::from(self.total)).unwrap_or(100)
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}
