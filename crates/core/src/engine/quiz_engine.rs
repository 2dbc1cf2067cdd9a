use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;

use crate::model::{ItemId, QuizItem, ScoringMode, Section, SessionId, SessionSummary};
use crate::time::Clock;

use super::EngineError;
use super::observer::ScoreObserver;
use super::phase::{IgnoredReason, Phase, SessionSnapshot, Transition};

//
// ─── INTERNAL STATE ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Presenting,
    Answered { choice: ItemId, correct: bool },
    Reviewing,
}

//
// ─── BUILDER ───────────────────────────────────────────────────────────────────
//

/// Configures a [`QuizEngine`] before the session starts.
pub struct QuizEngineBuilder {
    items: Vec<QuizItem>,
    clock: Clock,
    section: Option<Section>,
    scoring: ScoringMode,
    observer: Option<Box<dyn ScoreObserver>>,
}

impl QuizEngineBuilder {
    #[must_use]
    pub fn new(items: Vec<QuizItem>) -> Self {
        Self {
            items,
            clock: Clock::default(),
            section: None,
            scoring: ScoringMode::default(),
            observer: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl ScoreObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Validate the item list and start the session at the first item.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyItems` for an empty list and
    /// `EngineError::DuplicateItem` when two items share an id.
    pub fn build(self) -> Result<QuizEngine, EngineError> {
        if self.items.is_empty() {
            return Err(EngineError::EmptyItems);
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id()) {
                return Err(EngineError::DuplicateItem {
                    id: item.id().clone(),
                });
            }
        }

        let session_id = SessionId::new_v4();
        let started_at = self.clock.now();
        tracing::debug!(
            session = %session_id,
            section = ?self.section,
            items = self.items.len(),
            "quiz session created"
        );

        Ok(QuizEngine {
            session_id,
            section: self.section,
            scoring: self.scoring,
            clock: self.clock,
            items: self.items,
            current_index: 0,
            selected: None,
            score: 0,
            stage: Stage::Presenting,
            review_index: 0,
            started_at,
            completed_at: None,
            observer: self.observer,
        })
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Per-session quiz state machine over a fixed, ordered item list.
///
/// The engine exclusively owns its state. Views read it through
/// [`QuizEngine::snapshot`] and the accessors; hosts learn about score
/// changes only through the registered [`ScoreObserver`].
pub struct QuizEngine {
    session_id: SessionId,
    section: Option<Section>,
    scoring: ScoringMode,
    clock: Clock,
    items: Vec<QuizItem>,
    current_index: usize,
    selected: Option<ItemId>,
    score: u32,
    stage: Stage,
    review_index: usize,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    observer: Option<Box<dyn ScoreObserver>>,
}

impl QuizEngine {
    /// Start a session with default settings.
    ///
    /// # Errors
    ///
    /// See [`QuizEngineBuilder::build`].
    pub fn new(items: Vec<QuizItem>) -> Result<Self, EngineError> {
        QuizEngineBuilder::new(items).build()
    }

    #[must_use]
    pub fn builder(items: Vec<QuizItem>) -> QuizEngineBuilder {
        QuizEngineBuilder::new(items)
    }

    // ── queries ──

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn section(&self) -> Option<Section> {
        self.section
    }

    #[must_use]
    pub fn scoring_mode(&self) -> ScoringMode {
        self.scoring
    }

    #[must_use]
    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    /// Number of questions in the session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_item(&self) -> &QuizItem {
        &self.items[self.current_index]
    }

    /// The tentative choice while presenting, the locked one once answered.
    #[must_use]
    pub fn selected_answer(&self) -> Option<&ItemId> {
        match &self.stage {
            Stage::Presenting => self.selected.as_ref(),
            Stage::Answered { choice, .. } => Some(choice),
            Stage::Reviewing => None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match &self.stage {
            Stage::Presenting => Phase::Presenting {
                index: self.current_index,
            },
            Stage::Answered { choice, correct } => Phase::Answered {
                index: self.current_index,
                choice: choice.clone(),
                correct: *correct,
            },
            Stage::Reviewing => Phase::Reviewing {
                index: self.review_index,
            },
        }
    }

    #[must_use]
    pub fn is_reviewing(&self) -> bool {
        matches!(self.stage, Stage::Reviewing)
    }

    /// Whether the current question is the last one.
    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.items.len()
    }

    /// The item under the review cursor, only while reviewing.
    #[must_use]
    pub fn review_item(&self) -> Option<&QuizItem> {
        match self.stage {
            Stage::Reviewing => self.items.get(self.review_index),
            _ => None,
        }
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&QuizItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id,
            phase: self.phase(),
            current_index: self.current_index,
            total: self.items.len(),
            score: self.score,
            selected_answer: self.selected_answer().cloned(),
            review_index: self.is_reviewing().then_some(self.review_index),
        }
    }

    /// Outcome of the session, available once it reached review.
    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        if !self.is_reviewing() {
            return None;
        }
        let completed_at = self.completed_at?;
        let total = u32::try_from(self.items.len()).unwrap_or(u32::MAX);
        SessionSummary::new(
            self.session_id,
            self.section,
            total,
            self.score,
            self.started_at,
            completed_at,
        )
        .inspect_err(|err| {
            tracing::warn!(session = %self.session_id, error = %err, "session summary rejected");
        })
        .ok()
    }

    // ── operations ──

    /// Record a tentative choice for the current question.
    ///
    /// The choice can be changed until it is submitted.
    pub fn select_answer(&mut self, choice: &ItemId) -> Transition {
        if self.stage != Stage::Presenting {
            return self.ignore("select_answer", IgnoredReason::WrongPhase);
        }
        if self.item(choice).is_none() {
            return self.ignore("select_answer", IgnoredReason::UnknownChoice);
        }

        tracing::trace!(
            session = %self.session_id,
            index = self.current_index,
            choice = %choice,
            "answer selected"
        );
        self.selected = Some(choice.clone());
        Transition::Applied
    }

    /// Lock in the tentative choice and score it.
    ///
    /// Scoring only happens on the presenting → answered edge, so repeated
    /// calls count at most once per question.
    pub fn submit_answer(&mut self) -> Transition {
        if self.stage != Stage::Presenting {
            return self.ignore("submit_answer", IgnoredReason::WrongPhase);
        }
        let Some(choice) = self.selected.take() else {
            return self.ignore("submit_answer", IgnoredReason::NoSelection);
        };

        let correct = &choice == self.items[self.current_index].id();
        tracing::debug!(
            session = %self.session_id,
            index = self.current_index,
            choice = %choice,
            correct,
            "answer submitted"
        );
        self.stage = Stage::Answered { choice, correct };

        if correct {
            self.score += 1;
            let score = self.score;
            if let Some(observer) = self.observer.as_mut() {
                observer.score_changed(score);
            }
        }
        Transition::Applied
    }

    /// Select and submit in one step.
    ///
    /// Nothing changes unless the selection applies.
    pub fn answer(&mut self, choice: &ItemId) -> Transition {
        match self.select_answer(choice) {
            Transition::Applied => self.submit_answer(),
            ignored @ Transition::Ignored(_) => ignored,
        }
    }

    /// Move past an answered question, into review after the last one.
    pub fn advance(&mut self) -> Transition {
        if !matches!(self.stage, Stage::Answered { .. }) {
            return self.ignore("advance", IgnoredReason::WrongPhase);
        }

        self.selected = None;
        if self.is_last_question() {
            self.stage = Stage::Reviewing;
            self.review_index = 0;
            // A clock that stepped backwards must not produce an inverted range.
            self.completed_at = Some(self.clock.now().max(self.started_at));
            tracing::debug!(
                session = %self.session_id,
                score = self.score,
                total = self.items.len(),
                "quiz completed, entering review"
            );
        } else {
            self.current_index += 1;
            self.stage = Stage::Presenting;
            tracing::debug!(
                session = %self.session_id,
                index = self.current_index,
                "next question"
            );
        }
        Transition::Applied
    }

    /// Move the review cursor by `delta`, clamped to the item range.
    pub fn review_seek(&mut self, delta: isize) -> Transition {
        if self.stage != Stage::Reviewing {
            return self.ignore("review_seek", IgnoredReason::WrongPhase);
        }

        let last = self.items.len() - 1;
        let distance = delta.unsigned_abs();
        let target = if delta.is_negative() {
            self.review_index.saturating_sub(distance)
        } else {
            self.review_index.saturating_add(distance)
        };
        self.review_index = target.min(last);
        tracing::trace!(
            session = %self.session_id,
            review_index = self.review_index,
            "review moved"
        );
        Transition::Applied
    }

    /// Start over from the first question with a zero score. Valid in any phase.
    pub fn restart(&mut self) -> Transition {
        self.current_index = 0;
        self.selected = None;
        self.score = 0;
        self.stage = Stage::Presenting;
        self.review_index = 0;
        self.started_at = self.clock.now();
        self.completed_at = None;
        tracing::debug!(session = %self.session_id, "quiz restarted");
        Transition::Applied
    }

    fn ignore(&self, operation: &'static str, reason: IgnoredReason) -> Transition {
        tracing::trace!(
            session = %self.session_id,
            operation,
            ?reason,
            phase = ?self.stage,
            "operation ignored"
        );
        Transition::Ignored(reason)
    }
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("session_id", &self.session_id)
            .field("section", &self.section)
            .field("items_len", &self.items.len())
            .field("current_index", &self.current_index)
            .field("stage", &self.stage)
            .field("score", &self.score)
            .field("review_index", &self.review_index)
            .field("has_observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizItemDraft;
    use crate::time::{fixed_clock, fixed_now};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn item(id: &str) -> QuizItem {
        QuizItemDraft::new(id, format!("{id} name"), format!("{id} description"))
            .validate()
            .unwrap()
    }

    fn engine(ids: &[&str]) -> QuizEngine {
        QuizEngine::builder(ids.iter().copied().map(item).collect())
            .with_clock(fixed_clock())
            .build()
            .unwrap()
    }

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl FnMut(u32) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |score: u32| sink.borrow_mut().push(score))
    }

    fn answer_and_advance(engine: &mut QuizEngine, choice: &str) {
        assert!(engine.select_answer(&ItemId::new(choice)).is_applied());
        assert!(engine.submit_answer().is_applied());
        assert!(engine.advance().is_applied());
    }

    #[test]
    fn completion_never_precedes_start() {
        let mut engine = engine(&["a", "b"]);
        let later = fixed_now() + chrono::Duration::hours(1);
        engine.started_at = later;
        answer_and_advance(&mut engine, "a");
        answer_and_advance(&mut engine, "b");

        assert_eq!(engine.completed_at(), Some(later));
        let summary = engine.summary().expect("summary in review");
        assert_eq!(summary.completed_at(), later);
        assert_eq!(summary.score(), 2);
    }

    #[test]
    fn empty_items_are_rejected() {
        let err = QuizEngine::new(Vec::new()).unwrap_err();
        assert_eq!(err, EngineError::EmptyItems);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = QuizEngine::new(vec![item("a"), item("b"), item("a")]).unwrap_err();
        assert_eq!(err, EngineError::DuplicateItem { id: ItemId::new("a") });
    }

    #[test]
    fn starts_presenting_first_item() {
        let engine = engine(&["a", "b"]);
        assert_eq!(engine.phase(), Phase::Presenting { index: 0 });
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.current_item().id().as_str(), "a");
        assert_eq!(engine.selected_answer(), None);
        assert_eq!(engine.started_at(), fixed_now());
    }

    #[test]
    fn selection_is_tentative_until_submit() {
        let mut engine = engine(&["a", "b"]);
        engine.select_answer(&ItemId::new("b"));
        engine.select_answer(&ItemId::new("a"));
        assert_eq!(engine.selected_answer(), Some(&ItemId::new("a")));
        assert_eq!(engine.phase(), Phase::Presenting { index: 0 });
        assert_eq!(engine.score(), 0);

        engine.submit_answer();
        assert_eq!(
            engine.phase(),
            Phase::Answered {
                index: 0,
                choice: ItemId::new("a"),
                correct: true
            }
        );
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn submit_without_selection_is_ignored() {
        let mut engine = engine(&["a"]);
        assert_eq!(
            engine.submit_answer(),
            Transition::Ignored(IgnoredReason::NoSelection)
        );
        assert_eq!(engine.phase(), Phase::Presenting { index: 0 });
    }

    #[test]
    fn unknown_choice_is_ignored() {
        let mut engine = engine(&["a", "b"]);
        assert_eq!(
            engine.select_answer(&ItemId::new("zzz")),
            Transition::Ignored(IgnoredReason::UnknownChoice)
        );
        assert_eq!(engine.selected_answer(), None);
    }

    #[test]
    fn double_submit_scores_once() {
        let (seen, observer) = recorder();
        let mut engine = QuizEngine::builder(vec![item("a"), item("b")])
            .with_observer(observer)
            .build()
            .unwrap();

        engine.select_answer(&ItemId::new("a"));
        assert!(engine.submit_answer().is_applied());
        assert_eq!(
            engine.submit_answer(),
            Transition::Ignored(IgnoredReason::WrongPhase)
        );
        assert_eq!(engine.score(), 1);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn selecting_after_answer_is_ignored() {
        let mut engine = engine(&["a", "b"]);
        engine.answer(&ItemId::new("b"));
        assert_eq!(
            engine.select_answer(&ItemId::new("a")),
            Transition::Ignored(IgnoredReason::WrongPhase)
        );
        assert_eq!(engine.selected_answer(), Some(&ItemId::new("b")));
    }

    #[test]
    fn wrong_first_answer_keeps_score_and_stays_silent() {
        let (seen, observer) = recorder();
        let mut engine = QuizEngine::builder(vec![item("a"), item("b")])
            .with_observer(observer)
            .build()
            .unwrap();

        engine.select_answer(&ItemId::new("b"));
        engine.submit_answer();

        assert_eq!(
            engine.phase(),
            Phase::Answered {
                index: 0,
                choice: ItemId::new("b"),
                correct: false
            }
        );
        assert_eq!(engine.score(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn advance_requires_answer() {
        let mut engine = engine(&["a", "b"]);
        assert_eq!(engine.advance(), Transition::Ignored(IgnoredReason::WrongPhase));
        engine.select_answer(&ItemId::new("a"));
        assert_eq!(engine.advance(), Transition::Ignored(IgnoredReason::WrongPhase));
        assert_eq!(engine.phase(), Phase::Presenting { index: 0 });
    }

    #[test]
    fn advance_clears_selection_and_moves_forward() {
        let mut engine = engine(&["a", "b", "c"]);
        answer_and_advance(&mut engine, "c");
        assert_eq!(engine.phase(), Phase::Presenting { index: 1 });
        assert_eq!(engine.selected_answer(), None);
        assert_eq!(engine.current_item().id().as_str(), "b");
    }

    #[test]
    fn advance_from_last_item_enters_review() {
        let mut engine = engine(&["a", "b"]);
        answer_and_advance(&mut engine, "a");
        answer_and_advance(&mut engine, "b");

        assert_eq!(engine.phase(), Phase::Reviewing { index: 0 });
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.review_item().map(|i| i.id().as_str()), Some("a"));
        assert_eq!(engine.completed_at(), Some(fixed_now()));
        assert_eq!(engine.advance(), Transition::Ignored(IgnoredReason::WrongPhase));
    }

    #[test]
    fn review_seek_clamps_both_ends() {
        let mut engine = engine(&["a", "b", "c", "d"]);
        assert_eq!(engine.review_seek(1), Transition::Ignored(IgnoredReason::WrongPhase));

        for id in ["a", "b", "c", "d"] {
            answer_and_advance(&mut engine, id);
        }
        engine.review_seek(2);
        assert_eq!(engine.phase(), Phase::Reviewing { index: 2 });
        engine.review_seek(-999);
        assert_eq!(engine.phase(), Phase::Reviewing { index: 0 });
        engine.review_seek(isize::MAX);
        assert_eq!(engine.phase(), Phase::Reviewing { index: 3 });
        engine.review_seek(isize::MIN);
        assert_eq!(engine.phase(), Phase::Reviewing { index: 0 });
        engine.review_seek(1);
        assert_eq!(engine.phase(), Phase::Reviewing { index: 1 });
    }

    #[test]
    fn restart_from_review_resets_everything() {
        let (seen, observer) = recorder();
        let mut engine = QuizEngine::builder(vec![item("a"), item("b")])
            .with_clock(fixed_clock())
            .with_observer(observer)
            .build()
            .unwrap();
        answer_and_advance(&mut engine, "a");
        answer_and_advance(&mut engine, "b");
        engine.review_seek(1);

        assert!(engine.restart().is_applied());
        assert_eq!(engine.phase(), Phase::Presenting { index: 0 });
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.selected_answer(), None);
        assert_eq!(engine.completed_at(), None);
        assert_eq!(engine.snapshot().review_index, None);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn restart_clears_tentative_selection() {
        let mut engine = engine(&["a", "b"]);
        engine.select_answer(&ItemId::new("b"));
        engine.restart();
        assert_eq!(engine.selected_answer(), None);
        assert_eq!(
            engine.submit_answer(),
            Transition::Ignored(IgnoredReason::NoSelection)
        );
    }

    #[test]
    fn summary_only_in_review() {
        let mut engine = QuizEngine::builder(vec![item("a"), item("b")])
            .with_clock(fixed_clock())
            .with_section(Section::Sutures)
            .build()
            .unwrap();
        assert!(engine.summary().is_none());

        answer_and_advance(&mut engine, "a");
        answer_and_advance(&mut engine, "a");
        let summary = engine.summary().unwrap();
        assert_eq!(summary.score(), 1);
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.section(), Some(Section::Sutures));
        assert_eq!(summary.session_id(), engine.session_id());
    }

    #[test]
    fn snapshot_reflects_answered_state() {
        let mut engine = engine(&["a", "b"]);
        engine.answer(&ItemId::new("b"));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.current_index, 0);
        assert_eq!(snapshot.selected_answer, Some(ItemId::new("b")));
        assert!(snapshot.phase.is_answered());
        assert_eq!(snapshot.review_index, None);
    }
}
