use std::fmt;

use quiz_core::engine::{IgnoredReason, QuizEngine, SessionSnapshot, Transition};
use quiz_core::model::{QuizItem, ScoringMode, SessionSummary};

use super::plan::{AnswerOption, OptionPlan, OptionPlanner};
use super::progress::QuizProgress;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A running quiz: the engine plus the options shown for each question.
///
/// Options are planned once per run so they stay put between picking and
/// submitting; `restart` plans a fresh set.
pub struct QuizSession {
    engine: QuizEngine,
    planner: OptionPlanner,
    plan: OptionPlan,
}

impl QuizSession {
    pub(crate) fn new(engine: QuizEngine, mut planner: OptionPlanner) -> Self {
        let plan = planner.plan(engine.items());
        Self {
            engine,
            planner,
            plan,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.engine.snapshot()
    }

    #[must_use]
    pub fn current_item(&self) -> &QuizItem {
        self.engine.current_item()
    }

    /// Options for the question on screen; empty while reviewing.
    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        if self.engine.is_reviewing() {
            return &[];
        }
        self.plan.for_question(self.engine.current_index())
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let phase = self.engine.phase();
        let is_complete = phase.is_reviewing();
        let answered = if is_complete {
            self.engine.total()
        } else if phase.is_answered() {
            self.engine.current_index() + 1
        } else {
            self.engine.current_index()
        };

        QuizProgress {
            total: self.engine.total(),
            question_number: self.engine.current_index() + 1,
            answered,
            score: self.engine.score(),
            is_complete,
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        self.engine.summary()
    }

    /// React to the user picking on-screen option `option_index`.
    ///
    /// Two-step sessions only select; single-step sessions score right away.
    pub fn pick(&mut self, option_index: usize) -> Transition {
        let Some(option) = self.options().get(option_index) else {
            return Transition::Ignored(IgnoredReason::UnknownChoice);
        };
        let choice = option.id.clone();
        match self.engine.scoring_mode() {
            ScoringMode::TwoStep => self.engine.select_answer(&choice),
            ScoringMode::SingleStep => self.engine.answer(&choice),
        }
    }

    pub fn submit(&mut self) -> Transition {
        self.engine.submit_answer()
    }

    pub fn advance(&mut self) -> Transition {
        let transition = self.engine.advance();
        if transition.is_applied() {
            if let Some(summary) = self.engine.summary() {
                tracing::info!(
                    session = %summary.session_id(),
                    section = ?summary.section(),
                    score = summary.score(),
                    total = summary.total(),
                    "quiz finished"
                );
            }
        }
        transition
    }

    pub fn review_seek(&mut self, delta: isize) -> Transition {
        self.engine.review_seek(delta)
    }

    pub fn review_next(&mut self) -> Transition {
        self.engine.review_seek(1)
    }

    pub fn review_previous(&mut self) -> Transition {
        self.engine.review_seek(-1)
    }

    pub fn restart(&mut self) -> Transition {
        self.plan = self.planner.plan(self.engine.items());
        self.engine.restart()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("engine", &self.engine)
            .field("planned_questions", &self.plan.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::catalog;
    use quiz_core::engine::Phase;
    use quiz_core::model::{ItemId, QuizSettings, QuizSettingsDraft, Section};
    use quiz_core::time::fixed_clock;

    fn session(scoring: ScoringMode) -> QuizSession {
        let settings = QuizSettings::default().with_scoring(scoring).with_seed(11);
        let engine = QuizEngine::builder(catalog::items(Section::Sutures).unwrap())
            .with_clock(fixed_clock())
            .with_scoring(scoring)
            .build()
            .unwrap();
        QuizSession::new(engine, OptionPlanner::new(&settings))
    }

    fn option_index(session: &QuizSession, id: &str) -> usize {
        session
            .options()
            .iter()
            .position(|o| o.id == ItemId::new(id))
            .unwrap()
    }

    #[test]
    fn two_step_pick_only_selects() {
        let mut session = session(ScoringMode::TwoStep);
        let idx = option_index(&session, "coronal");
        assert!(session.pick(idx).is_applied());
        assert!(session.engine().phase().is_presenting());
        assert!(session.submit().is_applied());
        assert_eq!(session.engine().score(), 1);
    }

    #[test]
    fn single_step_pick_scores() {
        let mut session = session(ScoringMode::SingleStep);
        let idx = option_index(&session, "coronal");
        session.pick(idx);
        assert_eq!(
            session.engine().phase(),
            Phase::Answered {
                index: 0,
                choice: ItemId::new("coronal"),
                correct: true
            }
        );
    }

    #[test]
    fn out_of_range_pick_is_ignored() {
        let mut session = session(ScoringMode::TwoStep);
        assert_eq!(
            session.pick(99),
            Transition::Ignored(IgnoredReason::UnknownChoice)
        );
    }

    #[test]
    fn progress_counts_answered_questions() {
        let mut session = session(ScoringMode::SingleStep);
        assert_eq!(session.progress().answered, 0);
        assert_eq!(session.progress().question_number, 1);

        session.pick(0);
        assert_eq!(session.progress().answered, 1);
        session.advance();
        let progress = session.progress();
        assert_eq!(progress.question_number, 2);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.percent(), 66);
    }

    #[test]
    fn options_vanish_in_review_and_return_after_restart() {
        let mut session = session(ScoringMode::SingleStep);
        for _ in 0..3 {
            session.pick(0);
            session.advance();
        }
        assert!(session.engine().is_reviewing());
        assert!(session.options().is_empty());
        assert!(session.progress().is_complete);
        assert_eq!(session.progress().percent(), 100);

        session.restart();
        assert_eq!(session.options().len(), 3);
        assert_eq!(session.engine().phase(), Phase::Presenting { index: 0 });
    }

    #[test]
    fn capped_options_still_contain_answer() {
        let settings = QuizSettingsDraft {
            max_options: Some(2),
            seed: Some(3),
            ..QuizSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let engine = QuizEngine::new(catalog::items(Section::Neurocranium).unwrap()).unwrap();
        let session = QuizSession::new(engine, OptionPlanner::new(&settings));
        assert_eq!(session.options().len(), 2);
        assert!(
            session
                .options()
                .iter()
                .any(|o| o.id == ItemId::new("frontal"))
        );
    }
}
