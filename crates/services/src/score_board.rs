use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use quiz_core::engine::ScoreObserver;
use quiz_core::model::Section;

#[derive(Debug, Default)]
struct BoardState {
    latest: BTreeMap<Section, u32>,
    notifications: usize,
}

/// Host-side record of the latest score reported by each section's quiz.
///
/// Clones share the same board. Single-threaded: the quiz loop and the host
/// live on one thread.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    state: Rc<RefCell<BoardState>>,
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that records every increment for `section`.
    #[must_use]
    pub fn observer_for(&self, section: Section) -> impl ScoreObserver + 'static {
        let state = Rc::clone(&self.state);
        move |score: u32| {
            let mut state = state.borrow_mut();
            state.latest.insert(section, score);
            state.notifications += 1;
        }
    }

    #[must_use]
    pub fn latest(&self, section: Section) -> u32 {
        self.state
            .borrow()
            .latest
            .get(&section)
            .copied()
            .unwrap_or(0)
    }

    /// Sum of the latest scores over all sections.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.state.borrow().latest.values().sum()
    }

    /// Number of notifications received so far.
    #[must_use]
    pub fn notifications(&self) -> usize {
        self.state.borrow().notifications
    }

    /// Forget a section's score when its quiz starts over.
    pub fn reset(&self, section: Section) {
        self.state.borrow_mut().latest.remove(&section);
    }
}
