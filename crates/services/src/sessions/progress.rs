/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    /// 1-based number of the question on screen.
    pub question_number: usize,
    pub answered: usize,
    pub score: u32,
    pub is_complete: bool,
}

impl QuizProgress {
    /// Share of the quiz reached, counting the question on screen.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let reached = if self.is_complete {
            self.total
        } else {
            self.question_number
        };
        u32::try_from(reached * 100 / self.total).unwrap_or(100)
    }
}
