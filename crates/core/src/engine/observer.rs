/// One-way listener for score increments.
///
/// Called synchronously, once per correct answer, right after the score
/// changes. Restarting a session does not notify.
pub trait ScoreObserver {
    fn score_changed(&mut self, new_score: u32);
}

impl<F> ScoreObserver for F
where
    F: FnMut(u32),
{
    fn score_changed(&mut self, new_score: u32) {
        self(new_score);
    }
}
