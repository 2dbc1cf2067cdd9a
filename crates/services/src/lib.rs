#![forbid(unsafe_code)]

pub mod error;
pub mod learning;
pub mod score_board;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::QuizServiceError;
pub use learning::LearningBrowser;
pub use score_board::ScoreBoard;
pub use sessions::{AnswerOption, OptionPlan, OptionPlanner, QuizProgress, QuizService, QuizSession};
