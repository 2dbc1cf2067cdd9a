mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::QuizServiceError;
pub use plan::{AnswerOption, OptionPlan, OptionPlanner};
pub use progress::QuizProgress;
pub use service::QuizSession;
pub use workflow::QuizService;
