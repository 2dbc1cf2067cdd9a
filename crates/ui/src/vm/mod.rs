mod image_vm;
mod learning_vm;
mod menu_vm;
mod question_vm;
mod review_vm;
mod summary_vm;

pub use image_vm::{ImageVm, map_image};
pub use learning_vm::{LearningVm, SectionTabVm, map_learning};
pub use menu_vm::{MenuCardVm, map_menu};
pub use question_vm::{FeedbackVm, OptionState, OptionVm, QuestionVm, map_question};
pub use review_vm::{ReviewVm, map_review};
pub use summary_vm::{SummaryVm, map_summary};
