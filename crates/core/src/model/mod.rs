mod ids;
mod item;
mod media;
mod section;
mod session;
mod settings;

pub use ids::{ImageRef, ItemId, ParseIdError, SessionId};
pub use item::{QuizItem, QuizItemDraft, QuizItemError};
pub use media::{MediaError, MediaUri};
pub use section::{Section, UnknownSection};
pub use session::{SessionSummary, SessionSummaryError};
pub use settings::{OptionOrder, QuizSettings, QuizSettingsDraft, ScoringMode, SettingsError};
