//! Core map quiz library shared by the server and any other front end.
//!
//! Provides:
//! - Adaptive question scheduler with a spaced retest queue
//! - Answer classification for typed guesses (exact, misspelled, alias, wrong)
//! - Catalog loading from the generated country JSON assets
//! - Session glue tying the two together

pub mod catalog;
pub mod error;
pub mod matching;
pub mod scheduler;
pub mod session;
pub mod types;

pub use catalog::{parse_items, Catalog, Group};
pub use error::{QuizError, Result};
pub use matching::{
    char_diff, classify, hint, is_correct_answer, misspelled_check, unofficial_check,
    Classification, DiffSegment, DiffType, Misspelling,
};
pub use scheduler::{Progress, Scheduler};
pub use session::{Next, Session, SessionStats, Turn};
pub use types::{
    Feedback, FeedbackKind, GuessOutcome, Item, MatchSettings, SchedulerConfig, Segment, Tag,
};
