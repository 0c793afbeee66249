//! Core types for the map quiz.

use serde::{Deserialize, Serialize};

/// An askable quiz subject.
///
/// `names` is never empty; the first entry is the display name and doubles as
/// the item's identifier within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub names: Vec<String>,
    pub aliases: Vec<String>,
}

impl Item {
    /// Create an item. Callers guarantee `names` is non-empty.
    pub fn new(names: Vec<String>, aliases: Vec<String>) -> Self {
        debug_assert!(!names.is_empty(), "item must have at least one accepted name");
        Self { names, aliases }
    }

    /// Identifier of the item (its primary name).
    pub fn id(&self) -> &str {
        &self.names[0]
    }

    /// Display name shown once the answer is revealed.
    pub fn display_name(&self) -> &str {
        self.id()
    }
}

/// Result of one round, reported back to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub item: String,
    pub was_wrong: bool,
}

impl GuessOutcome {
    pub fn new(item: &Item, was_wrong: bool) -> Self {
        Self {
            item: item.id().to_string(),
            was_wrong,
        }
    }
}

/// Scheduler parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Turns until the first retest; doubled for every point of streak.
    pub retest_base: u64,
    /// Streak at which an item retires. The drain phase may lower it, never raise it.
    pub retirement_threshold: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            retest_base: 3,
            retirement_threshold: 4,
        }
    }
}

/// Answer matching options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Treat õ ä ö ü š ž as their plain Latin counterparts.
    pub fold_diacritics: bool,
}

/// How a guess was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Correct,
    Misspelled,
    Alias,
    Wrong,
}

/// Highlight tag for a feedback segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Plain,
    /// Extra in the guess.
    Inserted,
    /// Missing from the guess.
    Deleted,
}

/// A run of text sharing one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub tag: Tag,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: Tag::Plain,
        }
    }
}

/// Feedback payload handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub segments: Vec<Segment>,
}

impl Feedback {
    /// Feedback made of a single plain message.
    pub fn message(kind: FeedbackKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            segments: vec![Segment::plain(text)],
        }
    }

    /// Concatenated text of all segments.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}
