//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from quiz-core
pub use quiz_core::{Feedback, FeedbackKind, Group, Item, Next, Progress, SessionStats};

/// Public view of an item. Only the id is sent so the map can highlight it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: String,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().to_string(),
        }
    }
}

/// Region or list summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub name: String,
    pub display_name: String,
    pub size: usize,
}

impl From<&Group> for GroupSummary {
    fn from(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            display_name: group.display_name.clone(),
            size: group.members.len(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupsResponse {
    pub regions: Vec<GroupSummary>,
    pub lists: Vec<GroupSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub region: String,
    pub list: String,
    /// Fixes the shuffle order, mostly for testing.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub item: Option<ItemView>,
    pub false_guesses: u32,
    pub progress: Progress,
    pub stats: SessionStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuessRequest {
    pub guess: String,
}

/// What the client shows after a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStatus {
    Retry,
    Item,
    Done,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextView {
    pub status: NextStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemView>,
}

impl From<&Next> for NextView {
    fn from(next: &Next) -> Self {
        match next {
            Next::Retry(item) => Self {
                status: NextStatus::Retry,
                item: Some(item.into()),
            },
            Next::Item(item) => Self {
                status: NextStatus::Item,
                item: Some(item.into()),
            },
            Next::Done => Self {
                status: NextStatus::Done,
                item: None,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuessResponse {
    pub feedback: Feedback,
    pub next: NextView,
    pub progress: Progress,
    pub stats: SessionStats,
}
