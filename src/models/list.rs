//! List and Space models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ListId, SpaceId, TopicId, UserId};

/// A curated list of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// List ID
    pub id: ListId,
    /// List name
    pub name: String,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Follower count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    /// Member count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
    /// Owner, resolved through `includes.users`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    /// Private flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

/// A live audio conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Space ID
    pub id: SpaceId,
    /// Lifecycle state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<SpaceState>,
    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Start time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// End time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    /// Scheduled start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
    /// Creator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<UserId>,
    /// Hosts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_ids: Option<Vec<UserId>>,
    /// Speakers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_ids: Option<Vec<UserId>>,
    /// Invited users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invited_user_ids: Option<Vec<UserId>>,
    /// Topics, resolved through `includes.topics`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_ids: Option<Vec<TopicId>>,
    /// Listener count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u64>,
    /// Reminder subscribers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<u64>,
    /// Ticketed flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ticketed: Option<bool>,
    /// Language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// Lifecycle state of a Space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceState {
    /// Happening now
    Live,
    /// Not started yet
    Scheduled,
    /// Finished
    Ended,
    /// State not known to this client
    #[serde(other)]
    Unknown,
}

impl SpaceState {
    /// Get the wire name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceState::Live => "live",
            SpaceState::Scheduled => "scheduled",
            SpaceState::Ended => "ended",
            SpaceState::Unknown => "unknown",
        }
    }
}
