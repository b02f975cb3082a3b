//! Side-loaded entities: media, places, polls and topics.
//!
//! These are never primary payloads of the endpoints this client wraps;
//! they arrive in the `includes` table when the matching expansion is
//! requested.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MediaKey, PlaceId, PollId, TopicId};

/// A photo, video or animated GIF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Media key
    pub media_key: MediaKey,
    /// Media kind
    #[serde(rename = "type")]
    pub kind: MediaType,
    /// Direct URL (photos)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Preview image (videos)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
    /// Video duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Pixel height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Pixel width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Alt text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// Video variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<MediaVariant>>,
}

/// Kind of media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// Still image
    Photo,
    /// Video
    Video,
    /// Animated GIF
    AnimatedGif,
    /// Media kind not known to this client
    #[serde(other)]
    Unknown,
}

/// One encoding of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaVariant {
    /// Bitrate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u64>,
    /// MIME type
    pub content_type: String,
    /// Variant URL
    pub url: String,
}

/// A geographic place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Place ID
    pub id: PlaceId,
    /// Full name
    pub full_name: String,
    /// Short name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Country name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// ISO country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Enclosing place IDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contained_within: Option<Vec<PlaceId>>,
    /// GeoJSON geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<serde_json::Value>,
    /// Granularity (city, admin, poi, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
}

/// A poll attached to a tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Poll ID
    pub id: PollId,
    /// Choices
    pub options: Vec<PollOption>,
    /// Duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Close time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<DateTime<Utc>>,
    /// `open` or `closed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting_status: Option<String>,
}

/// A poll choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    /// 1-based position
    pub position: u32,
    /// Label
    pub label: String,
    /// Votes so far
    pub votes: u64,
}

/// A topic attached to a Space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Topic ID
    pub id: TopicId,
    /// Topic name
    pub name: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
