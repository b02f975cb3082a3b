//! Tweet models.
//!
//! Tweets are sparse: apart from `id` and `text`, every attribute is only
//! present when requested through [`TweetField`](super::TweetField)
//! selectors, so each one is an `Option`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MediaKey, PlaceId, PollId, TweetId, UserId};

/// A tweet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    /// Tweet ID
    pub id: TweetId,
    /// Tweet text
    pub text: String,
    /// Author user ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// ID of the tweet that started the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<TweetId>,
    /// ID of the user this tweet replies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to_user_id: Option<UserId>,
    /// Quoted, retweeted or replied-to tweets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_tweets: Option<Vec<ReferencedTweet>>,
    /// Attached media and polls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Attachments>,
    /// Geo tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<TweetGeo>,
    /// Public engagement counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<TweetPublicMetrics>,
    /// Context annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_annotations: Option<Vec<ContextAnnotation>>,
    /// Parsed entities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
    /// BCP47 language tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Posting client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Sensitivity flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possibly_sensitive: Option<bool>,
    /// Who may reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_settings: Option<ReplySettings>,
    /// IDs of every version of this tweet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_history_tweet_ids: Option<Vec<TweetId>>,
}

impl Tweet {
    /// Returns the ID of the tweet this one replies to, if any.
    pub fn replied_to(&self) -> Option<&TweetId> {
        self.referenced(ReferenceType::RepliedTo)
    }

    /// Returns the ID of the tweet this one quotes, if any.
    pub fn quoted(&self) -> Option<&TweetId> {
        self.referenced(ReferenceType::Quoted)
    }

    /// Returns the ID of the retweeted tweet, if this is a retweet.
    pub fn retweeted(&self) -> Option<&TweetId> {
        self.referenced(ReferenceType::Retweeted)
    }

    fn referenced(&self, kind: ReferenceType) -> Option<&TweetId> {
        self.referenced_tweets
            .as_ref()?
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| &r.id)
    }
}

/// A reference from one tweet to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedTweet {
    /// Kind of reference
    #[serde(rename = "type")]
    pub kind: ReferenceType,
    /// Referenced tweet ID
    pub id: TweetId,
}

/// How one tweet references another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    /// Retweet
    Retweeted,
    /// Quote tweet
    Quoted,
    /// Reply
    RepliedTo,
    /// Reference kind not known to this client
    #[serde(other)]
    Unknown,
}

/// Who may reply to a tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplySettings {
    /// Anyone
    Everyone,
    /// Mentioned users only
    MentionedUsers,
    /// Followed users only
    Following,
    /// Setting not known to this client
    #[serde(other)]
    Unknown,
}

/// Foreign keys to side-loaded media and polls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachments {
    /// Media keys, resolved through `includes.media`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_keys: Option<Vec<MediaKey>>,
    /// Poll IDs, resolved through `includes.polls`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_ids: Option<Vec<PollId>>,
}

/// Geo tag of a tweet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetGeo {
    /// Tagged place, resolved through `includes.places`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<PlaceId>,
    /// Exact coordinates, when shared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<serde_json::Value>,
}

/// Public engagement counts of a tweet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetPublicMetrics {
    /// Retweets
    pub retweet_count: u64,
    /// Replies
    pub reply_count: u64,
    /// Likes
    pub like_count: u64,
    /// Quotes
    pub quote_count: u64,
    /// Bookmarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmark_count: Option<u64>,
    /// Impressions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impression_count: Option<u64>,
}

/// A context annotation inferred from tweet text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextAnnotation {
    /// Annotation domain
    pub domain: AnnotationRef,
    /// Annotated entity
    pub entity: AnnotationRef,
}

/// Domain or entity of a context annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRef {
    /// ID
    pub id: String,
    /// Name
    pub name: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Entities parsed out of tweet text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    /// Hashtags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<TagEntity>>,
    /// Cashtags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashtags: Option<Vec<TagEntity>>,
    /// Mentions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Vec<MentionEntity>>,
    /// URLs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<UrlEntity>>,
}

/// A hashtag or cashtag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntity {
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
    /// Tag text without the leading symbol
    pub tag: String,
}

/// A user mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEntity {
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
    /// Mentioned handle
    pub username: String,
    /// Mentioned user ID, when resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
}

/// A URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntity {
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
    /// Shortened URL
    pub url: String,
    /// Expanded URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_url: Option<String>,
    /// Display URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
}
