//! User models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TweetId, UrlEntity, UserId};

/// A user account.
///
/// `id`, `name` and `username` are always returned; everything else only
/// when requested through [`UserField`](super::UserField) selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Handle without the leading `@`
    pub username: String,
    /// Account creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Profile bio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Pinned tweet, resolved through `includes.tweets`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_tweet_id: Option<TweetId>,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// Whether tweets are protected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    /// Follower/following counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<UserPublicMetrics>,
    /// Profile URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Verified flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Verification type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_type: Option<String>,
    /// URL entities in the profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<UserEntities>,
}

/// Public counts of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublicMetrics {
    /// Followers
    pub followers_count: u64,
    /// Accounts followed
    pub following_count: u64,
    /// Tweets posted
    pub tweet_count: u64,
    /// Lists the user is on
    pub listed_count: u64,
}

/// Entities in the user's profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntities {
    /// Entities of the profile URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<UrlEntities>,
    /// Entities of the bio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<UrlEntities>,
}

/// A bag of URL entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntities {
    /// URLs
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
}
