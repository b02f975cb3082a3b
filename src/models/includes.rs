//! The `includes` side-table.
//!
//! Entities pulled in by expansion selectors arrive in a separate top-level
//! bucket, grouped by type. Primary entities point at them only through ID
//! fields (`author_id`, `attachments.media_keys`, ...), so resolution is a
//! lookup, never a nested reference.

use serde::{Deserialize, Serialize};

use super::{Media, MediaKey, Place, PlaceId, Poll, PollId, Topic, TopicId, Tweet, TweetId, User, UserId};

/// Related entities side-loaded with a response.
///
/// Each bucket keeps the order the API sent it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    /// Expanded tweets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tweets: Vec<Tweet>,
    /// Expanded users
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    /// Expanded media
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<Media>,
    /// Expanded places
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<Place>,
    /// Expanded polls
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polls: Vec<Poll>,
    /// Expanded topics
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Topic>,
}

impl Includes {
    /// Returns `true` if no bucket holds anything.
    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
            && self.users.is_empty()
            && self.media.is_empty()
            && self.places.is_empty()
            && self.polls.is_empty()
            && self.topics.is_empty()
    }

    /// Look up an expanded tweet.
    pub fn tweet(&self, id: &TweetId) -> Option<&Tweet> {
        self.tweets.iter().find(|t| &t.id == id)
    }

    /// Look up an expanded user.
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Look up expanded media.
    pub fn media(&self, key: &MediaKey) -> Option<&Media> {
        self.media.iter().find(|m| &m.media_key == key)
    }

    /// Look up an expanded place.
    pub fn place(&self, id: &PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| &p.id == id)
    }

    /// Look up an expanded poll.
    pub fn poll(&self, id: &PollId) -> Option<&Poll> {
        self.polls.iter().find(|p| &p.id == id)
    }

    /// Look up an expanded topic.
    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| &t.id == id)
    }

    /// Resolve the author of a tweet, if `author_id` was expanded.
    pub fn author_of(&self, tweet: &Tweet) -> Option<&User> {
        self.user(tweet.author_id.as_ref()?)
    }

    /// Resolve every media item attached to a tweet that is present here.
    pub fn media_of<'a>(&'a self, tweet: &'a Tweet) -> impl Iterator<Item = &'a Media> + 'a {
        tweet
            .attachments
            .iter()
            .flat_map(|a| a.media_keys.iter().flatten())
            .filter_map(move |key| self.media(key))
    }
}
