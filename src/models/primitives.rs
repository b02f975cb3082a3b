//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides strongly-typed wrappers around the string
//! identifiers the API uses, so a user ID is never passed where a tweet ID
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// A tweet ID (snowflake, transported as a string).
    ///
    /// # Example
    ///
    /// ```
    /// use twitter_v2_rs::TweetId;
    ///
    /// let id = TweetId::new("1460323737035677698");
    /// assert_eq!(id.as_str(), "1460323737035677698");
    /// ```
    TweetId
);

string_id!(
    /// A user ID.
    UserId
);

string_id!(
    /// A list ID.
    ListId
);

string_id!(
    /// A Space ID.
    SpaceId
);

string_id!(
    /// A server-assigned filtered-stream rule ID.
    RuleId
);

string_id!(
    /// A media key, the identifier linking tweets to their media.
    MediaKey
);

string_id!(
    /// A place ID.
    PlaceId
);

string_id!(
    /// A poll ID.
    PollId
);

string_id!(
    /// A topic ID.
    TopicId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweet_id() {
        let id = TweetId::new("20");
        assert_eq!(id.as_str(), "20");
        assert_eq!(id.to_string(), "20");
    }

    #[test]
    fn test_user_id_from_str() {
        let id: UserId = "2244994945".into();
        assert_eq!(id.as_ref(), "2244994945");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = RuleId::new("1165037377523306498");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"1165037377523306498\""
        );
        let back: RuleId = serde_json::from_str("\"1165037377523306498\"").unwrap();
        assert_eq!(back, id);
    }
}
