//! Field and expansion catalogs.
//!
//! Each enum here is one selector family: the values accepted by exactly one
//! query parameter (`tweet.fields`, `user.fields`, `expansions`, ...). The
//! family is part of the type, so a [`UserField`] can never be rendered into
//! `tweet.fields`.

use std::fmt;
use std::str::FromStr;

use crate::query::{FieldSelector, SelectorFamily};
use crate::Error;

macro_rules! selector_family {
    (
        $(#[$meta:meta])*
        $name:ident => $family:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every value in this family, in catalog order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Get the wire name of this selector.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl FieldSelector for $name {
            const FAMILY: SelectorFamily = SelectorFamily::$family;

            fn name(&self) -> &'static str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err(Error::InvalidSelector {
                        selector: s.to_string(),
                        expected: SelectorFamily::$family,
                    }),
                }
            }
        }
    };
}

selector_family! {
    /// Values for the `expansions` parameter.
    Expansion => Expansions {
        /// Polls attached to a tweet
        AttachmentsPollIds = "attachments.poll_ids",
        /// Media attached to a tweet
        AttachmentsMediaKeys = "attachments.media_keys",
        /// Tweet author
        AuthorId = "author_id",
        /// Earlier versions of an edited tweet
        EditHistoryTweetIds = "edit_history_tweet_ids",
        /// Users mentioned in a tweet
        EntitiesMentionsUsername = "entities.mentions.username",
        /// Tagged place
        GeoPlaceId = "geo.place_id",
        /// User being replied to
        InReplyToUserId = "in_reply_to_user_id",
        /// Quoted, retweeted or replied-to tweets
        ReferencedTweetsId = "referenced_tweets.id",
        /// Authors of referenced tweets
        ReferencedTweetsIdAuthorId = "referenced_tweets.id.author_id",
        /// A user's pinned tweet
        PinnedTweetId = "pinned_tweet_id",
        /// Users invited to a Space
        InvitedUserIds = "invited_user_ids",
        /// Speakers of a Space
        SpeakerIds = "speaker_ids",
        /// Creator of a Space
        CreatorId = "creator_id",
        /// Hosts of a Space
        HostIds = "host_ids",
        /// Topics of a Space
        TopicIds = "topic_ids",
        /// Owner of a list
        OwnerId = "owner_id",
    }
}

selector_family! {
    /// Values for the `tweet.fields` parameter.
    TweetField => Tweet {
        /// Attached media keys and poll IDs
        Attachments = "attachments",
        /// Author user ID
        AuthorId = "author_id",
        /// Context annotations
        ContextAnnotations = "context_annotations",
        /// Conversation root ID
        ConversationId = "conversation_id",
        /// Creation time
        CreatedAt = "created_at",
        /// Edit eligibility
        EditControls = "edit_controls",
        /// Edit history IDs
        EditHistoryTweetIds = "edit_history_tweet_ids",
        /// Parsed entities
        Entities = "entities",
        /// Geo tag
        Geo = "geo",
        /// Tweet ID
        Id = "id",
        /// Replied-to user ID
        InReplyToUserId = "in_reply_to_user_id",
        /// Detected language
        Lang = "lang",
        /// Private engagement metrics
        NonPublicMetrics = "non_public_metrics",
        /// Long-form text
        NoteTweet = "note_tweet",
        /// Organic engagement metrics
        OrganicMetrics = "organic_metrics",
        /// Sensitivity flag
        PossiblySensitive = "possibly_sensitive",
        /// Promoted engagement metrics
        PromotedMetrics = "promoted_metrics",
        /// Public engagement metrics
        PublicMetrics = "public_metrics",
        /// Referenced tweets
        ReferencedTweets = "referenced_tweets",
        /// Who can reply
        ReplySettings = "reply_settings",
        /// Posting client
        Source = "source",
        /// Tweet text
        Text = "text",
        /// Withholding details
        Withheld = "withheld",
    }
}

selector_family! {
    /// Values for the `user.fields` parameter.
    UserField => User {
        /// Account creation time
        CreatedAt = "created_at",
        /// Profile bio
        Description = "description",
        /// Parsed bio/url entities
        Entities = "entities",
        /// User ID
        Id = "id",
        /// Free-form location
        Location = "location",
        /// Display name
        Name = "name",
        /// Pinned tweet ID
        PinnedTweetId = "pinned_tweet_id",
        /// Avatar URL
        ProfileImageUrl = "profile_image_url",
        /// Protected account flag
        Protected = "protected",
        /// Follower/following counts
        PublicMetrics = "public_metrics",
        /// Profile URL
        Url = "url",
        /// Handle
        Username = "username",
        /// Verified flag
        Verified = "verified",
        /// Verification type
        VerifiedType = "verified_type",
        /// Withholding details
        Withheld = "withheld",
    }
}

selector_family! {
    /// Values for the `media.fields` parameter.
    MediaField => Media {
        /// Alt text
        AltText = "alt_text",
        /// Video duration
        DurationMs = "duration_ms",
        /// Pixel height
        Height = "height",
        /// Media key
        MediaKey = "media_key",
        /// Private metrics
        NonPublicMetrics = "non_public_metrics",
        /// Organic metrics
        OrganicMetrics = "organic_metrics",
        /// Preview image
        PreviewImageUrl = "preview_image_url",
        /// Promoted metrics
        PromotedMetrics = "promoted_metrics",
        /// Public metrics
        PublicMetrics = "public_metrics",
        /// Media type
        Type = "type",
        /// Media URL
        Url = "url",
        /// Video variants
        Variants = "variants",
        /// Pixel width
        Width = "width",
    }
}

selector_family! {
    /// Values for the `place.fields` parameter.
    PlaceField => Place {
        /// Enclosing place IDs
        ContainedWithin = "contained_within",
        /// Country name
        Country = "country",
        /// ISO country code
        CountryCode = "country_code",
        /// Full place name
        FullName = "full_name",
        /// GeoJSON bounding box
        Geo = "geo",
        /// Place ID
        Id = "id",
        /// Short name
        Name = "name",
        /// Place granularity
        PlaceType = "place_type",
    }
}

selector_family! {
    /// Values for the `poll.fields` parameter.
    PollField => Poll {
        /// Poll duration
        DurationMinutes = "duration_minutes",
        /// Close time
        EndDatetime = "end_datetime",
        /// Poll ID
        Id = "id",
        /// Poll options
        Options = "options",
        /// Open/closed
        VotingStatus = "voting_status",
    }
}

selector_family! {
    /// Values for the `space.fields` parameter.
    SpaceField => Space {
        /// Creation time
        CreatedAt = "created_at",
        /// Creator user ID
        CreatorId = "creator_id",
        /// End time
        EndedAt = "ended_at",
        /// Host user IDs
        HostIds = "host_ids",
        /// Space ID
        Id = "id",
        /// Invited user IDs
        InvitedUserIds = "invited_user_ids",
        /// Ticketed flag
        IsTicketed = "is_ticketed",
        /// Language
        Lang = "lang",
        /// Participant count
        ParticipantCount = "participant_count",
        /// Scheduled start
        ScheduledStart = "scheduled_start",
        /// Speaker user IDs
        SpeakerIds = "speaker_ids",
        /// Start time
        StartedAt = "started_at",
        /// Live/scheduled/ended
        State = "state",
        /// Subscriber count
        SubscriberCount = "subscriber_count",
        /// Title
        Title = "title",
        /// Topic IDs
        TopicIds = "topic_ids",
        /// Last update
        UpdatedAt = "updated_at",
    }
}

selector_family! {
    /// Values for the `topic.fields` parameter.
    TopicField => Topic {
        /// Topic ID
        Id = "id",
        /// Topic name
        Name = "name",
        /// Topic description
        Description = "description",
    }
}

selector_family! {
    /// Values for the `list.fields` parameter.
    ListField => List {
        /// Creation time
        CreatedAt = "created_at",
        /// Description
        Description = "description",
        /// Follower count
        FollowerCount = "follower_count",
        /// List ID
        Id = "id",
        /// Member count
        MemberCount = "member_count",
        /// List name
        Name = "name",
        /// Owner user ID
        OwnerId = "owner_id",
        /// Private flag
        Private = "private",
    }
}
