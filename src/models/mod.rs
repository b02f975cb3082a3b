//! Data models for the Twitter API v2.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Typed identifiers like `TweetId`, `UserId`, etc.
//! - [`fields`] - Field and expansion selector catalogs
//! - [`tweet`] - Tweets and their nested objects
//! - [`user`] - User accounts
//! - [`media`] - Media, places, polls and topics
//! - [`list`] - Lists and Spaces
//! - [`includes`] - The side-loaded `includes` table
//! - [`rules`] - Filtered-stream rules

pub mod primitives;
pub mod fields;
pub mod tweet;
pub mod user;
pub mod media;
pub mod list;
pub mod includes;
pub mod rules;

// Re-export commonly used types
pub use primitives::*;
pub use fields::*;
pub use tweet::*;
pub use user::*;
pub use media::*;
pub use list::*;
pub use includes::*;
pub use rules::*;
