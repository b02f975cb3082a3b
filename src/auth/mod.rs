//! Authentication for the Twitter API v2.
//!
//! Every request carries an app-only bearer token as an
//! `Authorization: Bearer <token>` header. The token is supplied once, when
//! the client is built, and is never refreshed by this crate.
//!
//! ```no_run
//! use twitter_v2_rs::{BearerToken, ClientConfig, TwitterClient};
//!
//! # fn example() -> twitter_v2_rs::Result<()> {
//! // Read TWITTER_BEARER_TOKEN from the environment
//! let token = BearerToken::from_env()?;
//! let client = TwitterClient::new(token, ClientConfig::default())?;
//! # Ok(())
//! # }
//! ```

mod bearer;

pub use bearer::{BearerToken, BEARER_TOKEN_ENV};
