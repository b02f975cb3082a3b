//! Bearer credential.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Environment variable read by [`BearerToken::from_env`].
pub const BEARER_TOKEN_ENV: &str = "TWITTER_BEARER_TOKEN";

/// An app-only bearer token.
///
/// The secret is held in a [`SecretString`] and redacted from `Debug`
/// output.
///
/// # Example
///
/// ```
/// use twitter_v2_rs::BearerToken;
///
/// let token = BearerToken::new("AAAA-secret");
/// assert_eq!(format!("{:?}", token), "BearerToken([REDACTED])");
/// ```
#[derive(Clone)]
pub struct BearerToken {
    secret: SecretString,
}

impl BearerToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(token.into()),
        }
    }

    /// Read the token from `TWITTER_BEARER_TOKEN`.
    ///
    /// Fails with [`Error::Unauthenticated`] if the variable is unset or
    /// blank.
    pub fn from_env() -> Result<Self> {
        match std::env::var(BEARER_TOKEN_ENV) {
            Ok(value) if !value.trim().is_empty() => Ok(Self::new(value.trim())),
            _ => Err(Error::Unauthenticated),
        }
    }

    /// Returns `true` if the token is empty or only whitespace.
    pub fn is_empty(&self) -> bool {
        self.secret.expose_secret().trim().is_empty()
    }

    /// Value for the `Authorization` header.
    pub(crate) fn header_value(&self) -> String {
        format!("Bearer {}", self.secret.expose_secret())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

impl From<String> for BearerToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for BearerToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value() {
        let token = BearerToken::new("abc123");
        assert_eq!(token.header_value(), "Bearer abc123");
        assert!(!token.is_empty());
    }

    #[test]
    fn test_debug_redacts() {
        let token = BearerToken::from("super-secret");
        assert!(!format!("{token:?}").contains("super-secret"));
    }

    #[test]
    fn test_empty_token() {
        assert!(BearerToken::new("").is_empty());
        assert!(BearerToken::new("  \t").is_empty());
        assert!(!BearerToken::new(" a ").is_empty());
    }
}
