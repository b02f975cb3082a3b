//! Users service for account lookup and follow graphs.

use std::sync::Arc;

use crate::client::{ClientInner, Endpoint, PaginatedStream, Response};
use crate::models::{User, UserId};
use crate::query::{LookupOptions, QueryOptions, UserListOptions};
use crate::{Error, Result};

const USER: Endpoint = Endpoint::get("/2/users/{id}");
const USERS: Endpoint = Endpoint::get("/2/users");
const BY_USERNAME: Endpoint = Endpoint::get("/2/users/by/username/{username}");
const BY_USERNAMES: Endpoint = Endpoint::get("/2/users/by");
const ME: Endpoint = Endpoint::get("/2/users/me");
const FOLLOWERS: Endpoint = Endpoint::get("/2/users/{id}/followers");
const FOLLOWING: Endpoint = Endpoint::get("/2/users/{id}/following");

/// Service for user operations.
///
/// # Example
///
/// ```no_run
/// use twitter_v2_rs::query::LookupOptions;
///
/// # async fn example(client: twitter_v2_rs::TwitterClient) -> twitter_v2_rs::Result<()> {
/// let user = client.users().by_username("TwitterDev", &LookupOptions::new()).await?;
/// println!("{} is user {}", user.data.username, user.data.id);
/// # Ok(())
/// # }
/// ```
pub struct UsersService {
    inner: Arc<ClientInner>,
}

impl UsersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Look up one user by ID.
    pub async fn get(&self, id: &UserId, options: &LookupOptions) -> Result<Response<User>> {
        self.inner
            .get_single(&USER, &[("id", id.as_str())], &options.to_params()?)
            .await
    }

    /// Look up to 100 users by ID.
    pub async fn get_many(
        &self,
        ids: &[UserId],
        options: &LookupOptions,
    ) -> Result<Response<Vec<User>>> {
        if ids.is_empty() {
            return Err(Error::InvalidInput("at least one user ID is required".to_string()));
        }
        let mut query = options.to_params()?;
        query.insert_list("ids", ids);
        self.inner.get_list(&USERS, &[], &query).await
    }

    /// Look up one user by handle (without the `@`).
    pub async fn by_username(&self, username: &str, options: &LookupOptions) -> Result<Response<User>> {
        self.inner
            .get_single(&BY_USERNAME, &[("username", username)], &options.to_params()?)
            .await
    }

    /// Look up to 100 users by handle.
    pub async fn by_usernames(
        &self,
        usernames: &[&str],
        options: &LookupOptions,
    ) -> Result<Response<Vec<User>>> {
        if usernames.is_empty() {
            return Err(Error::InvalidInput("at least one username is required".to_string()));
        }
        let mut query = options.to_params()?;
        query.insert_list("usernames", usernames);
        self.inner.get_list(&BY_USERNAMES, &[], &query).await
    }

    /// The user the credential acts for.
    ///
    /// Requires a user-context token; app-only tokens get an API error.
    pub async fn me(&self, options: &LookupOptions) -> Result<Response<User>> {
        self.inner.get_single(&ME, &[], &options.to_params()?).await
    }

    /// One page of a user's followers.
    pub async fn followers(
        &self,
        id: &UserId,
        options: &UserListOptions,
    ) -> Result<Response<Vec<User>>> {
        self.inner
            .get_list(&FOLLOWERS, &[("id", id.as_str())], &options.to_params()?)
            .await
    }

    /// All followers of a user, fetched page by page.
    pub fn followers_stream(&self, id: &UserId, options: UserListOptions) -> PaginatedStream<User> {
        self.inner
            .paginate(FOLLOWERS, vec![("id", id.to_string())], options)
    }

    /// One page of the accounts a user follows.
    pub async fn following(
        &self,
        id: &UserId,
        options: &UserListOptions,
    ) -> Result<Response<Vec<User>>> {
        self.inner
            .get_list(&FOLLOWING, &[("id", id.as_str())], &options.to_params()?)
            .await
    }

    /// All accounts a user follows, fetched page by page.
    pub fn following_stream(&self, id: &UserId, options: UserListOptions) -> PaginatedStream<User> {
        self.inner
            .paginate(FOLLOWING, vec![("id", id.to_string())], options)
    }
}
