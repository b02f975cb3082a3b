//! Lists service.

use std::sync::Arc;

use crate::client::{ClientInner, Endpoint, Response};
use crate::models::{List, ListId, Tweet, User};
use crate::query::{LookupOptions, QueryOptions, UserListOptions};
use crate::Result;

const LIST: Endpoint = Endpoint::get("/2/lists/{id}");
const LIST_TWEETS: Endpoint = Endpoint::get("/2/lists/{id}/tweets");
const LIST_MEMBERS: Endpoint = Endpoint::get("/2/lists/{id}/members");

/// Service for List lookups.
pub struct ListsService {
    inner: Arc<ClientInner>,
}

impl ListsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Look up one List.
    pub async fn get(&self, id: &ListId, options: &LookupOptions) -> Result<Response<List>> {
        self.inner
            .get_single(&LIST, &[("id", id.as_str())], &options.to_params()?)
            .await
    }

    /// Recent tweets from a List's members.
    ///
    /// Paging uses `pagination_token`, the same as member listing.
    pub async fn tweets(
        &self,
        id: &ListId,
        options: &UserListOptions,
    ) -> Result<Response<Vec<Tweet>>> {
        self.inner
            .get_list(&LIST_TWEETS, &[("id", id.as_str())], &options.to_params()?)
            .await
    }

    /// Members of a List.
    pub async fn members(
        &self,
        id: &ListId,
        options: &UserListOptions,
    ) -> Result<Response<Vec<User>>> {
        self.inner
            .get_list(&LIST_MEMBERS, &[("id", id.as_str())], &options.to_params()?)
            .await
    }
}
