//! Spaces service.

use std::sync::Arc;

use crate::client::{ClientInner, Endpoint, Response};
use crate::models::{Space, SpaceId};
use crate::query::{LookupOptions, QueryOptions, SpaceSearchOptions};
use crate::{Error, Result};

const SPACE: Endpoint = Endpoint::get("/2/spaces/{id}");
const SPACES: Endpoint = Endpoint::get("/2/spaces");
const SEARCH: Endpoint = Endpoint::get("/2/spaces/search");

/// Service for Space lookups and search.
pub struct SpacesService {
    inner: Arc<ClientInner>,
}

impl SpacesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Look up one Space.
    pub async fn get(&self, id: &SpaceId, options: &LookupOptions) -> Result<Response<Space>> {
        self.inner
            .get_single(&SPACE, &[("id", id.as_str())], &options.to_params()?)
            .await
    }

    /// Look up to 100 Spaces.
    pub async fn get_many(
        &self,
        ids: &[SpaceId],
        options: &LookupOptions,
    ) -> Result<Response<Vec<Space>>> {
        if ids.is_empty() {
            return Err(Error::InvalidInput("at least one Space ID is required".to_string()));
        }
        let mut query = options.to_params()?;
        query.insert_list("ids", ids);
        self.inner.get_list(&SPACES, &[], &query).await
    }

    /// Search live and scheduled Spaces by title.
    pub async fn search(&self, options: &SpaceSearchOptions) -> Result<Response<Vec<Space>>> {
        self.inner
            .get_list(&SEARCH, &[], &options.to_params()?)
            .await
    }
}
