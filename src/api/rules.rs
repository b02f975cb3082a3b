//! Filtered-stream rule management.
//!
//! Rules are plain request/response calls; the filtered stream picks up
//! changes without reconnecting.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::client::{ClientInner, Endpoint, Response};
use crate::models::{NewRule, RuleId, StreamRule};
use crate::query::{QueryOptions, QueryParams, RulesQuery};
use crate::{Error, Result};

const RULES: Endpoint = Endpoint::get("/2/tweets/search/stream/rules");
const UPDATE_RULES: Endpoint = Endpoint::post("/2/tweets/search/stream/rules");

/// A batch of rule additions and deletions.
///
/// # Example
///
/// ```
/// use twitter_v2_rs::api::RuleUpdate;
/// use twitter_v2_rs::models::NewRule;
///
/// let update = RuleUpdate::new()
///     .add(NewRule::new("cat has:images").with_tag("cats"))
///     .delete("1273028376882589696");
/// assert!(!update.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleUpdate {
    /// Rules to create
    pub add: Vec<NewRule>,
    /// IDs of rules to remove
    pub delete: Vec<RuleId>,
}

impl RuleUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a rule for creation.
    pub fn add(mut self, rule: NewRule) -> Self {
        self.add.push(rule);
        self
    }

    /// Queue a rule ID for deletion.
    pub fn delete(mut self, id: impl Into<RuleId>) -> Self {
        self.delete.push(id.into());
        self
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.delete.is_empty()
    }

    /// Render the request body, omitting whichever half is empty.
    pub fn to_body(&self) -> Result<serde_json::Value> {
        if self.is_empty() {
            return Err(Error::EmptyRuleOperation);
        }
        let body = RulesBody {
            add: (!self.add.is_empty()).then_some(self.add.as_slice()),
            delete: (!self.delete.is_empty()).then_some(DeleteIds { ids: &self.delete }),
        };
        Ok(serde_json::to_value(body)?)
    }
}

#[derive(Serialize)]
struct RulesBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    add: Option<&'a [NewRule]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delete: Option<DeleteIds<'a>>,
}

#[derive(Serialize)]
struct DeleteIds<'a> {
    ids: &'a [RuleId],
}

/// Service for filtered-stream rules.
///
/// Write calls return the rules the server echoed back in `data` and the
/// add/delete counts in `meta.summary`. Rules the server rejected appear in
/// [`Response::errors`].
///
/// # Example
///
/// ```no_run
/// use twitter_v2_rs::models::NewRule;
///
/// # async fn example(client: twitter_v2_rs::TwitterClient) -> twitter_v2_rs::Result<()> {
/// let created = client
///     .rules()
///     .add(&[NewRule::new("dog has:images").with_tag("dogs")], false)
///     .await?;
/// for rule in &created.data {
///     println!("{} -> {}", rule.id, rule.value);
/// }
/// # Ok(())
/// # }
/// ```
pub struct RulesService {
    inner: Arc<ClientInner>,
}

impl RulesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List active rules.
    pub async fn list(&self, query: &RulesQuery) -> Result<Response<Vec<StreamRule>>> {
        self.inner
            .get_list(&RULES, &[], &query.to_params()?)
            .await
    }

    /// Create rules. With `dry_run` the server only validates them.
    pub async fn add(&self, rules: &[NewRule], dry_run: bool) -> Result<Response<Vec<StreamRule>>> {
        if rules.is_empty() {
            return Err(Error::EmptyRuleOperation);
        }
        let body = RulesBody {
            add: Some(rules),
            delete: None,
        };
        self.post(&body, dry_run).await
    }

    /// Delete rules by ID.
    ///
    /// The `delete.ids` structure is always sent, even for an empty list.
    pub async fn delete(&self, ids: &[RuleId], dry_run: bool) -> Result<Response<Vec<StreamRule>>> {
        let body = RulesBody {
            add: None,
            delete: Some(DeleteIds { ids }),
        };
        self.post(&body, dry_run).await
    }

    /// Apply additions and deletions in one call.
    ///
    /// Fails with [`Error::EmptyRuleOperation`] before any I/O if both lists
    /// are empty.
    pub async fn update(&self, update: &RuleUpdate, dry_run: bool) -> Result<Response<Vec<StreamRule>>> {
        let body = update.to_body()?;
        self.post(&body, dry_run).await
    }

    async fn post<B: Serialize>(&self, body: &B, dry_run: bool) -> Result<Response<Vec<StreamRule>>> {
        let mut query = QueryParams::new();
        if dry_run {
            query.insert_opt("dry_run", Some(true));
        }
        let response = self.inner.post_list(&UPDATE_RULES, &query, body).await?;

        if let Some(summary) = response.meta.as_ref().and_then(|m| m.summary.as_ref()) {
            debug!(
                created = summary.created,
                not_created = summary.not_created,
                deleted = summary.deleted,
                not_deleted = summary.not_deleted,
                dry_run,
                "Rules updated"
            );
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_rejected() {
        assert!(matches!(
            RuleUpdate::new().to_body(),
            Err(Error::EmptyRuleOperation)
        ));
    }

    #[test]
    fn test_update_body_omits_empty_half() {
        let body = RuleUpdate::new()
            .add(NewRule::new("cat has:images"))
            .to_body()
            .unwrap();
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"add":[{"value":"cat has:images"}]}"#
        );

        let body = RuleUpdate::new().delete("1").delete("2").to_body().unwrap();
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"delete":{"ids":["1","2"]}}"#
        );
    }

    #[test]
    fn test_delete_body_keeps_structure_when_empty() {
        let body = RulesBody {
            add: None,
            delete: Some(DeleteIds { ids: &[] }),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"delete":{"ids":[]}}"#
        );
    }

    #[test]
    fn test_combined_body() {
        let body = RuleUpdate::new()
            .delete("9")
            .add(NewRule::new("dog").with_tag("dogs"))
            .to_body()
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "add": [{ "value": "dog", "tag": "dogs" }],
                "delete": { "ids": ["9"] }
            })
        );
    }
}
