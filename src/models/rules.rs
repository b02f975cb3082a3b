//! Filtered-stream rule models.

use serde::{Deserialize, Serialize};

use super::RuleId;

/// A filter rule as stored on the server.
///
/// The `id` is assigned by the server; rules built locally for an add call
/// use [`NewRule`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRule {
    /// Server-assigned ID
    pub id: RuleId,
    /// Match expression
    pub value: String,
    /// Caller-chosen label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// A rule to be added.
///
/// # Example
///
/// ```
/// use twitter_v2_rs::models::NewRule;
///
/// let rule = NewRule::new("cat has:images").with_tag("cats with images");
/// assert_eq!(rule.value, "cat has:images");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRule {
    /// Match expression
    pub value: String,
    /// Caller-chosen label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl NewRule {
    /// Create a rule without a tag.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: None,
        }
    }

    /// Attach a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A rule that matched a filtered-stream item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingRule {
    /// Rule ID
    pub id: RuleId,
    /// Rule tag, if the rule has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Counts reported after a rule add/delete call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesSummary {
    /// Rules created
    #[serde(default)]
    pub created: u32,
    /// Rules rejected on add
    #[serde(default)]
    pub not_created: u32,
    /// Valid rules (dry runs)
    #[serde(default)]
    pub valid: u32,
    /// Invalid rules (dry runs)
    #[serde(default)]
    pub invalid: u32,
    /// Rules deleted
    #[serde(default)]
    pub deleted: u32,
    /// Rule IDs not deleted
    #[serde(default)]
    pub not_deleted: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rule_omits_absent_tag() {
        let json = serde_json::to_string(&NewRule::new("dog has:images")).unwrap();
        assert_eq!(json, r#"{"value":"dog has:images"}"#);

        let json = serde_json::to_string(&NewRule::new("cat").with_tag("cats")).unwrap();
        assert_eq!(json, r#"{"value":"cat","tag":"cats"}"#);
    }

    #[test]
    fn test_stream_rule_decodes_server_echo() {
        let rule: StreamRule = serde_json::from_value(serde_json::json!({
            "value": "cat has:images",
            "tag": "cats with images",
            "id": "1273026480692322304"
        }))
        .unwrap();
        assert_eq!(rule.id.as_str(), "1273026480692322304");
        assert_eq!(rule.tag.as_deref(), Some("cats with images"));
    }
}
