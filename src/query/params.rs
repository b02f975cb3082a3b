//! Rendered query parameters.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, Utc};

use super::selector::{encode_selectors, Selector, SelectorFamily};
use crate::Result;

/// Query parameters ready to be appended to a request URL.
///
/// Keys are kept sorted so the rendered query string is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Set a parameter only when a value is present.
    ///
    /// Integers render as decimal, booleans as `true`/`false`.
    pub fn insert_opt<T: Display>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.insert(name, value.to_string());
        }
    }

    /// Set a timestamp parameter (RFC 3339, second precision, `Z` suffix).
    pub fn insert_time(&mut self, name: &str, value: Option<&DateTime<Utc>>) {
        if let Some(value) = value {
            self.insert(name, value.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }

    /// Set a comma-joined list parameter; an empty list sends nothing.
    pub fn insert_list<I, T>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        if !joined.is_empty() {
            self.insert(name, joined);
        }
    }

    /// Render selectors into their family's parameter.
    ///
    /// Calling this twice for the same family merges: the earlier selectors
    /// keep their order and only new ones are appended.
    pub fn insert_selectors<I>(&mut self, family: SelectorFamily, selectors: I) -> Result<()>
    where
        I: IntoIterator<Item = Selector>,
    {
        let name = family.param_name();
        let mut all = Vec::new();
        if let Some(existing) = self.params.get(name) {
            for part in existing.split(',') {
                all.push(Selector::parse(family, part)?);
            }
        }
        all.extend(selectors);

        if let Some(value) = encode_selectors(family, all)? {
            self.insert(name, value);
        }
        Ok(())
    }

    /// Get a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Iterate over `(name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

/// An option set that renders itself into query parameters.
pub trait QueryOptions {
    /// Append this option set's parameters.
    fn append_to(&self, params: &mut QueryParams) -> Result<()>;

    /// Render into a fresh parameter map.
    fn to_params(&self) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        self.append_to(&mut params)?;
        Ok(params)
    }
}

impl QueryOptions for () {
    fn append_to(&self, _params: &mut QueryParams) -> Result<()> {
        Ok(())
    }
}

impl<T: QueryOptions> QueryOptions for Option<T> {
    fn append_to(&self, params: &mut QueryParams) -> Result<()> {
        match self {
            Some(options) => options.append_to(params),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expansion, UserField};
    use chrono::TimeZone;

    #[test]
    fn test_scalar_rendering() {
        let mut params = QueryParams::new();
        params.insert_opt("max_results", Some(100u32));
        params.insert_opt("dry_run", Some(true));
        params.insert_opt::<u32>("absent", None);
        params.insert_time(
            "start_time",
            Some(&Utc.with_ymd_and_hms(2021, 11, 15, 20, 35, 5).unwrap()),
        );

        assert_eq!(params.get("max_results"), Some("100"));
        assert_eq!(params.get("dry_run"), Some("true"));
        assert_eq!(params.get("absent"), None);
        assert_eq!(params.get("start_time"), Some("2021-11-15T20:35:05Z"));
    }

    #[test]
    fn test_empty_list_sends_nothing() {
        let mut params = QueryParams::new();
        params.insert_list::<_, String>("ids", Vec::new());
        assert!(params.is_empty());
    }

    #[test]
    fn test_insert_selectors_merges_distinct_calls() {
        let mut params = QueryParams::new();
        params
            .insert_selectors(
                SelectorFamily::User,
                [UserField::Name, UserField::Url].map(Selector::from),
            )
            .unwrap();
        params
            .insert_selectors(
                SelectorFamily::User,
                [UserField::Url, UserField::Verified].map(Selector::from),
            )
            .unwrap();

        assert_eq!(params.get("user.fields"), Some("name,url,verified"));
    }

    #[test]
    fn test_insert_selectors_validates_before_writing() {
        let mut params = QueryParams::new();
        let result = params.insert_selectors(
            SelectorFamily::User,
            [Selector::from(Expansion::AuthorId)],
        );
        assert!(result.is_err());
        assert!(params.is_empty());
    }

    #[test]
    fn test_iteration_is_key_ordered() {
        let mut params = QueryParams::new();
        params.insert("user.fields", "id");
        params.insert("expansions", "author_id");
        params.insert("max_results", "10");
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["expansions", "max_results", "user.fields"]);
    }

    #[test]
    fn test_unit_options_render_nothing() {
        assert!(().to_params().unwrap().is_empty());
        assert!(None::<()>.to_params().unwrap().is_empty());
    }
}
