//! Selector families and their canonical encoding.

use std::fmt;

use crate::models::{
    Expansion, ListField, MediaField, PlaceField, PollField, SpaceField, TopicField, TweetField,
    UserField,
};
use crate::{Error, Result};

/// A named group of selectors valid for exactly one query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectorFamily {
    /// `expansions`
    Expansions,
    /// `tweet.fields`
    Tweet,
    /// `user.fields`
    User,
    /// `media.fields`
    Media,
    /// `place.fields`
    Place,
    /// `poll.fields`
    Poll,
    /// `space.fields`
    Space,
    /// `topic.fields`
    Topic,
    /// `list.fields`
    List,
}

impl SelectorFamily {
    /// Every family.
    pub const ALL: &'static [SelectorFamily] = &[
        SelectorFamily::Expansions,
        SelectorFamily::Tweet,
        SelectorFamily::User,
        SelectorFamily::Media,
        SelectorFamily::Place,
        SelectorFamily::Poll,
        SelectorFamily::Space,
        SelectorFamily::Topic,
        SelectorFamily::List,
    ];

    /// The query parameter this family renders into.
    pub fn param_name(&self) -> &'static str {
        match self {
            SelectorFamily::Expansions => "expansions",
            SelectorFamily::Tweet => "tweet.fields",
            SelectorFamily::User => "user.fields",
            SelectorFamily::Media => "media.fields",
            SelectorFamily::Place => "place.fields",
            SelectorFamily::Poll => "poll.fields",
            SelectorFamily::Space => "space.fields",
            SelectorFamily::Topic => "topic.fields",
            SelectorFamily::List => "list.fields",
        }
    }

    /// Look up the catalog name of `name` within this family.
    fn canonical(&self, name: &str) -> Result<&'static str> {
        Ok(match self {
            SelectorFamily::Expansions => name.parse::<Expansion>()?.as_str(),
            SelectorFamily::Tweet => name.parse::<TweetField>()?.as_str(),
            SelectorFamily::User => name.parse::<UserField>()?.as_str(),
            SelectorFamily::Media => name.parse::<MediaField>()?.as_str(),
            SelectorFamily::Place => name.parse::<PlaceField>()?.as_str(),
            SelectorFamily::Poll => name.parse::<PollField>()?.as_str(),
            SelectorFamily::Space => name.parse::<SpaceField>()?.as_str(),
            SelectorFamily::Topic => name.parse::<TopicField>()?.as_str(),
            SelectorFamily::List => name.parse::<ListField>()?.as_str(),
        })
    }
}

impl fmt::Display for SelectorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_name())
    }
}

/// A catalog enum whose values belong to one [`SelectorFamily`].
pub trait FieldSelector: Copy + PartialEq {
    /// The family every value of this type belongs to.
    const FAMILY: SelectorFamily;

    /// Wire name of the value.
    fn name(&self) -> &'static str;
}

/// A family-tagged selector token.
///
/// Typed catalog values convert into this losslessly; names assembled at
/// runtime go through [`Selector::parse`], which only accepts catalog
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector {
    family: SelectorFamily,
    name: &'static str,
}

impl Selector {
    /// Build a selector from a runtime name, checking it against the
    /// family's catalog.
    ///
    /// # Example
    ///
    /// ```
    /// use twitter_v2_rs::query::{Selector, SelectorFamily};
    ///
    /// let s = Selector::parse(SelectorFamily::Tweet, "created_at").unwrap();
    /// assert_eq!(s.name(), "created_at");
    /// assert!(Selector::parse(SelectorFamily::Tweet, "username").is_err());
    /// ```
    pub fn parse(family: SelectorFamily, name: &str) -> Result<Self> {
        Ok(Self {
            family,
            name: family.canonical(name)?,
        })
    }

    /// The family this selector belongs to.
    pub fn family(&self) -> SelectorFamily {
        self.family
    }

    /// Wire name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<F: FieldSelector> From<F> for Selector {
    fn from(value: F) -> Self {
        Self {
            family: F::FAMILY,
            name: value.name(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Render selectors for the parameter of `family`.
///
/// Duplicates are dropped (first occurrence wins) and the rest are joined
/// with a single comma. Returns `Ok(None)` when nothing is selected, and
/// [`Error::InvalidSelector`] if any selector belongs to another family.
///
/// # Example
///
/// ```
/// use twitter_v2_rs::models::TweetField;
/// use twitter_v2_rs::query::{encode_selectors, Selector, SelectorFamily};
///
/// let value = encode_selectors(
///     SelectorFamily::Tweet,
///     [TweetField::CreatedAt, TweetField::Lang, TweetField::CreatedAt].map(Selector::from),
/// )
/// .unwrap();
/// assert_eq!(value.as_deref(), Some("created_at,lang"));
/// ```
pub fn encode_selectors<I>(family: SelectorFamily, selectors: I) -> Result<Option<String>>
where
    I: IntoIterator<Item = Selector>,
{
    let mut names: Vec<&'static str> = Vec::new();
    for selector in selectors {
        if selector.family != family {
            return Err(Error::InvalidSelector {
                selector: selector.name.to_string(),
                expected: family,
            });
        }
        if !names.contains(&selector.name) {
            names.push(selector.name);
        }
    }

    if names.is_empty() {
        Ok(None)
    } else {
        Ok(Some(names.join(",")))
    }
}

/// An ordered, duplicate-free set of selectors from one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet<F> {
    items: Vec<F>,
}

impl<F> Default for FieldSet<F> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<F: FieldSelector> FieldSet<F> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selector unless it is already present.
    pub fn insert(&mut self, value: F) -> bool {
        if self.items.contains(&value) {
            false
        } else {
            self.items.push(value);
            true
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, value: F) -> Self {
        self.insert(value);
        self
    }

    /// Union with `other`, keeping this set's order and appending the new
    /// elements of `other` in their order.
    pub fn merge(mut self, other: &FieldSet<F>) -> Self {
        self.extend(other.items.iter().copied());
        self
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of selectors.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if `value` is selected.
    pub fn contains(&self, value: &F) -> bool {
        self.items.contains(value)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.items.iter()
    }

    /// Render this set through [`encode_selectors`].
    pub fn encode(&self) -> Result<Option<String>> {
        encode_selectors(F::FAMILY, self.items.iter().map(|f| Selector::from(*f)))
    }
}

impl<F: FieldSelector> Extend<F> for FieldSet<F> {
    fn extend<T: IntoIterator<Item = F>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<F: FieldSelector> FromIterator<F> for FieldSet<F> {
    fn from_iter<T: IntoIterator<Item = F>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<F: FieldSelector, const N: usize> From<[F; N]> for FieldSet<F> {
    fn from(values: [F; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<F: FieldSelector> From<Vec<F>> for FieldSet<F> {
    fn from(values: Vec<F>) -> Self {
        values.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_names() {
        assert_eq!(SelectorFamily::Expansions.param_name(), "expansions");
        assert_eq!(SelectorFamily::Tweet.param_name(), "tweet.fields");
        assert_eq!(SelectorFamily::Topic.to_string(), "topic.fields");
    }

    #[test]
    fn test_encode_dedupes_in_first_occurrence_order() {
        let value = encode_selectors(
            SelectorFamily::User,
            [
                UserField::Username,
                UserField::Id,
                UserField::Username,
                UserField::CreatedAt,
                UserField::Id,
            ]
            .map(Selector::from),
        )
        .unwrap();
        assert_eq!(value.as_deref(), Some("username,id,created_at"));
    }

    #[test]
    fn test_encode_empty_is_none() {
        assert_eq!(encode_selectors(SelectorFamily::Media, []).unwrap(), None);
    }

    #[test]
    fn test_encode_rejects_cross_family() {
        let err = encode_selectors(
            SelectorFamily::Tweet,
            [Selector::from(TweetField::Id), Selector::from(UserField::Location)],
        )
        .unwrap_err();

        match err {
            Error::InvalidSelector { selector, expected } => {
                assert_eq!(selector, "location");
                assert_eq!(expected, SelectorFamily::Tweet);
            }
            other => panic!("Expected InvalidSelector, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_checks_catalog() {
        let s = Selector::parse(SelectorFamily::Expansions, "author_id").unwrap();
        assert_eq!(s.family(), SelectorFamily::Expansions);
        assert!(Selector::parse(SelectorFamily::Expansions, "author").is_err());
        assert!(Selector::parse(SelectorFamily::Poll, "").is_err());
    }

    #[test]
    fn test_union_property() {
        let s1: FieldSet<TweetField> =
            [TweetField::Text, TweetField::AuthorId, TweetField::Lang].into();
        let s2: FieldSet<TweetField> =
            [TweetField::Lang, TweetField::CreatedAt, TweetField::Text, TweetField::Source].into();

        let merged = s1.clone().merge(&s2);
        assert_eq!(
            merged.encode().unwrap().as_deref(),
            Some("text,author_id,lang,created_at,source")
        );
        // S1 members come first, untouched
        assert!(merged.iter().take(s1.len()).eq(s1.iter()));
    }

    #[test]
    fn test_field_set_insert_reports_novelty() {
        let mut set = FieldSet::new();
        assert!(set.insert(PlaceField::Country));
        assert!(!set.insert(PlaceField::Country));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&PlaceField::Country));
    }
}
