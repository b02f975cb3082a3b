//! Query composition.
//!
//! Typed selectors and option sets are rendered here into the flat
//! `name -> value` parameter map a request carries. Every value passes
//! through [`encode_selectors`] before it reaches the wire, so a selector
//! from the wrong family is rejected even when assembled at runtime.

mod options;
mod params;
mod selector;

pub use options::{
    Exclude, Fields, LookupOptions, Paginated, RulesQuery, SearchOptions, SortOrder,
    SpaceSearchOptions, StreamOptions, TimelineOptions, UserListOptions,
};
pub use params::{QueryOptions, QueryParams};
pub use selector::{encode_selectors, FieldSelector, FieldSet, Selector, SelectorFamily};
