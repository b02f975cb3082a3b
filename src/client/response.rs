//! Response envelope decoding.
//!
//! Every v2 endpoint answers with the same envelope:
//!
//! ```text
//! { "data": <entity | entity[]>, "includes": {..}, "meta": {..}, "errors": [..] }
//! ```
//!
//! Any member may be absent. The decoder keeps `data` and `errors` side by
//! side, so a partial failure reaches the caller with both halves intact.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::paginated::Cursor;
use crate::models::{Includes, MatchingRule, RulesSummary};
use crate::{Error, Result};

/// One error object as reported by the API.
///
/// Fields are kept verbatim; members this type does not name are collected
/// in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiProblem {
    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Human-readable explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Problem type URI
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    /// HTTP status, on problem-details bodies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Kind of resource the error is about (`tweet`, `user`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// ID of the resource the error is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Request parameter the error is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Offending value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Response section the error applies to (`data`, `includes`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Any other members
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiProblem {
    /// Returns `true` if the problem reports a missing resource.
    pub fn is_not_found(&self) -> bool {
        self.problem_type
            .as_deref()
            .is_some_and(|t| t.ends_with("/resource-not-found"))
    }

    /// Returns `true` if a stream was closed by the server and can be
    /// reopened.
    pub fn is_operational_disconnect(&self) -> bool {
        self.problem_type
            .as_deref()
            .is_some_and(|t| t.ends_with("/operational-disconnect"))
    }
}

/// The `meta` block of a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Number of items in this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u32>,
    /// Cursor for the following page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Cursor for the preceding page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_token: Option<String>,
    /// Highest ID in this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_id: Option<String>,
    /// Lowest ID in this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_id: Option<String>,
    /// When a rules response was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent: Option<DateTime<Utc>>,
    /// Rule add/delete counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RulesSummary>,
}

/// A decoded success response.
///
/// `T` is the endpoint's primary shape: a single entity or a `Vec` of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    /// Primary payload
    pub data: T,
    /// Side-loaded entities
    pub includes: Includes,
    /// Paging and count information
    pub meta: Option<Meta>,
    errors: Vec<ApiProblem>,
}

impl<T> Response<T> {
    pub(crate) fn new(data: T, includes: Includes, meta: Option<Meta>, errors: Vec<ApiProblem>) -> Self {
        Self {
            data,
            includes,
            meta,
            errors,
        }
    }

    /// Per-item errors that accompanied the data.
    pub fn errors(&self) -> &[ApiProblem] {
        &self.errors
    }

    /// Returns `true` if some requested items failed while others succeeded.
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The pagination cursor carried by this response.
    pub fn cursor(&self) -> Cursor {
        match &self.meta {
            Some(meta) => Cursor::new(meta.next_token.clone(), meta.result_count),
            None => Cursor::default(),
        }
    }

    /// Returns `true` if a following page exists.
    pub fn has_next(&self) -> bool {
        self.cursor().has_next()
    }

    /// Discard everything but the payload.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Split into payload, includes and partial errors.
    pub fn into_parts(self) -> (T, Includes, Vec<ApiProblem>) {
        (self.data, self.includes, self.errors)
    }

    /// Transform the payload, keeping everything else.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            data: f(self.data),
            includes: self.includes,
            meta: self.meta,
            errors: self.errors,
        }
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default = "Option::default")]
    data: Option<T>,
    #[serde(default)]
    includes: Option<Includes>,
    #[serde(default)]
    meta: Option<Meta>,
    #[serde(default)]
    errors: Vec<ApiProblem>,
    #[serde(default)]
    matching_rules: Vec<MatchingRule>,
}

fn error_body(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Envelope<T>> {
    if !(200..300).contains(&status) {
        return Err(Error::from_api_response(status, error_body(body)));
    }
    Ok(serde_json::from_slice(body)?)
}

/// Decode a single-entity response.
///
/// An `errors` array without `data` means the entity does not exist and
/// yields [`Error::NotFound`].
pub(crate) fn decode_single<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Response<T>> {
    let envelope = decode_envelope::<T>(status, body)?;
    match envelope.data {
        Some(data) => Ok(Response::new(
            data,
            envelope.includes.unwrap_or_default(),
            envelope.meta,
            envelope.errors,
        )),
        None if !envelope.errors.is_empty() => Err(Error::NotFound {
            errors: envelope.errors,
        }),
        None => Err(Error::UnexpectedResponse(
            "response has neither data nor errors".to_string(),
        )),
    }
}

/// Decode a list response.
///
/// A missing or empty `data` array is zero results. An `errors` array
/// without `data` or `meta` is a request-level failure and yields
/// [`Error::Api`]; with `meta` present (rule writes) the errors are per-item
/// and ride along on an empty success.
pub(crate) fn decode_list<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<Response<Vec<T>>> {
    let envelope = decode_envelope::<Vec<T>>(status, body)?;
    if envelope.data.is_none() && envelope.meta.is_none() && !envelope.errors.is_empty() {
        return Err(Error::Api {
            status,
            errors: envelope.errors,
            body: error_body(body),
        });
    }

    Ok(Response::new(
        envelope.data.unwrap_or_default(),
        envelope.includes.unwrap_or_default(),
        envelope.meta,
        envelope.errors,
    ))
}

/// Decode one object read from a stream.
///
/// Returns the item with the rules it matched. An object carrying only
/// `errors` is an in-band notice from the server and yields [`Error::Api`].
#[cfg(feature = "streaming")]
pub(crate) fn decode_stream_object<T: DeserializeOwned>(
    line: &[u8],
) -> Result<(Response<T>, Vec<MatchingRule>)> {
    let envelope = serde_json::from_slice::<Envelope<T>>(line)?;
    match envelope.data {
        Some(data) => Ok((
            Response::new(
                data,
                envelope.includes.unwrap_or_default(),
                envelope.meta,
                envelope.errors,
            ),
            envelope.matching_rules,
        )),
        None if !envelope.errors.is_empty() => Err(Error::Api {
            status: 200,
            errors: envelope.errors,
            body: error_body(line),
        }),
        None => Err(Error::UnexpectedResponse(
            "stream object has neither data nor errors".to_string(),
        )),
    }
}
