//! Request building.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::auth::BearerToken;
use crate::query::QueryParams;
use crate::{Error, Result};

/// Static description of one API endpoint.
///
/// `path` is a template; `{name}` segments are filled from path
/// parameters at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// HTTP method
    pub method: Method,
    /// Path template, e.g. `/2/tweets/{id}`
    pub path: &'static str,
    /// Whether the endpoint takes a JSON body
    pub body: bool,
}

impl Endpoint {
    /// A `GET` endpoint.
    pub const fn get(path: &'static str) -> Self {
        Self {
            method: Method::GET,
            path,
            body: false,
        }
    }

    /// A `POST` endpoint with a JSON body.
    pub const fn post(path: &'static str) -> Self {
        Self {
            method: Method::POST,
            path,
            body: true,
        }
    }
}

/// A fully built request, ready to send.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    method: Method,
    url: Url,
    body: Option<Value>,
    token: BearerToken,
}

impl PreparedRequest {
    /// Build a request for `endpoint`.
    ///
    /// Fails with [`Error::Unauthenticated`] when no usable token is given,
    /// before anything else is looked at.
    pub fn build(
        token: Option<&BearerToken>,
        base_url: &Url,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        query: &QueryParams,
        body: Option<Value>,
    ) -> Result<Self> {
        let token = match token {
            Some(token) if !token.is_empty() => token.clone(),
            _ => return Err(Error::Unauthenticated),
        };

        if body.is_some() != endpoint.body {
            return Err(Error::InvalidInput(format!(
                "{} {} {} a body",
                endpoint.method,
                endpoint.path,
                if endpoint.body { "requires" } else { "does not take" }
            )));
        }

        let mut url = expand_path(base_url, endpoint.path, path_params)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        Ok(Self {
            method: endpoint.method.clone(),
            url,
            body,
            token,
        })
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full URL including the query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// JSON body, if any.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Turn into a `reqwest` request on `http`.
    pub(crate) fn into_builder(self, http: &reqwest::Client) -> reqwest::RequestBuilder {
        let builder = http
            .request(self.method, self.url)
            .header(AUTHORIZATION, self.token.header_value())
            .header(ACCEPT, "application/json");

        match self.body {
            Some(body) => builder.json(&body),
            None => builder,
        }
    }
}

/// Join `template` onto `base`, percent-encoding each path parameter as a
/// single segment.
fn expand_path(base: &Url, template: &str, params: &[(&str, &str)]) -> Result<Url> {
    let mut segments = Vec::new();
    for part in template.split('/').filter(|s| !s.is_empty()) {
        match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            Some(name) => {
                let value = params
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        Error::InvalidInput(format!("missing path parameter `{name}`"))
                    })?;
                if value.is_empty() || value == "." || value == ".." || value.contains('/') {
                    return Err(Error::InvalidInput(format!(
                        "invalid value for path parameter `{name}`: {value:?}"
                    )));
                }
                segments.push(value);
            }
            None => segments.push(part),
        }
    }

    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("base URL cannot take a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.twitter.com").unwrap()
    }

    fn token() -> BearerToken {
        BearerToken::new("t0k3n")
    }

    #[test]
    fn test_build_get_with_query() {
        let mut query = QueryParams::new();
        query.insert("user.fields", "created_at,location");
        query.insert("expansions", "pinned_tweet_id");

        let request = PreparedRequest::build(
            Some(&token()),
            &base(),
            &Endpoint::get("/2/users/by/username/{username}"),
            &[("username", "TwitterDev")],
            &query,
            None,
        )
        .unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://api.twitter.com/2/users/by/username/TwitterDev?expansions=pinned_tweet_id&user.fields=created_at%2Clocation"
        );
        assert!(request.body().is_none());
    }

    #[test]
    fn test_path_params_are_encoded_per_segment() {
        let request = PreparedRequest::build(
            Some(&token()),
            &base(),
            &Endpoint::get("/2/users/by/username/{username}"),
            &[("username", "a b?c")],
            &QueryParams::new(),
            None,
        )
        .unwrap();
        assert_eq!(request.url().path(), "/2/users/by/username/a%20b%3Fc");
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn test_path_param_with_slash_is_rejected() {
        let err = PreparedRequest::build(
            Some(&token()),
            &base(),
            &Endpoint::get("/2/tweets/{id}"),
            &[("id", "1/../../admin")],
            &QueryParams::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = PreparedRequest::build(
            Some(&token()),
            &base(),
            &Endpoint::get("/2/tweets/{id}"),
            &[],
            &QueryParams::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_missing_token_fails_first() {
        // Invalid path params too, but the credential check wins
        let err = PreparedRequest::build(
            None,
            &base(),
            &Endpoint::get("/2/tweets/{id}"),
            &[("id", "a/b")],
            &QueryParams::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));

        let empty = BearerToken::new("");
        let err = PreparedRequest::build(
            Some(&empty),
            &base(),
            &Endpoint::get("/2/tweets"),
            &[],
            &QueryParams::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));
    }

    #[test]
    fn test_blank_token_is_missing() {
        let blank = BearerToken::new("  ");
        let err = PreparedRequest::build(
            Some(&blank),
            &base(),
            &Endpoint::get("/2/tweets"),
            &[],
            &QueryParams::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));
    }

    #[test]
    fn test_body_requirement_checked() {
        let err = PreparedRequest::build(
            Some(&token()),
            &base(),
            &Endpoint::post("/2/tweets/search/stream/rules"),
            &[],
            &QueryParams::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let request = PreparedRequest::build(
            Some(&token()),
            &base(),
            &Endpoint::post("/2/tweets/search/stream/rules"),
            &[],
            &QueryParams::new(),
            Some(serde_json::json!({ "delete": { "ids": [] } })),
        )
        .unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.body().unwrap()["delete"]["ids"], serde_json::json!([]));
    }

    #[test]
    fn test_base_url_with_prefix() {
        let base = Url::parse("http://127.0.0.1:8080/proxy/").unwrap();
        let request = PreparedRequest::build(
            Some(&token()),
            &base,
            &Endpoint::get("/2/spaces/{id}"),
            &[("id", "1DXxyRYNejbKM")],
            &QueryParams::new(),
            None,
        )
        .unwrap();
        assert_eq!(request.url().as_str(), "http://127.0.0.1:8080/proxy/2/spaces/1DXxyRYNejbKM");
    }
}
