//! Hypermedia link helpers
//!
//! All hrefs are absolute and start with the configured public base URL.
//! Query strings are rebuilt from the pairs the client sent so that
//! pagination links keep every filter the client used.

use serde::Serialize;
use url::form_urlencoded;
use uuid::Uuid;

/// Ordered `key=value` pairs from a request query string
pub type QueryPairs = Vec<(String, String)>;

/// Decode a raw query string into ordered pairs, keeping duplicates
pub fn parse_query(raw: Option<&str>) -> QueryPairs {
    raw.map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Serialize `params` onto `base`, replacing or appending `overrides`
///
/// An override replaces the value of the first pair with the same key and
/// drops any later duplicates of it; overrides for keys the request did not
/// carry are appended in order. With no pairs at all the bare `base` is
/// returned. Spaces are written as `%20`.
pub fn build_link(base: &str, params: &[(String, String)], overrides: &[(&str, String)]) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(params.len() + overrides.len());

    for (key, value) in params {
        match overrides.iter().find(|(k, _)| *k == key.as_str()) {
            Some((k, v)) => {
                if !pairs.iter().any(|(existing, _)| existing == k) {
                    pairs.push((*k, v.as_str()));
                }
            },
            None => pairs.push((key.as_str(), value.as_str())),
        }
    }

    for (key, value) in overrides {
        if !pairs.iter().any(|(existing, _)| existing == key) {
            pairs.push((*key, value.as_str()));
        }
    }

    if pairs.is_empty() {
        return base.to_string();
    }

    // The serializer escapes a literal '+' as %2B, so any '+' left is a space
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
        .replace('+', "%20");

    format!("{}?{}", base, query)
}

/// Absolute URLs of the records resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUrls {
    base: String,
}

impl ResourceUrls {
    /// `base` is used as an opaque prefix; a trailing slash is dropped
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection(&self) -> String {
        format!("{}/records", self.base)
    }

    pub fn record(&self, id: Uuid) -> String {
        format!("{}/records/{}", self.base, id)
    }
}

/// `{ "href": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// `{ "page": n, "href": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u64,
    pub href: String,
}
