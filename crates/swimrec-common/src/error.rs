//! Error types shared across swimrec crates

use thiserror::Error;

/// Result type alias for swimrec operations
pub type Result<T> = std::result::Result<T, SwimrecError>;

/// Errors raised while configuring or bootstrapping a swimrec component
#[derive(Error, Debug)]
pub enum SwimrecError {
    #[error("Invalid URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SwimrecError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Parse an absolute `http`/`https` URL, rejecting anything else
///
/// ```
/// use swimrec_common::error::parse_http_url;
///
/// assert!(parse_http_url("http://localhost").is_ok());
/// assert!(parse_http_url("ftp://localhost").is_err());
/// ```
pub fn parse_http_url(value: &str) -> Result<url::Url> {
    let url = url::Url::parse(value).map_err(|source| SwimrecError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        scheme => Err(SwimrecError::config(format!(
            "URL '{}' must be an absolute http(s) URL, got scheme '{}'",
            value, scheme
        ))),
    }
}
