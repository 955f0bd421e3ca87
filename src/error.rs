use std::time::Duration;
use thiserror::Error;

/// Failures talking to the content platform.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Connection refused, DNS failure, TLS error and the like
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request did not complete within the configured timeout
    #[error("Content query timed out after {0:?}")]
    Timeout(Duration),

    /// Non-2xx response, usually a query syntax error
    #[error("Content API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Body was not the expected JSON envelope
    #[error("Failed to decode content response: {0}")]
    Decode(String),
}

impl ContentError {
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Outcome of a loader that did not resolve to a view-model.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No document matched the slug/city filter, or a path parameter was missing
    #[error("Not Found")]
    NotFound,

    #[error(transparent)]
    Content(#[from] ContentError),

    /// The store returned a document that does not fit the view-model
    #[error("Malformed {kind} document: {message}")]
    Malformed { kind: &'static str, message: String },

    /// A document's image reference could not be resolved
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl LoadError {
    /// HTTP status equivalent surfaced by the route layer.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Content(ContentError::Timeout(_)) => 504,
            Self::Content(_) | Self::Malformed { .. } | Self::Image(_) => 502,
        }
    }
}

/// Image references that cannot be turned into a CDN URL.
#[derive(Debug, Error, PartialEq)]
pub enum ImageError {
    #[error("Image reference has no asset id")]
    MissingAsset,

    #[error("Malformed image asset id '{0}'")]
    MalformedAsset(String),

    #[error("Listing has {found} media entries, at least {needed} are required")]
    NotEnoughMedia { found: usize, needed: usize },
}
