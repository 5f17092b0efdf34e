use reqwest::{header::InvalidHeaderValue, StatusCode};
use thiserror::Error;

use crate::models::filter::Filter;

/// Errors that can be returned while building or executing a request.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed to deliver a request or its response.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body was not valid JSON.
    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A second filter was applied to a request that already has one.
    #[error("only one filter can be applied to a request (already `{current}`, got `{requested}`)")]
    FilterAlreadySet {
        /// The filter recorded on the request.
        current: Filter,
        /// The filter that was rejected.
        requested: Filter,
    },

    /// A page request came back with something other than `200 OK`.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),

    /// The configured base URL could not be parsed.
    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A resource name that URL parsing would resolve away, such as `..`.
    ///
    /// Sending it would silently request a different resource.
    #[error("path `{0}` does not name a resource")]
    UnresolvablePath(String),

    /// The user agent cannot be sent as a header value.
    #[error("invalid user agent: {0}")]
    InvalidUserAgent(#[from] InvalidHeaderValue),
}

impl Error {
    /// Wraps any error (or message) as a [`Error::Transport`].
    ///
    /// Useful for custom [`Transport`] implementations.
    ///
    /// [`Transport`]: crate::transport::Transport
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }

    /// Returns true if the error was caused by misuse of the builder,
    /// as opposed to something that happened on the wire.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::FilterAlreadySet { .. } | Self::UnresolvablePath(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
