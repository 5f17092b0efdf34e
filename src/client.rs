use std::{fmt, sync::Arc};

use crate::{
    config::Config,
    models::filter::Filter,
    request::Request,
    transport::{HttpTransport, Transport},
};

/// Entry point of the crate: spawns a [`Request`] per resource.
///
/// Every request starts from a copy of the client's [`Config`].
/// Cloning a client is cheap; clones share the transport.
#[derive(Clone)]
pub struct Client {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client with the default configuration and an [`HttpTransport`].
    pub fn new() -> Client {
        Self::with_config(Config::default())
    }

    /// Creates a client with `config` and an [`HttpTransport`].
    pub fn with_config(config: Config) -> Client {
        Self::with_transport(config, HttpTransport::new())
    }

    /// Creates a client that sends its requests through `transport`.
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Client {
        Client {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Returns the configuration requests are seeded from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A user resource, `/user/<username>/`.
    ///
    /// The name is not validated; a bad one shows up as an error from the service.
    /// It is percent-encoded into a single path segment.
    pub fn user(&self, username: &str) -> Request {
        self.request(format!("/user/{}/", urlencoding::encode(username)), None)
    }

    /// A subreddit resource, `/r/<subreddit>/`.
    pub fn r(&self, subreddit: &str) -> Request {
        self.request(format!("/r/{}/", urlencoding::encode(subreddit)), None)
    }

    /// Same as [`Client::r`].
    pub fn subreddit(&self, subreddit: &str) -> Request {
        self.r(subreddit)
    }

    /// The front page, optionally narrowed to one of its listings.
    ///
    /// A filter given here counts as the request's one filter.
    pub fn list(&self, filter: Option<Filter>) -> Request {
        self.request("/", filter)
    }

    fn request(&self, base_path: impl Into<String>, filter: Option<Filter>) -> Request {
        Request::with_path(self.transport.clone(), &self.config, base_path, filter)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
