use crate::models::QueryMap;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("dotreddit/", env!("CARGO_PKG_VERSION"));

/// Where requests go when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Defaults every [`Request`] built by a [`Client`] starts from.
///
/// A `Config` is a plain value: configure it once, hand it to a client,
/// and every resource spawned from that client is seeded with a copy.
///
/// ```
/// use dotreddit::{Client, Config};
///
/// let config = Config::default()
///     .with_user_agent("my-bot/0.1 by u/someone")
///     .with_debug(true);
/// let client = Client::with_config(config);
/// assert_eq!(client.config().user_agent(), "my-bot/0.1 by u/someone");
/// ```
///
/// [`Request`]: crate::request::Request
/// [`Client`]: crate::client::Client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    user_agent: String,
    query: QueryMap,
    debug: bool,
    base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            query: QueryMap::new(),
            debug: false,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the default query parameters, replacing any previous ones.
    #[must_use]
    pub fn with_query(mut self, query: QueryMap) -> Self {
        self.query = query;
        self
    }

    /// Logs every composed URL before it is requested when enabled.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Points requests at another host, e.g. a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overwrites only the fields that are set in `options`.
    #[must_use]
    pub fn apply(mut self, options: Options) -> Self {
        if let Some(user_agent) = options.user_agent {
            self.user_agent = user_agent;
        }
        if let Some(query) = options.query {
            self.query = query;
        }
        if let Some(debug) = options.debug {
            self.debug = debug;
        }
        self
    }

    /// Returns the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the default query parameters.
    pub fn query(&self) -> &QueryMap {
        &self.query
    }

    /// Returns whether URL logging is enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// A partial set of overrides, applied with [`Config::apply`] or
/// [`Request::set_options`].
///
/// [`Request::set_options`]: crate::request::Request::set_options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Replaces the user agent.
    pub user_agent: Option<String>,
    /// Replaces the query parameters.
    pub query: Option<QueryMap>,
    /// Replaces the debug flag.
    pub debug: Option<bool>,
}
