//! Building and executing a request against one resource.
//!
//! A [`Request`] is created by a [`Client`] for a resource path, refined with
//! query and filter mutators, then either executed once with [`Request::exe`]
//! or walked page by page with [`Request::all`].
//!
//! ## Example: the ten newest posts of a subreddit
//! ```no_run
//! # async fn run() -> dotreddit::Result<()> {
//! use dotreddit::{Client, filter::Sort};
//!
//! let client = Client::new();
//! let mut request = client.r("rust");
//! request.new()?.sort(Sort::New).limit(10);
//!
//! let reply = request.exe().await?;
//! for thing in reply.listing()?.iter() {
//!     println!("{}", thing.title().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`Client`]: crate::client::Client

use std::{fmt, sync::Arc};

use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::{
    config::{Config, Options},
    error::Error,
    models::{filter::Filter, listing::Listing, macros::filter_methods, QueryMap},
    pages::Pages,
    result::Result,
    transport::{Exchange, RawResponse, Transport},
};

/// Page size used by [`Request::all`] when no `limit` was set.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// A request descriptor for one resource.
#[derive(Clone)]
pub struct Request {
    transport: Arc<dyn Transport>,
    base_url: String,
    base_path: String,
    filter: Option<Filter>,
    query: QueryMap,
    user_agent: String,
    debug: bool,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("base_url", &self.base_url)
            .field("base_path", &self.base_path)
            .field("filter", &self.filter)
            .field("query", &self.query)
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl Request {
    /// Seeds a request for `base_path` from the defaults in `config`.
    pub(crate) fn with_path(
        transport: Arc<dyn Transport>,
        config: &Config,
        base_path: impl Into<String>,
        filter: Option<Filter>,
    ) -> Self {
        Self {
            transport,
            base_url: config.base_url().to_string(),
            base_path: base_path.into(),
            filter,
            query: config.query().clone(),
            user_agent: config.user_agent().to_string(),
            debug: config.debug(),
        }
    }

    /// Sets an arbitrary query parameter.
    pub fn query(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Sets `sort`.
    pub fn sort(&mut self, sort: impl Into<String>) -> &mut Self {
        self.query("sort", sort)
    }

    /// Sets the time window of the listing.
    ///
    /// The value is sent as the `t` parameter.
    pub fn from(&mut self, timeframe: impl Into<String>) -> &mut Self {
        self.query("t", timeframe)
    }

    /// Sets the maximum number of items per page.
    pub fn limit(&mut self, limit: u32) -> &mut Self {
        self.query("limit", limit.to_string())
    }

    /// Sets the cursor of the item to list after.
    pub fn after(&mut self, after: impl Into<String>) -> &mut Self {
        self.query("after", after)
    }

    /// Sets the cursor of the item to list before.
    pub fn before(&mut self, before: impl Into<String>) -> &mut Self {
        self.query("before", before)
    }

    /// Sets the number of items already seen.
    pub fn count(&mut self, count: u32) -> &mut Self {
        self.query("count", count.to_string())
    }

    /// Narrows the resource down to one of its listings.
    ///
    /// Only one filter may ever be applied to a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilterAlreadySet`] if a filter was already applied,
    /// in which case the request is left as it was.
    pub fn filter(&mut self, filter: Filter) -> Result<&mut Self> {
        if let Some(current) = self.filter {
            return Err(Error::FilterAlreadySet {
                current,
                requested: filter,
            });
        }
        self.filter = Some(filter);
        Ok(self)
    }

    filter_methods! {
        /// Applies [`Filter::Overview`].
        overview => Filter::Overview;
        /// Applies [`Filter::Comments`].
        comments => Filter::Comments;
        /// Applies [`Filter::Submitted`].
        submitted => Filter::Submitted;
        /// Applies [`Filter::Liked`].
        liked => Filter::Liked;
        /// Applies [`Filter::Disliked`].
        disliked => Filter::Disliked;
        /// Applies [`Filter::Hidden`].
        hidden => Filter::Hidden;
        /// Applies [`Filter::Saved`].
        saved => Filter::Saved;
        /// Applies [`Filter::About`].
        about => Filter::About;
        /// Applies [`Filter::Hot`].
        hot => Filter::Hot;
        /// Applies [`Filter::New`].
        new => Filter::New;
        /// Applies [`Filter::Controversial`].
        controversial => Filter::Controversial;
        /// Applies [`Filter::Top`].
        top => Filter::Top;
    }

    /// Replaces the user agent.
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) -> &mut Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replaces all query parameters.
    pub fn set_query(&mut self, query: QueryMap) -> &mut Self {
        self.query = query;
        self
    }

    /// Enables or disables URL logging.
    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }

    /// Overwrites the fields that are set in `options`.
    pub fn set_options(&mut self, options: Options) -> &mut Self {
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

    /// Returns the resource path, e.g. `/r/rust/`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the filter applied to this request, if any.
    pub fn current_filter(&self) -> Option<Filter> {
        self.filter
    }

    /// Returns the query parameters.
    pub fn query_map(&self) -> &QueryMap {
        &self.query
    }

    /// Returns the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the path that will be requested, e.g. `/r/rust/hot/.json`.
    pub fn path(&self) -> String {
        match self.filter {
            Some(filter) => format!("{}{}/.json", self.base_path, filter),
            None => format!("{}.json", self.base_path),
        }
    }

    /// Composes the full URL from the current state of the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the configured base URL does not parse,
    /// or [`Error::UnresolvablePath`] if the path has a `.` or `..` segment,
    /// which URL parsing would resolve into another resource.
    pub fn url(&self) -> Result<Url> {
        let path = self.path();
        if path.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(Error::UnresolvablePath(path));
        }
        let mut url = Url::parse(&self.base_url)?;
        url.set_path(&path);
        url.set_query(None);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }

    /// Performs a single request and decodes its body.
    ///
    /// The body is decoded even if the transport reported an error, so a
    /// successful `Reply` may still carry one; check
    /// [`Reply::transport_error`]. The status code is not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not JSON (an empty body, as
    /// left by a failed connection, included), or a URL/header error if the
    /// request could not be composed.
    pub async fn exe(&self) -> Result<Reply> {
        let (url, exchange) = self.send().await?;
        let (transport_error, response) = exchange.into_parts();

        let raw = response.as_ref().map_or(&[][..], |r| &r.body()[..]);
        let body: Value = match serde_json::from_slice(raw) {
            Ok(body) => body,
            Err(err) => {
                if let Some(transport_error) = &transport_error {
                    log::warn!("request to {url} failed: {transport_error}");
                }
                return Err(err.into());
            }
        };

        Ok(Reply {
            body,
            response,
            transport_error,
        })
    }

    /// Turns the request into a lazy sequence of pages.
    ///
    /// Sets `limit` to [`DEFAULT_PAGE_LIMIT`] if it was not set.
    /// Nothing is requested until the first [`Pages::next_page`].
    pub fn all(mut self) -> Pages {
        let has_limit = matches!(self.query.get("limit"), Some(limit) if !limit.is_empty());
        if !has_limit {
            self.limit(DEFAULT_PAGE_LIMIT);
        }
        Pages::new(self)
    }

    /// Returns the `after` cursor currently set.
    pub(crate) fn cursor(&self) -> Option<&str> {
        self.query.get("after").map(String::as_str)
    }

    /// Composes the URL and headers and hands them to the transport.
    pub(crate) async fn send(&self) -> Result<(Url, Exchange)> {
        let url = self.url()?;
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);

        if self.debug {
            log::info!("Requesting: {url}");
        } else {
            log::debug!("requesting {url}");
        }
        let exchange = self.transport.get(&url, &headers).await;
        Ok((url, exchange))
    }
}

/// A decoded response to [`Request::exe`].
#[derive(Debug)]
pub struct Reply {
    body: Value,
    response: Option<RawResponse>,
    transport_error: Option<Error>,
}

impl Reply {
    /// Returns the decoded body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the reply, returning the decoded body.
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Returns the raw response.
    pub fn response(&self) -> Option<&RawResponse> {
        self.response.as_ref()
    }

    /// Returns the status code of the response.
    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(RawResponse::status)
    }

    /// Returns the error the transport reported alongside the body, if any.
    pub fn transport_error(&self) -> Option<&Error> {
        self.transport_error.as_ref()
    }

    /// Decodes the body as a [`Listing`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not a listing,
    /// e.g. for `about` resources.
    pub fn listing(&self) -> Result<Listing> {
        Listing::deserialize(&self.body).map_err(Into::into)
    }
}
