//! The HTTP seam.
//!
//! Requests never talk to `reqwest` directly; they go through a [`Transport`].
//! [`HttpTransport`] is what a [`Client`] uses unless told otherwise.
//!
//! [`Client`]: crate::client::Client

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::HeaderMap, Client as ReqwestClient, StatusCode};
use url::Url;

use crate::error::Error;

/// Sends a GET request and reports what came back.
///
/// An implementation must produce exactly one [`Exchange`] per call.
/// Both halves of the exchange may be present at once: a transport can fail
/// halfway through a body it already started receiving.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET on `url` with `headers`.
    async fn get(&self, url: &Url, headers: &HeaderMap) -> Exchange;
}

/// The outcome of one round trip.
#[derive(Debug, Default)]
pub struct Exchange {
    error: Option<Error>,
    response: Option<RawResponse>,
}

impl Exchange {
    /// An exchange with any combination of error and response.
    pub fn new(error: Option<Error>, response: Option<RawResponse>) -> Self {
        Self { error, response }
    }

    /// A successful exchange.
    pub fn completed(response: RawResponse) -> Self {
        Self::new(None, Some(response))
    }

    /// An exchange that failed before any response arrived.
    pub fn failed(error: Error) -> Self {
        Self::new(Some(error), None)
    }

    /// Returns the transport error, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Returns the response, if any.
    pub fn response(&self) -> Option<&RawResponse> {
        self.response.as_ref()
    }

    /// Splits the exchange into its error and response.
    pub fn into_parts(self) -> (Option<Error>, Option<RawResponse>) {
        (self.error, self.response)
    }
}

/// Status, headers and undecoded body of a response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    /// Builds a response with no headers.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self::with_headers(status, HeaderMap::new(), body)
    }

    /// Builds a response.
    pub fn with_headers(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// A [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: ReqwestClient,
}

impl HttpTransport {
    /// Creates a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport from a preconfigured `reqwest` client
    /// (proxies, timeouts...).
    pub fn with_client(http: ReqwestClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url, headers: &HeaderMap) -> Exchange {
        log::debug!("request for {url} dispatched");
        let response = match self
            .http
            .get(url.clone())
            .headers(headers.clone())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return Exchange::failed(err.into()),
        };

        let status = response.status();
        let headers = response.headers().clone();
        log::debug!("response status: {status}");

        match response.bytes().await {
            Ok(body) => Exchange::completed(RawResponse::with_headers(status, headers, body)),
            // body was cut short, keep what we know about the response
            Err(err) => Exchange::new(
                Some(err.into()),
                Some(RawResponse::with_headers(status, headers, Bytes::new())),
            ),
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use super::*;

    /// Replays a fixed list of exchanges and records every request it sees.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct Scripted {
        replies: Arc<Mutex<VecDeque<Exchange>>>,
        seen: Arc<Mutex<Vec<(Url, HeaderMap)>>>,
    }

    impl Scripted {
        pub(crate) fn new(replies: impl IntoIterator<Item = Exchange>) -> Self {
            Self {
                replies: Arc::new(Mutex::new(replies.into_iter().collect())),
                seen: Arc::default(),
            }
        }

        pub(crate) fn urls(&self) -> Vec<String> {
            let seen = self.seen.lock().unwrap();
            seen.iter().map(|(url, _)| url.to_string()).collect()
        }

        pub(crate) fn headers(&self) -> Vec<HeaderMap> {
            let seen = self.seen.lock().unwrap();
            seen.iter().map(|(_, headers)| headers.clone()).collect()
        }

        pub(crate) fn requests(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn get(&self, url: &Url, headers: &HeaderMap) -> Exchange {
            self.seen
                .lock()
                .unwrap()
                .push((url.clone(), headers.clone()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted transport ran out of replies")
        }
    }

    /// A `200 OK` carrying `body` serialized as JSON.
    pub(crate) fn ok(body: &serde_json::Value) -> Exchange {
        Exchange::completed(RawResponse::new(StatusCode::OK, body.to_string()))
    }

    /// A listing page whose cursor is `after`.
    pub(crate) fn page(after: Option<&str>) -> Exchange {
        ok(&serde_json::json!({
            "kind": "Listing",
            "data": { "after": after, "children": [] }
        }))
    }
}
