//! Walking a collection page by page.
//!
//! [`Pages`] follows the `data.after` cursor of each response until the
//! service stops handing out new cursors, an error occurs, or the walk is
//! cancelled. Pages are requested one at a time and only on demand.
//!
//! # Example: every post a user submitted
//! ```no_run
//! # async fn run() -> dotreddit::Result<()> {
//! use dotreddit::Client;
//!
//! let client = Client::new();
//! let mut request = client.user("spez");
//! request.submitted()?;
//!
//! let mut pages = request.all();
//! while let Some(page) = pages.next_page().await? {
//!     for thing in page.listing()?.iter() {
//!         println!("{:?}", thing.title());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use futures::stream::{self, Stream};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::Error, models::listing::Listing, request::Request, result::Result,
    transport::RawResponse,
};

/// Where a [`Pages`] walk currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Ready to request the next page.
    Idle,
    /// A page request is in flight.
    Fetching,
    /// The collection is exhausted or the walk was cancelled.
    Done,
    /// A page request failed. Nothing more will be requested.
    Errored,
}

impl State {
    /// Returns true for [`State::Done`] and [`State::Errored`].
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Done | State::Errored)
    }
}

/// Stops a [`Pages`] walk before its next request.
///
/// A request already in flight is not interrupted.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`CancelHandle::cancel`] was called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One page of a collection.
#[derive(Debug, Clone)]
pub struct Page {
    body: Value,
    response: RawResponse,
}

impl Page {
    /// Returns the decoded body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the page, returning the decoded body.
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Returns the raw response.
    pub fn response(&self) -> &RawResponse {
        &self.response
    }

    /// Returns the cursor of the next page. Empty cursors count as none.
    pub fn after(&self) -> Option<&str> {
        self.body
            .get("data")
            .and_then(|data| data.get("after"))
            .and_then(Value::as_str)
            .filter(|after| !after.is_empty())
    }

    /// Decodes the body as a [`Listing`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not a listing.
    pub fn listing(&self) -> Result<Listing> {
        Listing::deserialize(&self.body).map_err(Into::into)
    }
}

/// What a walk produced, as seen through [`Pages::events`].
#[derive(Debug)]
pub enum PageEvent {
    /// A page arrived.
    Data(Page),
    /// The collection is exhausted. Always the last event.
    End,
    /// A page request failed. Always the last event.
    Error(Error),
}

/// A lazy, finite sequence of pages created by [`Request::all`].
///
/// The walk owns its request, so the `after` cursor it advances is never
/// shared with another walk.
#[derive(Debug)]
pub struct Pages {
    request: Request,
    state: State,
    cancel: CancelHandle,
    fetched: usize,
}

impl Pages {
    pub(crate) fn new(request: Request) -> Self {
        Self {
            request,
            state: State::Idle,
            cancel: CancelHandle::default(),
            fetched: 0,
        }
    }

    /// Returns the request as it will be sent next.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the number of pages received so far.
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }

    /// Returns a handle that stops the walk before its next request.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Requests the next page.
    ///
    /// Returns `Ok(None)` once the collection is exhausted, the walk was
    /// cancelled, or a previous call failed. The walk ends when a page has no
    /// cursor or repeats the cursor it was requested with.
    ///
    /// # Errors
    ///
    /// Returns the transport error, [`Error::UnexpectedStatus`] for anything
    /// but `200 OK`, or [`Error::Decode`]. Every error ends the walk.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        if self.state.is_terminal() {
            return Ok(None);
        }
        if self.cancel.is_cancelled() {
            log::debug!("pagination of {} cancelled", self.request.base_path());
            self.state = State::Done;
            return Ok(None);
        }

        self.state = State::Fetching;
        match self.fetch().await {
            Ok(page) => {
                self.fetched += 1;
                self.advance(&page);
                Ok(Some(page))
            }
            Err(err) => {
                self.state = State::Errored;
                Err(err)
            }
        }
    }

    /// Turns the walk into a stream that ends after the last page or the
    /// first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Page>> {
        stream::try_unfold(self, |mut pages| async move {
            let page = pages.next_page().await?;
            Ok::<_, Error>(page.map(|page| (page, pages)))
        })
    }

    /// Turns the walk into a stream of events: one [`PageEvent::Data`] per
    /// page, then exactly one [`PageEvent::End`] or [`PageEvent::Error`].
    pub fn events(self) -> impl Stream<Item = PageEvent> {
        stream::unfold(Some(self), |pages| async move {
            let mut pages = pages?;
            let last = match pages.next_page().await {
                Ok(Some(page)) => return Some((PageEvent::Data(page), Some(pages))),
                Ok(None) => PageEvent::End,
                Err(err) => PageEvent::Error(err),
            };
            Some((last, None))
        })
    }

    async fn fetch(&self) -> Result<Page> {
        let (url, exchange) = self.request.send().await?;
        let (error, response) = exchange.into_parts();
        if let Some(err) = error {
            return Err(err);
        }
        let response =
            response.ok_or_else(|| Error::transport(format!("no response from {url}")))?;
        if response.status() != StatusCode::OK {
            return Err(Error::UnexpectedStatus(response.status()));
        }

        let body = serde_json::from_slice(response.body())?;
        Ok(Page { body, response })
    }

    fn advance(&mut self, page: &Page) {
        let Some(next) = page.after() else {
            self.state = State::Done;
            return;
        };
        if self.request.cursor() == Some(next) {
            log::debug!("cursor {next} did not move, stopping");
            self.state = State::Done;
            return;
        }

        log::debug!("moving cursor to {next}");
        self.request.after(next);
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use futures::{StreamExt, TryStreamExt};
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::{
        client::Client,
        config::Config,
        transport::{
            mock::{ok, page, Scripted},
            Exchange, RawResponse,
        },
    };

    fn walk(replies: impl IntoIterator<Item = Exchange>) -> (Pages, Scripted) {
        let transport = Scripted::new(replies);
        let client = Client::with_transport(Config::default(), transport.clone());
        (client.r("test").all(), transport)
    }

    fn cursors(events: &[PageEvent]) -> Vec<Option<&str>> {
        events
            .iter()
            .filter_map(|e| match e {
                PageEvent::Data(page) => Some(page.after()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn follows_cursors_until_exhausted() {
        let (pages, transport) = walk([page(Some("t3_a")), page(Some("t3_b")), page(Some(""))]);

        let events: Vec<PageEvent> = pages.events().collect().await;

        assert_eq!(events.len(), 4);
        assert_eq!(cursors(&events), [Some("t3_a"), Some("t3_b"), None]);
        assert!(matches!(events[3], PageEvent::End));
        assert_eq!(
            transport.urls(),
            [
                "https://www.reddit.com/r/test/.json?limit=100",
                "https://www.reddit.com/r/test/.json?after=t3_a&limit=100",
                "https://www.reddit.com/r/test/.json?after=t3_b&limit=100",
            ]
        );
    }

    #[tokio::test]
    async fn stops_when_cursor_does_not_move() {
        let (pages, transport) = walk([page(Some("t3_a")), page(Some("t3_a"))]);

        let events: Vec<PageEvent> = pages.events().collect().await;

        assert_eq!(events.len(), 3);
        assert_eq!(cursors(&events), [Some("t3_a"), Some("t3_a")]);
        assert!(matches!(events[2], PageEvent::End));
        assert_eq!(transport.requests(), 2);
    }

    #[tokio::test]
    async fn preset_cursor_counts_as_previous() {
        let transport = Scripted::new([page(Some("t3_z"))]);
        let client = Client::with_transport(Config::default(), transport.clone());
        let mut request = client.r("test");
        request.after("t3_z");

        let mut pages = request.all();
        assert!(pages.next_page().await.unwrap().is_some());
        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(pages.state(), State::Done);
        assert_eq!(transport.requests(), 1);
    }

    #[tokio::test]
    async fn transport_error_ends_the_walk() {
        let (pages, transport) = walk([
            page(Some("t3_a")),
            Exchange::failed(Error::transport("connection reset")),
        ]);

        let events: Vec<PageEvent> = pages.events().collect().await;

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], PageEvent::Data(_)));
        assert!(matches!(events[1], PageEvent::Error(Error::Transport(_))));
        assert_eq!(transport.requests(), 2);
    }

    #[tokio::test]
    async fn nothing_is_requested_after_an_error() {
        let (mut pages, transport) = walk([Exchange::failed(Error::transport("down"))]);

        assert!(pages.next_page().await.is_err());
        assert_eq!(pages.state(), State::Errored);
        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(transport.requests(), 1);
    }

    #[tokio::test]
    async fn non_ok_status_is_an_error() {
        let (pages, _) = walk([
            page(Some("t3_a")),
            Exchange::completed(RawResponse::new(StatusCode::TOO_MANY_REQUESTS, "{}")),
        ]);

        let events: Vec<PageEvent> = pages.events().collect().await;

        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1],
            PageEvent::Error(Error::UnexpectedStatus(code)) if code == StatusCode::TOO_MANY_REQUESTS
        ));
    }

    #[tokio::test]
    async fn undecodable_page_is_an_error() {
        let (pages, _) = walk([Exchange::completed(RawResponse::new(
            StatusCode::OK,
            "not json",
        ))]);

        let events: Vec<PageEvent> = pages.events().collect().await;

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], PageEvent::Error(Error::Decode(_))));
    }

    #[tokio::test]
    async fn body_without_data_ends_the_walk() {
        let (pages, transport) = walk([ok(&json!({"kind": "t2"}))]);

        let events: Vec<PageEvent> = pages.events().collect().await;

        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], PageEvent::End));
        assert_eq!(transport.requests(), 1);
    }

    #[tokio::test]
    async fn cancel_stops_before_next_request() {
        let (mut pages, transport) = walk([page(Some("t3_a")), page(Some("t3_b"))]);
        let handle = pages.cancel_handle();

        assert!(pages.next_page().await.unwrap().is_some());
        handle.cancel();
        assert!(pages.next_page().await.unwrap().is_none());

        assert!(handle.is_cancelled());
        assert_eq!(pages.state(), State::Done);
        assert_eq!(pages.pages_fetched(), 1);
        assert_eq!(transport.requests(), 1);
    }

    mod captured {
        use std::sync::{Mutex, OnceLock};

        use log::{Level, LevelFilter, Log, Metadata, Record};

        struct Capture;

        static LINES: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
        static LOGGER: Capture = Capture;

        impl Log for Capture {
            fn enabled(&self, _: &Metadata<'_>) -> bool {
                true
            }

            fn log(&self, record: &Record<'_>) {
                LINES.lock().unwrap().push((record.level(), record.args().to_string()));
            }

            fn flush(&self) {}
        }

        /// Installs the capturing logger once per test binary.
        pub(super) fn install() {
            static INIT: OnceLock<()> = OnceLock::new();
            INIT.get_or_init(|| {
                log::set_logger(&LOGGER).unwrap();
                log::set_max_level(LevelFilter::Debug);
            });
        }

        /// Info lines mentioning `needle`, in the order they were logged.
        pub(super) fn info_lines(needle: &str) -> Vec<String> {
            LINES
                .lock()
                .unwrap()
                .iter()
                .filter(|(level, line)| *level == Level::Info && line.contains(needle))
                .map(|(_, line)| line.clone())
                .collect()
        }
    }

    #[tokio::test]
    async fn debug_logs_every_page_url() {
        captured::install();
        let transport = Scripted::new([page(Some("t3_a")), page(None)]);
        let client = Client::with_transport(Config::default().with_debug(true), transport.clone());

        let events: Vec<PageEvent> = client.r("debugged").all().events().collect().await;
        assert_eq!(events.len(), 3);

        assert_eq!(
            captured::info_lines("/r/debugged/"),
            [
                "Requesting: https://www.reddit.com/r/debugged/.json?limit=100",
                "Requesting: https://www.reddit.com/r/debugged/.json?after=t3_a&limit=100",
            ]
        );
    }

    #[tokio::test]
    async fn quiet_requests_stay_off_info() {
        captured::install();
        let transport = Scripted::new([page(None)]);
        let client = Client::with_transport(Config::default(), transport.clone());

        let events: Vec<PageEvent> = client.r("quiet").all().events().collect().await;
        assert_eq!(events.len(), 2);
        assert!(captured::info_lines("/r/quiet/").is_empty());
    }

    #[test]
    fn lazy_until_polled() {
        let (pages, transport) = walk([page(None)]);
        assert_eq!(pages.state(), State::Idle);
        assert_eq!(transport.requests(), 0);
        drop(pages);
        assert_eq!(transport.requests(), 0);
    }

    #[tokio::test]
    async fn stream_yields_pages() {
        let (pages, _) = walk([page(Some("t3_a")), page(None)]);

        let collected: Vec<Page> = pages.into_stream().try_collect().await.unwrap();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].after(), Some("t3_a"));
        assert_eq!(collected[1].after(), None);
    }

    #[tokio::test]
    async fn stream_ends_after_error() {
        let (pages, transport) = walk([
            page(Some("t3_a")),
            Exchange::failed(Error::transport("gone")),
        ]);

        let items: Vec<Result<Page>> = pages.into_stream().collect().await;

        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
        assert_eq!(transport.requests(), 2);
    }

    #[tokio::test]
    async fn page_listing() {
        let (mut pages, _) = walk([ok(&json!({
            "kind": "Listing",
            "data": {
                "after": null,
                "children": [{"kind": "t3", "data": {"name": "t3_a"}}]
            }
        }))]);

        let page = pages.next_page().await.unwrap().unwrap();
        assert_eq!(page.response().status(), StatusCode::OK);
        assert_eq!(page.listing().unwrap()[0].name(), Some("t3_a"));
        assert_eq!(pages.state(), State::Done);
    }
}
