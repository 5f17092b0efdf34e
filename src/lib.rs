#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
//! # dotreddit
//!
//! dotreddit is a convenient wrapper library around Reddit's read-only listing API.
//!
//! This library can fetch:
//! - user resources (`/user/<name>/`) and their listings
//! - subreddits (`/r/<name>/`) and their listings
//! - the front page
//!
//! Either one page at a time with [`Request::exe`], or every page of a
//! collection by following its cursor with [`Request::all`].
//!
//! ## Example: Printing the titles on the front page.
//!
//! ```no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use dotreddit::{filter::Filter, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new();
//!     let mut request = client.list(Some(Filter::Hot));
//!     request.limit(25);
//!
//!     let reply = request.exe().await?;
//!     for thing in reply.listing()?.iter() {
//!         println!("{}", thing.title().unwrap_or("<untitled>"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`Request::exe`]: crate::request::Request::exe
//! [`Request::all`]: crate::request::Request::all

/// Client module contains [`Client`], the entry point for building requests.
pub mod client;

/// Defaults shared by every request a client builds.
pub mod config;

/// Contains [`Error`]s that can be returned by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

/// Multi-page collection.
pub mod pages;

/// Request building and single-shot execution.
pub mod request;

/// The HTTP seam.
pub mod transport;

pub(crate) mod models;

pub(crate) mod result;

pub use client::Client;
pub use config::{Config, Options};
pub use error::Error;
pub use models::*;
pub use pages::{PageEvent, Pages};
pub use request::Request;
pub use result::Result;
