//! Path filters and typed query values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A path segment narrowing a resource down to one of its listings.
///
/// User resources understand [`Overview`] through [`About`];
/// subreddits and the front page understand [`Hot`] through [`Top`].
/// Nothing stops you from applying a user filter to a subreddit,
/// the remote service will answer with an error of its own.
///
/// [`Overview`]: Filter::Overview
/// [`About`]: Filter::About
/// [`Hot`]: Filter::Hot
/// [`Top`]: Filter::Top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Everything a user posted or commented.
    Overview,
    /// Comments made by a user.
    Comments,
    /// Links submitted by a user.
    Submitted,
    /// Things a user upvoted.
    Liked,
    /// Things a user downvoted.
    Disliked,
    /// Things a user hid.
    Hidden,
    /// Things a user saved.
    Saved,
    /// A user's profile.
    About,
    /// The hot listing.
    Hot,
    /// The newest listing.
    New,
    /// The controversial listing.
    Controversial,
    /// The top listing.
    Top,
}

impl Filter {
    /// Filters that apply to user resources.
    pub const USER: [Filter; 8] = [
        Filter::Overview,
        Filter::Comments,
        Filter::Submitted,
        Filter::Liked,
        Filter::Disliked,
        Filter::Hidden,
        Filter::Saved,
        Filter::About,
    ];

    /// Filters that apply to subreddits and the front page.
    pub const LISTING: [Filter; 4] = [Filter::Hot, Filter::New, Filter::Controversial, Filter::Top];

    /// Returns the path segment as it appears in the URL.
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::Overview => "overview",
            Filter::Comments => "comments",
            Filter::Submitted => "submitted",
            Filter::Liked => "liked",
            Filter::Disliked => "disliked",
            Filter::Hidden => "hidden",
            Filter::Saved => "saved",
            Filter::About => "about",
            Filter::Hot => "hot",
            Filter::New => "new",
            Filter::Controversial => "controversial",
            Filter::Top => "top",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values accepted by the `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sort {
    /// `sort=hot`
    Hot,
    /// `sort=new`
    New,
    /// `sort=top`
    Top,
    /// `sort=controversial`
    Controversial,
}

impl Sort {
    /// Returns the value sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Sort::Hot => "hot",
            Sort::New => "new",
            Sort::Top => "top",
            Sort::Controversial => "controversial",
        }
    }
}

impl From<Sort> for String {
    fn from(sort: Sort) -> Self {
        sort.as_str().to_string()
    }
}

/// Values accepted by the `t` query parameter, set through [`Request::from`].
///
/// [`Request::from`]: crate::request::Request::from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    /// The last hour.
    Hour,
    /// The last day.
    Day,
    /// The last week.
    Week,
    /// The last month.
    Month,
    /// The last year.
    Year,
    /// No time restriction.
    All,
}

impl Timeframe {
    /// Returns the value sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Hour => "hour",
            Timeframe::Day => "day",
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Year => "year",
            Timeframe::All => "all",
        }
    }
}

impl From<Timeframe> for String {
    fn from(t: Timeframe) -> Self {
        t.as_str().to_string()
    }
}
