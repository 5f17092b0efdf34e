use crate::error::Error as RedditErr;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, RedditErr>;
