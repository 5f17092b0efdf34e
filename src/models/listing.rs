//! Typed view of collection responses.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page of a collection endpoint.
///
/// Every listing carries the cursor needed to request the page after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    kind: String,
    data: ListingData,
}

impl Listing {
    /// Returns the kind tag, `Listing` for collection endpoints.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the cursor of the next page, if there is one.
    pub fn after(&self) -> Option<&str> {
        self.data.after.as_deref().filter(|a| !a.is_empty())
    }

    /// Returns the cursor of the previous page, if there is one.
    pub fn before(&self) -> Option<&str> {
        self.data.before.as_deref().filter(|b| !b.is_empty())
    }

    /// Returns the number of children the service reports for this page.
    pub fn dist(&self) -> Option<u32> {
        self.data.dist
    }

    /// Consumes the listing, returning its children.
    pub fn into_children(self) -> Vec<Thing> {
        self.data.children
    }
}

impl std::ops::Deref for Listing {
    type Target = Vec<Thing>;

    fn deref(&self) -> &Self::Target {
        &self.data.children
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListingData {
    #[serde(default)]
    after: Option<String>,
    #[serde(default)]
    before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dist: Option<u32>,
    #[serde(default)]
    children: Vec<Thing>,
}

/// A single entry of a listing: a link, a comment, an account...
///
/// The payload is kept as raw JSON since its shape depends on [`Thing::kind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thing {
    kind: String,
    data: Value,
}

impl Thing {
    /// Returns the kind tag (`t1` comment, `t2` account, `t3` link, `t5` subreddit).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the raw payload.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Returns the short id, e.g. `abc123`.
    pub fn id(&self) -> Option<&str> {
        self.data.get("id").and_then(Value::as_str)
    }

    /// Returns the full name, e.g. `t3_abc123`. This is what cursors are made of.
    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    /// Returns the title of a link.
    pub fn title(&self) -> Option<&str> {
        self.data.get("title").and_then(Value::as_str)
    }

    /// Returns the author's username.
    pub fn author(&self) -> Option<&str> {
        self.data.get("author").and_then(Value::as_str)
    }

    /// Returns the creation time.
    #[allow(clippy::cast_possible_truncation)]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        let secs = self.data.get("created_utc").and_then(Value::as_f64)?;
        Utc.timestamp_opt(secs.trunc() as i64, 0).single()
    }
}
