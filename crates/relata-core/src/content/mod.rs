//! Content items as seen by the relevance engine
//!
//! A `ContentItem` is the validated, id-level view of one CMS document.
//! Raw export documents are turned into items by [`record`].

pub mod record;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RelataError;

pub use record::{parse_snapshot, RejectedRecord, SnapshotImport};

/// Publication status of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not yet visible on the site
    Draft,
    /// Visible on the site; eligible for ranking
    #[default]
    Published,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Published => "published",
        }
    }
}

impl FromStr for Status {
    type Err = RelataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Status::Draft),
            "published" => Ok(Status::Published),
            other => Err(RelataError::unsupported("status", other, "draft, published")),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of publishable content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub category_ids: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Status,
}

impl ContentItem {
    /// Create a published item with no categories and no timestamp
    pub fn new(id: impl Into<String>) -> Self {
        ContentItem {
            id: id.into(),
            title: None,
            category_ids: BTreeSet::new(),
            published_at: None,
            status: Status::Published,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_ids = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == Status::Published
    }

    /// Items with a blank id cannot be addressed by the store
    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Title for display, falling back to the id
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}
