//! Snapshot import: raw CMS export documents to validated content items
//!
//! Accepted shapes are a bare array of documents or a REST list envelope
//! (`{"docs": [...]}`). Field handling is lenient where the CMS is lenient
//! (category references may be ids or populated objects) and strict where the
//! engine cannot proceed (a document without an id is rejected).

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{ContentItem, Status};
use crate::error::{RelataError, Result};

/// Serialization of a snapshot file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "yaml" | "yml" => Ok(SnapshotFormat::Yaml),
            other => Err(RelataError::unsupported(
                "snapshot extension",
                if other.is_empty() { "(none)" } else { other },
                "json, yaml, yml",
            )),
        }
    }
}

/// A document that could not be turned into a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    /// Position of the document in the snapshot
    pub index: usize,
    pub reason: String,
}

/// Result of parsing a snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotImport {
    pub items: Vec<ContentItem>,
    pub rejected: Vec<RejectedRecord>,
}

/// Read and parse a snapshot file
pub fn load_snapshot(path: &Path) -> Result<SnapshotImport> {
    let format = SnapshotFormat::from_path(path)?;
    let content =
        fs::read_to_string(path).map_err(|e| RelataError::io_operation("read", path.display(), e))?;

    parse_snapshot(&content, format).map_err(|e| match e {
        RelataError::InvalidSnapshot { reason, .. } => RelataError::InvalidSnapshot {
            path: path.to_path_buf(),
            reason,
        },
        other => other,
    })
}

/// Parse snapshot text into content items.
///
/// Structural problems with the document as a whole are errors. Problems with
/// a single record reject that record and parsing continues.
pub fn parse_snapshot(content: &str, format: SnapshotFormat) -> Result<SnapshotImport> {
    let root: Value = match format {
        SnapshotFormat::Json => serde_json::from_str(content)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
    };

    let docs = match root {
        Value::Array(docs) => docs,
        Value::Object(mut map) => match map.remove("docs") {
            Some(Value::Array(docs)) => docs,
            _ => {
                return Err(invalid_snapshot(
                    "expected an array of documents or an object with a `docs` array",
                ))
            }
        },
        Value::Null => Vec::new(),
        _ => return Err(invalid_snapshot("expected an array of documents")),
    };

    let mut import = SnapshotImport::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (index, doc) in docs.iter().enumerate() {
        match parse_record(doc) {
            Ok(item) => {
                if let Some(&pos) = positions.get(&item.id) {
                    tracing::debug!(id = %item.id, index, "duplicate id in snapshot, keeping last");
                    import.items[pos] = item;
                } else {
                    positions.insert(item.id.clone(), import.items.len());
                    import.items.push(item);
                }
            }
            Err(reason) => {
                tracing::warn!(index, reason = %reason, "rejected snapshot record");
                import.rejected.push(RejectedRecord { index, reason });
            }
        }
    }

    Ok(import)
}

fn invalid_snapshot(reason: &str) -> RelataError {
    RelataError::InvalidSnapshot {
        path: Default::default(),
        reason: reason.to_string(),
    }
}

fn parse_record(doc: &Value) -> std::result::Result<ContentItem, String> {
    let obj = doc
        .as_object()
        .ok_or_else(|| "record is not an object".to_string())?;

    let id = obj
        .get("id")
        .and_then(scalar_id)
        .ok_or_else(|| "missing id".to_string())?;

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string);

    let category_ids = obj
        .get("categories")
        .or_else(|| obj.get("categoryIds"))
        .map(category_refs)
        .unwrap_or_default();

    let published_at = obj
        .get("publishedAt")
        .or_else(|| obj.get("published_at"))
        .and_then(|v| parse_timestamp(&id, v));

    let status = match obj.get("status").or_else(|| obj.get("_status")) {
        None | Some(Value::Null) => Status::Published,
        Some(Value::String(s)) => s.parse::<Status>().map_err(|e| e.to_string())?,
        Some(other) => return Err(format!("status must be a string, got {}", other)),
    };

    Ok(ContentItem {
        id,
        title,
        category_ids,
        published_at,
        status,
    })
}

/// Ids arrive as strings or integers depending on the database adapter
fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Category references are either bare ids or populated documents
fn category_refs(value: &Value) -> BTreeSet<String> {
    let Some(refs) = value.as_array() else {
        return BTreeSet::new();
    };

    refs.iter()
        .filter_map(|r| match r {
            Value::Object(obj) => obj.get("id").and_then(scalar_id),
            other => scalar_id(other),
        })
        .collect()
}

fn parse_timestamp(id: &str, value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(dt.and_utc());
    }

    tracing::warn!(id, value = raw, "unparseable publishedAt, ignoring");
    None
}
