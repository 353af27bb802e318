use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::content::{ContentItem, Status};
use crate::error::{RelataError, Result};

struct ExtractedItemRow {
    id: String,
    title: Option<String>,
    status: String,
    published_at: Option<String>,
}

fn extract_item_row(row: &rusqlite::Row) -> rusqlite::Result<ExtractedItemRow> {
    Ok(ExtractedItemRow {
        id: row.get(0)?,
        title: row.get(1)?,
        status: row.get(2)?,
        published_at: row.get(3)?,
    })
}

fn parse_published_at(id: &str, raw: Option<String>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(id, value = %raw, error = %e, "ignoring unreadable published_at");
            None
        }
    }
}

impl ExtractedItemRow {
    fn into_item(self, category_ids: BTreeSet<String>) -> Result<ContentItem> {
        let status = self
            .status
            .parse::<Status>()
            .map_err(|e| RelataError::item_operation(&self.id, "read status of", e))?;
        let published_at = parse_published_at(&self.id, self.published_at);

        Ok(ContentItem {
            id: self.id,
            title: self.title,
            category_ids,
            published_at,
            status,
        })
    }
}

/// Outcome of a full-snapshot sync
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    pub upserted: usize,
    /// Stored ids absent from the snapshot, now deleted
    pub removed: Vec<String>,
}

/// Existing ids keep their original position in snapshot order
fn write_items(conn: &Connection, items: &[ContentItem]) -> Result<()> {
    for item in items {
        conn.execute(
            "INSERT INTO items (id, title, status, published_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                status = excluded.status,
                published_at = excluded.published_at",
            params![
                item.id,
                item.title,
                item.status.as_str(),
                item.published_at.map(|ts| ts.to_rfc3339()),
            ],
        )
        .map_err(|e| RelataError::item_operation(&item.id, "upsert", e))?;

        conn.execute(
            "DELETE FROM item_categories WHERE item_id = ?1",
            params![item.id],
        )
        .map_err(|e| RelataError::item_operation(&item.id, "clear categories of", e))?;

        for category in &item.category_ids {
            conn.execute(
                "INSERT INTO item_categories (item_id, category_id) VALUES (?1, ?2)",
                params![item.id, category],
            )
            .map_err(|e| RelataError::item_operation(&item.id, "insert category for", e))?;
        }
    }
    Ok(())
}

/// Delete stored items whose id is not in `keep`, including lists pointing at them
fn remove_missing(conn: &Connection, keep: &HashSet<&str>) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT id FROM items ORDER BY seq")
        .map_err(|e| crate::map_db_err!("prepare items query", e))?;
    let stored: Vec<String> = stmt
        .query_map([], |r| r.get(0))
        .and_then(|rows| rows.collect())
        .map_err(|e| crate::map_db_err!("read item ids", e))?;

    let removed: Vec<String> = stored
        .into_iter()
        .filter(|id| !keep.contains(id.as_str()))
        .collect();

    for id in &removed {
        // categories and the item's own list go with it via ON DELETE CASCADE
        conn.execute("DELETE FROM items WHERE id = ?1", params![id])
            .map_err(|e| RelataError::item_operation(id, "delete", e))?;
        conn.execute("DELETE FROM related_items WHERE target_id = ?1", params![id])
            .map_err(|e| RelataError::item_operation(id, "unlink", e))?;
    }
    Ok(removed)
}

impl super::Database {
    /// Insert or update items and replace their category memberships
    pub fn upsert_items(&self, items: &[ContentItem]) -> Result<usize> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| RelataError::transaction("begin upsert", e))?;

        write_items(&tx, items)?;

        tx.commit()
            .map_err(|e| RelataError::transaction("commit upsert", e))?;

        tracing::debug!(count = items.len(), "upserted items");
        Ok(items.len())
    }

    /// Make the stored items match `items` exactly: upsert every item and
    /// delete stored ids the snapshot no longer contains.
    pub fn sync_items(&self, items: &[ContentItem]) -> Result<SyncResult> {
        let keep: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| RelataError::transaction("begin sync", e))?;

        let removed = remove_missing(&tx, &keep)?;
        write_items(&tx, items)?;

        tx.commit()
            .map_err(|e| RelataError::transaction("commit sync", e))?;

        tracing::debug!(
            upserted = items.len(),
            removed = removed.len(),
            "synced items"
        );
        Ok(SyncResult {
            upserted: items.len(),
            removed,
        })
    }

    /// Items in snapshot order, optionally restricted to one status
    pub fn load_items(&self, status: Option<Status>) -> Result<Vec<ContentItem>> {
        let mut categories = self.load_categories()?;

        let sql = match status {
            Some(_) => {
                "SELECT id, title, status, published_at FROM items WHERE status = ?1 ORDER BY seq"
            }
            None => "SELECT id, title, status, published_at FROM items ORDER BY seq",
        };

        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| crate::map_db_err!("prepare items query", e))?;

        let rows: Vec<ExtractedItemRow> = match status {
            Some(s) => stmt
                .query_map(params![s.as_str()], extract_item_row)
                .and_then(|rows| rows.collect())
                .map_err(|e| crate::map_db_err!("read items", e))?,
            None => stmt
                .query_map([], extract_item_row)
                .and_then(|rows| rows.collect())
                .map_err(|e| crate::map_db_err!("read items", e))?,
        };

        rows.into_iter()
            .map(|row| {
                let cats = categories.remove(&row.id).unwrap_or_default();
                row.into_item(cats)
            })
            .collect()
    }

    pub fn get_item(&self, id: &str) -> Result<Option<ContentItem>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, title, status, published_at FROM items WHERE id = ?1",
                params![id],
                extract_item_row,
            )
            .optional()
            .map_err(|e| crate::map_db_err!("read item", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare("SELECT category_id FROM item_categories WHERE item_id = ?1")
            .map_err(|e| crate::map_db_err!("prepare categories query", e))?;
        let cats: BTreeSet<String> = stmt
            .query_map(params![id], |r| r.get(0))
            .and_then(|rows| rows.collect())
            .map_err(|e| crate::map_db_err!("read categories", e))?;

        row.into_item(cats).map(Some)
    }

    pub fn item_exists(&self, id: &str) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM items WHERE id = ?1)",
                params![id],
                |r| r.get(0),
            )
            .map_err(|e| crate::map_db_err!("check item", e))
    }

    /// Item count per status
    pub fn count_items(&self, status: Status) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM items WHERE status = ?1",
                params![status.as_str()],
                |r| r.get(0),
            )
            .map_err(|e| crate::map_db_err!("count items", e))
    }

    fn load_categories(&self) -> Result<HashMap<String, BTreeSet<String>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT item_id, category_id FROM item_categories")
            .map_err(|e| crate::map_db_err!("prepare categories query", e))?;

        let pairs: Vec<(String, String)> = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
            .and_then(|rows| rows.collect())
            .map_err(|e| crate::map_db_err!("read categories", e))?;

        let mut map: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (item_id, category_id) in pairs {
            map.entry(item_id).or_default().insert(category_id);
        }
        Ok(map)
    }
}
