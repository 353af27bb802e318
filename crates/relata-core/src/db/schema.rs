//! SQLite database schema for relata

use rusqlite::{Connection, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Result of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaCreateResult {
    /// Schema already current or freshly created
    Ok,
    /// An incompatible schema was dropped; stored content must be reloaded
    Recreated,
}

const SCHEMA_SQL: &str = r#"
-- Content items (id-level view of CMS documents)
CREATE TABLE IF NOT EXISTS items (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    title TEXT,
    status TEXT NOT NULL,
    published_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_items_status ON items(status);

-- Category membership
CREATE TABLE IF NOT EXISTS item_categories (
    item_id TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
    category_id TEXT NOT NULL,
    PRIMARY KEY (item_id, category_id)
);
CREATE INDEX IF NOT EXISTS idx_item_categories_category ON item_categories(category_id);

-- Persisted related-items lists
CREATE TABLE IF NOT EXISTS related_items (
    owner_id TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    target_id TEXT NOT NULL,
    PRIMARY KEY (owner_id, position)
);

-- Store metadata
CREATE TABLE IF NOT EXISTS store_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute("DROP TABLE IF EXISTS related_items", [])?;
    conn.execute("DROP TABLE IF EXISTS item_categories", [])?;
    conn.execute("DROP TABLE IF EXISTS items", [])?;
    conn.execute("DROP TABLE IF EXISTS store_meta", [])?;
    Ok(())
}

fn stored_version(conn: &Connection) -> Option<i32> {
    conn.query_row(
        "SELECT value FROM store_meta WHERE key = 'schema_version'",
        [],
        |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
    )
    .ok()
}

fn write_fresh_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR REPLACE INTO store_meta (key, value) VALUES ('schema_version', ?1)",
        [&CURRENT_SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}

pub fn create_schema(conn: &Connection) -> Result<SchemaCreateResult> {
    match stored_version(conn) {
        None => {
            write_fresh_schema(conn)?;
            Ok(SchemaCreateResult::Ok)
        }
        Some(v) if v == CURRENT_SCHEMA_VERSION => Ok(SchemaCreateResult::Ok),
        Some(v) => {
            drop_all_tables(conn)?;
            write_fresh_schema(conn)?;
            tracing::warn!(
                "Database schema changed from version {} to {}; reload content with `relata load`",
                v,
                CURRENT_SCHEMA_VERSION
            );
            Ok(SchemaCreateResult::Recreated)
        }
    }
}
