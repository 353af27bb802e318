//! Store management for relata
//!
//! The store is a directory (default `.relata/`) holding `config.toml` and the
//! SQLite database with content items and their persisted related lists.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::batch::ContentStore;
use crate::config::RelataConfig;
use crate::content::{ContentItem, Status};
use crate::db::{Database, SyncResult};
use crate::error::{RelataError, Result};
use paths::{CONFIG_FILE, DEFAULT_STORE_DIR, LAST_RANKED_KEY};

/// Counts reported by `relata status`
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub published: i64,
    pub drafts: i64,
    pub with_related: i64,
    pub last_ranked_at: Option<String>,
}

/// The relata store
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    config: RelataConfig,
    db: Database,
}

impl Store {
    /// Discover a store by walking up from the given root directory
    pub fn discover(root: &Path) -> Result<Self> {
        let store_path = paths::discover_store(root)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(RelataError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            RelataConfig::load(&config_path)?
        } else {
            RelataConfig::default()
        };

        let db = Database::open(path)?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            db,
        })
    }

    /// Create a store under `project_root` (or reuse an existing one)
    pub fn init(project_root: &Path) -> Result<Self> {
        let store_path = project_root.join(DEFAULT_STORE_DIR);
        Self::init_at(&store_path)
    }

    /// Create a store at an explicit directory; idempotent
    #[tracing::instrument(skip(store_path), fields(path = %store_path.display()))]
    pub fn init_at(store_path: &Path) -> Result<Self> {
        fs::create_dir_all(store_path)
            .map_err(|e| RelataError::io_operation("create", store_path.display(), e))?;

        let config_path = store_path.join(CONFIG_FILE);
        if !config_path.exists() {
            RelataConfig::default().save(&config_path)?;
            tracing::debug!("wrote default config");
        }

        Self::open(store_path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RelataConfig {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Insert or update imported items
    pub fn import_items(&self, items: &[ContentItem]) -> Result<usize> {
        self.db.upsert_items(items)
    }

    /// Replace the stored content with a full snapshot
    pub fn sync_items(&self, items: &[ContentItem]) -> Result<SyncResult> {
        let result = self.db.sync_items(items)?;
        for id in &result.removed {
            tracing::info!(id = %id, "removed item missing from snapshot");
        }
        Ok(result)
    }

    /// Look up an item, failing when it is not stored
    pub fn require_item(&self, id: &str) -> Result<ContentItem> {
        self.db
            .get_item(id)?
            .ok_or_else(|| RelataError::ItemNotFound { id: id.to_string() })
    }

    pub fn related_ids(&self, owner_id: &str) -> Result<Vec<String>> {
        if !self.db.item_exists(owner_id)? {
            return Err(RelataError::ItemNotFound {
                id: owner_id.to_string(),
            });
        }
        self.db.get_related(owner_id)
    }

    /// Record completion of a batch run
    pub fn mark_ranked(&self) -> Result<()> {
        self.db.set_meta(LAST_RANKED_KEY, &Utc::now().to_rfc3339())
    }

    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            published: self.db.count_items(Status::Published)?,
            drafts: self.db.count_items(Status::Draft)?,
            with_related: self.db.count_owners_with_related()?,
            last_ranked_at: self.db.get_meta(LAST_RANKED_KEY)?,
        })
    }
}

impl ContentStore for Store {
    fn load_published(&self) -> Result<Vec<ContentItem>> {
        self.db.load_items(Some(Status::Published))
    }

    fn load_drafts(&self) -> Result<Vec<ContentItem>> {
        self.db.load_items(Some(Status::Draft))
    }

    fn replace_related(&self, owner_id: &str, ordered_target_ids: &[String]) -> Result<()> {
        self.db.replace_related(owner_id, ordered_target_ids)
    }
}
