//! Store directory layout and discovery

use std::path::{Path, PathBuf};

use crate::error::{RelataError, Result};

/// Default store directory name
pub const DEFAULT_STORE_DIR: &str = ".relata";

/// Configuration file inside the store
pub const CONFIG_FILE: &str = "config.toml";

/// Store metadata key recording the last completed batch run
pub const LAST_RANKED_KEY: &str = "last_ranked_at";

/// Walk up from `root` until a store directory is found
pub fn discover_store(root: &Path) -> Result<PathBuf> {
    let mut current = root.to_path_buf();

    loop {
        let store_path = current.join(DEFAULT_STORE_DIR);
        if store_path.is_dir() {
            return Ok(store_path);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(RelataError::StoreNotFound {
                    search_root: root.to_path_buf(),
                });
            }
        }
    }
}
