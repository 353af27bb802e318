//! Store configuration for relata
//!
//! Configuration is stored in `.relata/config.toml`. A missing file means
//! defaults; a present file is validated when loaded.

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{RelataError, Result};

pub use types::{
    BatchConfig, RankingConfig, RelataConfig, DEFAULT_TOP_K, MAX_TOP_K, STORE_FORMAT_VERSION,
};

impl RelataConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RelataConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RelataError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check values that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.version != STORE_FORMAT_VERSION {
            return Err(RelataError::InvalidStore {
                reason: format!(
                    "unsupported store format version {} (expected {})",
                    self.version, STORE_FORMAT_VERSION
                ),
            });
        }

        if self.ranking.top_k == 0 || self.ranking.top_k > MAX_TOP_K {
            crate::bail_invalid!(
                "ranking.top_k",
                format!("{} (expected 1..={})", self.ranking.top_k, MAX_TOP_K)
            );
        }

        if self.batch.max_items == Some(0) {
            crate::bail_invalid!("batch.max_items", "0 (omit the key for no limit)");
        }

        Ok(())
    }
}
