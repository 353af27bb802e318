//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Default number of related items kept per owner
pub const DEFAULT_TOP_K: usize = 10;

/// Largest configured `top_k` accepted at load time
pub const MAX_TOP_K: usize = 1000;

/// Store configuration (`.relata/config.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelataConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Ranking parameters
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Batch driver limits
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Configuration for the batch ranker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Cap on related items retained per owner
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Also write suggestions onto draft items (drafts are never candidates)
    #[serde(default)]
    pub suggest_for_drafts: bool,
}

/// Configuration for the outer batch loop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Stop after persisting this many lists (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Default for RelataConfig {
    fn default() -> Self {
        RelataConfig {
            version: default_version(),
            ranking: RankingConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            top_k: default_top_k(),
            suggest_for_drafts: false,
        }
    }
}
