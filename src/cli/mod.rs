//! CLI argument parsing for relata
//!
//! Global flags: --root, --store, --format, --quiet, --verbose, --log-level, --log-json

pub mod format;
pub mod paths;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use relata_core::format::OutputFormat;

/// `--format` parser; clap rejects anything outside the listed values
fn format_parser() -> impl TypedValueParser<Value = OutputFormat> {
    PossibleValuesParser::new(OutputFormat::ALL.map(OutputFormat::as_str))
        .map(|s| s.parse::<OutputFormat>().unwrap_or_default())
}

/// Relata - precomputed related-content suggestions for CMS content
#[derive(Parser, Debug)]
#[command(name = "relata")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store directory path
    #[arg(long, global = true, env = "RELATA_STORE")]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_parser = format_parser(), default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "debug", "relata_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new relata store
    Init,

    /// Import a CMS content export (JSON or YAML)
    Load {
        /// Snapshot file (.json, .yaml, .yml)
        file: PathBuf,

        /// Treat the file as the complete export and delete items it no longer contains
        #[arg(long)]
        replace: bool,
    },

    /// Recompute and persist related items for every published item
    Rank {
        /// Cap on related items per owner (overrides config)
        #[arg(long)]
        top_k: Option<usize>,

        /// Stop after this many owners (overrides config)
        #[arg(long)]
        max_items: Option<usize>,

        /// Also write suggestions onto draft items
        #[arg(long)]
        drafts: bool,

        /// Compute without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show related items for one content item
    Related {
        /// Content item ID
        id: String,

        /// Compute fresh suggestions with scores instead of reading the stored list
        #[arg(long)]
        preview: bool,

        /// Cap for --preview (defaults to configured top_k)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Explain the relevance score between two items
    Score {
        /// Source item ID
        source: String,
        /// Target item ID
        target: String,
    },

    /// Show store counts and last ranking time
    Status,
}
