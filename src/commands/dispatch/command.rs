//! Command trait and the context shared by every subcommand

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::paths::resolve_against;
use crate::cli::Cli;
use relata_core::error::Result;
use relata_core::store::Store;

/// Open `--store` when given, otherwise walk up from `root`
pub fn discover_or_open_store(cli: &Cli, root: &Path) -> Result<Store> {
    match &cli.store {
        Some(path) => Store::open(&resolve_against(root, path)),
        None => Store::discover(root),
    }
}

pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a Path,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a Path, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// A user-supplied path relative to the resolved root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_against(self.root, path)
    }

    /// Explicit `--store` directory, if any, resolved against the root
    pub fn explicit_store(&self) -> Option<PathBuf> {
        self.cli.store.as_deref().map(|p| self.resolve(p))
    }

    pub fn open_store(&self) -> Result<Store> {
        let store = discover_or_open_store(self.cli, self.root)?;
        tracing::debug!(
            elapsed = ?self.start.elapsed(),
            store = %store.root().display(),
            "open_store"
        );
        Ok(store)
    }
}

pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Bare `relata` with no subcommand
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("relata {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Precomputed related-content suggestions for CMS content.");
        println!();
        println!("Run `relata --help` for usage information.");
        Ok(())
    }
}
