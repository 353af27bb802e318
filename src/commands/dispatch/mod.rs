//! Command dispatch logic for relata

use std::time::Instant;

use crate::cli::paths::resolve_root_path;
use crate::cli::{Cli, Commands};
use crate::commands::{init, load, rank, related, score, status};
use relata_core::error::Result;
use tracing::debug;

mod command;

use command::{Command, CommandContext, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root_path(cli.root.clone());

    debug!(elapsed = ?start.elapsed(), root = %root.display(), "resolve_root");

    let ctx = CommandContext::new(cli, &root, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Init => init::execute(ctx.cli, ctx.root, ctx.explicit_store().as_deref()),
            Commands::Load { file, replace } => {
                let store = ctx.open_store()?;
                load::execute(ctx.cli, &store, &ctx.resolve(file), *replace)
            }
            Commands::Rank {
                top_k,
                max_items,
                drafts,
                dry_run,
            } => {
                let store = ctx.open_store()?;
                let overrides = rank::RankOverrides {
                    top_k: *top_k,
                    max_items: *max_items,
                    drafts: *drafts,
                    dry_run: *dry_run,
                };
                rank::execute(ctx.cli, &store, &overrides)
            }
            Commands::Related { id, preview, limit } => {
                let store = ctx.open_store()?;
                related::execute(ctx.cli, &store, id, *preview, *limit)
            }
            Commands::Score { source, target } => {
                let store = ctx.open_store()?;
                score::execute(ctx.cli, &store, source, target)
            }
            Commands::Status => status::execute(ctx.cli, &ctx.open_store()?),
        }
    }
}
