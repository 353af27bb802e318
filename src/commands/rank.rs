//! `relata rank` command - full recompute of related items
//!
//! A partial run (Ctrl-C or `--max-items`) is reported, not treated as an
//! error; rerunning recomputes everything. Failed writes are listed and make
//! the command fail after every owner was attempted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cli::Cli;
use crate::commands::print_json;
use relata_core::batch::{run_batch, BatchOptions, BatchReport};
use relata_core::error::Result;
use relata_core::format::records_header;
use relata_core::store::Store;

/// Command-line overrides for the configured batch options
#[derive(Debug, Clone, Default)]
pub struct RankOverrides {
    pub top_k: Option<usize>,
    pub max_items: Option<usize>,
    pub drafts: bool,
    pub dry_run: bool,
}

impl RankOverrides {
    fn apply(&self, mut options: BatchOptions) -> BatchOptions {
        if let Some(top_k) = self.top_k {
            options.top_k = top_k;
        }
        if self.max_items.is_some() {
            options.max_items = self.max_items;
        }
        options.suggest_for_drafts |= self.drafts;
        options.dry_run = self.dry_run;
        options
    }
}

fn install_interrupt_flag() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }
    interrupted
}

/// Execute the rank command
pub fn execute(cli: &Cli, store: &Store, overrides: &RankOverrides) -> Result<()> {
    let options = overrides.apply(BatchOptions::from_config(store.config()));
    let interrupted = install_interrupt_flag();

    let report = run_batch(store, &options, Some(interrupted.as_ref()))?;

    if !options.dry_run && report.is_complete() && report.failures.is_empty() {
        store.mark_ranked()?;
    }

    output_report(cli, store, &options, &report)?;
    report.ensure_persisted()
}

fn output_report(
    cli: &Cli,
    store: &Store,
    options: &BatchOptions,
    report: &BatchReport,
) -> Result<()> {
    crate::output_by_format_result!(cli.format,
        json => {
            print_json(&serde_json::json!({
                "top_k": options.top_k,
                "report": report,
            }))
        },
        human => {
            if !cli.quiet {
                let verb = if report.dry_run { "Ranked (dry run)" } else { "Ranked" };
                println!(
                    "{} {} item(s): {} written, {} without suggestions, {} failed",
                    verb,
                    report.processed,
                    report.written,
                    report.empty,
                    report.failures.len()
                );
                if report.cleared > 0 {
                    println!("Cleared lists on {} draft item(s)", report.cleared);
                }
                if report.skipped_malformed > 0 {
                    println!("Skipped {} item(s) without an id", report.skipped_malformed);
                }
                if report.interrupted {
                    println!("Interrupted. Run `relata rank` again to recompute everything.");
                }
                if report.truncated {
                    println!(
                        "Stopped at the item limit ({} of {} published).",
                        report.processed, report.snapshot_size
                    );
                }
                if report.dry_run {
                    for list in &report.lists {
                        println!("{} -> [{}]", list.owner_id, list.ordered_target_ids.join(", "));
                    }
                }
            }
            for failure in &report.failures {
                println!("failed: {} ({})", failure.owner_id, failure.error);
            }
        },
        records => {
            println!(
                "{} top_k={} processed={} written={} cleared={} failed={} complete={}",
                records_header(store.root(), "rank"),
                options.top_k,
                report.processed,
                report.written,
                report.cleared,
                report.failures.len(),
                report.is_complete()
            );
            for list in &report.lists {
                for (position, target) in list.ordered_target_ids.iter().enumerate() {
                    println!("R {} {} position={}", list.owner_id, target, position);
                }
            }
        }
    )
}
