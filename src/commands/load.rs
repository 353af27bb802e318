//! `relata load` command - import a CMS content export
//!
//! Valid records are upserted; records without an id are listed as rejected
//! and do not stop the import. With `--replace` the snapshot is treated as the
//! complete export and stored items it no longer contains are deleted.

use std::path::Path;

use crate::cli::Cli;
use crate::commands::print_json;
use relata_core::content::record::load_snapshot;
use relata_core::content::Status;
use relata_core::error::Result;
use relata_core::format::{escape_quotes, records_header};
use relata_core::store::Store;

/// Execute the load command
pub fn execute(cli: &Cli, store: &Store, file: &Path, replace: bool) -> Result<()> {
    let import = load_snapshot(file)?;
    let (loaded, removed) = if replace {
        let synced = store.sync_items(&import.items)?;
        (synced.upserted, synced.removed)
    } else {
        (store.import_items(&import.items)?, Vec::new())
    };
    let drafts = import
        .items
        .iter()
        .filter(|i| i.status == Status::Draft)
        .count();

    tracing::info!(
        file = %file.display(),
        loaded,
        drafts,
        rejected = import.rejected.len(),
        removed = removed.len(),
        "snapshot imported"
    );

    crate::output_by_format_result!(cli.format,
        json => {
            print_json(&serde_json::json!({
                "file": file.display().to_string(),
                "loaded": loaded,
                "published": loaded - drafts,
                "drafts": drafts,
                "rejected": import.rejected,
                "removed": removed,
            }))
        },
        human => {
            if !cli.quiet {
                println!(
                    "Loaded {} item(s) from {} ({} published, {} draft)",
                    loaded,
                    file.display(),
                    loaded - drafts,
                    drafts
                );
                if !removed.is_empty() {
                    println!("Removed {} item(s) missing from the snapshot", removed.len());
                }
            }
            if !import.rejected.is_empty() {
                println!("Rejected {} record(s):", import.rejected.len());
                for rejected in &import.rejected {
                    println!("  #{}: {}", rejected.index, rejected.reason);
                }
            }
        },
        records => {
            println!(
                "{} loaded={} rejected={} removed={}",
                records_header(store.root(), "load"),
                loaded,
                import.rejected.len(),
                removed.len()
            );
            for id in &removed {
                println!("D removed {}", id);
            }
            for rejected in &import.rejected {
                println!(
                    "X rejected index={} reason=\"{}\"",
                    rejected.index,
                    escape_quotes(&rejected.reason)
                );
            }
        }
    )
}
