//! `relata status` command - store counts

use crate::cli::Cli;
use crate::commands::print_json;
use relata_core::error::Result;
use relata_core::format::records_header;
use relata_core::store::Store;

/// Execute the status command
pub fn execute(cli: &Cli, store: &Store) -> Result<()> {
    let stats = store.stats()?;

    crate::output_by_format_result!(cli.format,
        json => {
            print_json(&serde_json::json!({
                "store": store.root().display().to_string(),
                "top_k": store.config().ranking.top_k,
                "stats": stats,
            }))
        },
        human => {
            println!("Store: {}", store.root().display());
            println!("Published items: {}", stats.published);
            println!("Draft items: {}", stats.drafts);
            println!("Items with related lists: {}", stats.with_related);
            println!(
                "Last ranked: {}",
                stats.last_ranked_at.as_deref().unwrap_or("never")
            );
        },
        records => {
            println!(
                "{} published={} drafts={} with_related={} last_ranked={}",
                records_header(store.root(), "status"),
                stats.published,
                stats.drafts,
                stats.with_related,
                stats.last_ranked_at.as_deref().unwrap_or("never")
            );
        }
    )
}
