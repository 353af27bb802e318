//! `relata init` command - create a new store
//!
//! Idempotent: an existing store and its config are left untouched.

use std::path::Path;

use crate::cli::Cli;
use crate::commands::print_json;
use relata_core::error::Result;
use relata_core::format::records_header;
use relata_core::store::Store;

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path, store_path: Option<&Path>) -> Result<()> {
    let store = match store_path {
        Some(path) => Store::init_at(path)?,
        None => Store::init(root)?,
    };

    crate::output_by_format_result!(cli.format,
        json => {
            print_json(&serde_json::json!({
                "status": "ok",
                "store": store.root().display().to_string(),
                "message": "Store initialized"
            }))
        },
        human => {
            if !cli.quiet {
                println!("Initialized relata store at {}", store.root().display());
                println!();
                println!("Run `relata load <export.json>` to import content.");
            }
        },
        records => {
            println!("{} status=ok", records_header(store.root(), "init"));
        }
    )
}
