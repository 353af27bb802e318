//! `relata related` command - show an item's related items
//!
//! Reads the persisted list by default. `--preview` ranks the item against
//! the current published snapshot without writing anything.

use crate::cli::Cli;
use crate::commands::print_json;
use relata_core::batch::ContentStore;
use relata_core::error::Result;
use relata_core::format::{escape_quotes, records_header};
use relata_core::similarity::RelevanceEngine;
use relata_core::store::Store;

struct RelatedRow {
    id: String,
    title: Option<String>,
    score: Option<u32>,
}

/// Execute the related command
pub fn execute(
    cli: &Cli,
    store: &Store,
    id: &str,
    preview: bool,
    limit: Option<usize>,
) -> Result<()> {
    if limit.is_some() && !preview {
        relata_core::bail_usage!("--limit only applies with --preview");
    }

    let rows = if preview {
        preview_rows(store, id, limit.unwrap_or(store.config().ranking.top_k))?
    } else {
        stored_rows(store, id)?
    };

    crate::output_by_format_result!(cli.format,
        json => {
            let related: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    let mut obj = serde_json::json!({ "id": row.id, "title": row.title });
                    if let Some(score) = row.score {
                        obj["score"] = serde_json::json!(score);
                    }
                    obj
                })
                .collect();
            print_json(&serde_json::json!({
                "id": id,
                "preview": preview,
                "related": related,
            }))
        },
        human => {
            if rows.is_empty() {
                if !cli.quiet {
                    println!("No related items for {}", id);
                }
            } else {
                for row in &rows {
                    let title = row.title.as_deref().unwrap_or("");
                    match row.score {
                        Some(score) => println!("{:>4}  {}  {}", score, row.id, title),
                        None => println!("{}  {}", row.id, title),
                    }
                }
            }
        },
        records => {
            println!(
                "{} id={} preview={} count={}",
                records_header(store.root(), "related"),
                id,
                preview,
                rows.len()
            );
            for (position, row) in rows.iter().enumerate() {
                let score = row.score.map(|s| format!(" score={}", s)).unwrap_or_default();
                println!(
                    "R {} {} position={}{} \"{}\"",
                    id,
                    row.id,
                    position,
                    score,
                    escape_quotes(row.title.as_deref().unwrap_or(""))
                );
            }
        }
    )
}

fn stored_rows(store: &Store, id: &str) -> Result<Vec<RelatedRow>> {
    store
        .related_ids(id)?
        .into_iter()
        .map(|target| {
            // Targets removed since the last run are still listed by id
            let title = store.db().get_item(&target)?.and_then(|item| item.title);
            Ok(RelatedRow {
                id: target,
                title,
                score: None,
            })
        })
        .collect()
}

fn preview_rows(store: &Store, id: &str, limit: usize) -> Result<Vec<RelatedRow>> {
    let item = store.require_item(id)?;
    let snapshot = store.load_published()?;
    let engine = RelevanceEngine::new(&snapshot);

    Ok(engine
        .find_related(&item, limit)
        .into_iter()
        .map(|edge| RelatedRow {
            title: engine.get(&edge.target_id).and_then(|i| i.title.clone()),
            id: edge.target_id,
            score: Some(edge.score),
        })
        .collect())
}
