//! `relata score` command - explain the score between two items

use crate::cli::Cli;
use crate::commands::print_json;
use relata_core::error::Result;
use relata_core::similarity::score_breakdown;
use relata_core::store::Store;

/// Execute the score command
pub fn execute(cli: &Cli, store: &Store, source_id: &str, target_id: &str) -> Result<()> {
    let source = store.require_item(source_id)?;
    let target = store.require_item(target_id)?;
    let breakdown = score_breakdown(&source, &target);

    // Drafts score like any other item but never appear in published lists
    let eligible = target.is_published() && source.id != target.id;

    crate::output_by_format_result!(cli.format,
        json => {
            print_json(&serde_json::json!({
                "source": source.id,
                "target": target.id,
                "eligible": eligible,
                "breakdown": breakdown,
            }))
        },
        human => {
            println!("{} -> {}: {}", source.label(), target.label(), breakdown.total);
            if !cli.quiet {
                println!(
                    "  categories: {} shared x3 = {}",
                    breakdown.shared_categories, breakdown.category_points
                );
                match breakdown.day_gap {
                    Some(days) => println!(
                        "  recency:    {} day(s) apart = {}",
                        days, breakdown.recency_points
                    ),
                    None => println!("  recency:    no publish date = 0"),
                }
                if !eligible {
                    println!("  (target is not eligible as a suggestion)");
                }
            }
        },
        records => {
            let gap = breakdown
                .day_gap
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "S {} {} total={} shared={} category={} days={} recency={} eligible={}",
                source.id,
                target.id,
                breakdown.total,
                breakdown.shared_categories,
                breakdown.category_points,
                gap,
                breakdown.recency_points,
                eligible
            );
        }
    )
}
