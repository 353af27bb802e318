use std::time::Instant;

use super::scorer::score;
use super::{RelatedItemsList, RelatednessEdge};
use crate::content::ContentItem;

/// Scored, sorted and truncated edges from `source` into `candidates`.
///
/// Candidates are other published items; the source itself (by id), drafts,
/// and zero-score candidates are dropped. Equal scores keep candidate order.
pub fn edges_for(
    source: &ContentItem,
    candidates: &[ContentItem],
    top_k: usize,
) -> Vec<RelatednessEdge> {
    let mut edges: Vec<RelatednessEdge> = candidates
        .iter()
        .filter(|c| c.id != source.id && c.is_published())
        .filter_map(|c| {
            let s = score(source, c);
            (s > 0).then(|| RelatednessEdge {
                source_id: source.id.clone(),
                target_id: c.id.clone(),
                score: s,
            })
        })
        .collect();

    // Vec::sort_by is stable
    edges.sort_by(|a, b| b.score.cmp(&a.score));
    edges.truncate(top_k);
    edges
}

/// Rank one source against a candidate pool
pub fn rank_for(source: &ContentItem, candidates: &[ContentItem], top_k: usize) -> RelatedItemsList {
    RelatedItemsList {
        owner_id: source.id.clone(),
        ordered_target_ids: edges_for(source, candidates, top_k)
            .into_iter()
            .map(|e| e.target_id)
            .collect(),
    }
}

/// Rank every item of the snapshot against the rest, one list per item in
/// snapshot order
pub fn rank_all(all_published: &[ContentItem], top_k: usize) -> Vec<RelatedItemsList> {
    let start = Instant::now();

    let lists: Vec<RelatedItemsList> = all_published
        .iter()
        .map(|source| rank_for(source, all_published, top_k))
        .collect();

    crate::trace_time!(start, "rank_all", items = all_published.len());
    lists
}
