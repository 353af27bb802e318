//! Relevance engine for related-content suggestions
//!
//! Scores pairs of content items by shared categories and publish-date
//! proximity, and ranks each item's candidates into a bounded list.

mod ranker;
pub mod scorer;

pub use ranker::{edges_for, rank_all, rank_for};
pub use scorer::{score, score_breakdown, ScoreBreakdown};

use serde::{Deserialize, Serialize};

use crate::content::ContentItem;

/// Scored suggestion of `target_id` for `source_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatednessEdge {
    pub source_id: String,
    pub target_id: String,
    pub score: u32,
}

/// Ordered related items for one owner
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelatedItemsList {
    pub owner_id: String,
    /// Descending score, ties in snapshot order
    pub ordered_target_ids: Vec<String>,
}

impl RelatedItemsList {
    pub fn is_empty(&self) -> bool {
        self.ordered_target_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered_target_ids.len()
    }
}

/// Relevance engine over one immutable snapshot of published items
pub struct RelevanceEngine<'a> {
    items: &'a [ContentItem],
}

impl<'a> RelevanceEngine<'a> {
    /// Create a new engine over a snapshot
    pub fn new(items: &'a [ContentItem]) -> Self {
        RelevanceEngine { items }
    }

    pub fn get(&self, id: &str) -> Option<&'a ContentItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Score between two snapshot items; unknown ids score 0
    pub fn calculate_score(&self, source_id: &str, target_id: &str) -> u32 {
        match (self.get(source_id), self.get(target_id)) {
            (Some(a), Some(b)) => score(a, b),
            _ => 0,
        }
    }

    /// Top `limit` scored suggestions for `item`, which need not be part of
    /// the snapshot (drafts are ranked this way)
    pub fn find_related(&self, item: &ContentItem, limit: usize) -> Vec<RelatednessEdge> {
        edges_for(item, self.items, limit)
    }

    pub fn related_list(&self, item: &ContentItem, limit: usize) -> RelatedItemsList {
        rank_for(item, self.items, limit)
    }

    /// Lists for every snapshot item
    pub fn rank_all(&self, top_k: usize) -> Vec<RelatedItemsList> {
        rank_all(self.items, top_k)
    }
}
