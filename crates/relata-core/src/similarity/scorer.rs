use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::ContentItem;

/// Points per category shared by source and target
pub const CATEGORY_WEIGHT: u32 = 3;

/// Recency bands as (exclusive upper bound in days, points), checked in order
pub const RECENCY_BANDS: [(i64, u32); 3] = [(7, 5), (30, 3), (90, 1)];

/// Individual contributions to a relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub shared_categories: usize,
    pub category_points: u32,
    /// Whole days between the two publish timestamps, when both exist
    pub day_gap: Option<i64>,
    pub recency_points: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    const ZERO: ScoreBreakdown = ScoreBreakdown {
        shared_categories: 0,
        category_points: 0,
        day_gap: None,
        recency_points: 0,
        total: 0,
    };
}

/// Relevance of `target` as a suggestion for `source`
pub fn score(source: &ContentItem, target: &ContentItem) -> u32 {
    score_breakdown(source, target).total
}

pub fn score_breakdown(source: &ContentItem, target: &ContentItem) -> ScoreBreakdown {
    if source.id == target.id {
        return ScoreBreakdown::ZERO;
    }

    let shared_categories = source
        .category_ids
        .intersection(&target.category_ids)
        .count();
    let category_points = CATEGORY_WEIGHT.saturating_mul(shared_categories as u32);

    let day_gap = match (source.published_at, target.published_at) {
        (Some(a), Some(b)) => Some(day_gap(a, b)),
        _ => None,
    };
    let recency_points = day_gap.map(recency_points).unwrap_or(0);

    ScoreBreakdown {
        shared_categories,
        category_points,
        day_gap,
        recency_points,
        total: category_points.saturating_add(recency_points),
    }
}

/// Absolute difference in whole days, partial days truncated
pub fn day_gap(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (a - b).num_days().abs()
}

pub fn recency_points(days: i64) -> u32 {
    RECENCY_BANDS
        .iter()
        .find(|(limit, _)| days < *limit)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}
