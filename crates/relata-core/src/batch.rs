//! Batch driver: snapshot, rank, persist
//!
//! One read of the published snapshot, one write per owner. A failed write is
//! recorded against its owner and the run continues; lists already written
//! stay written. Lists are computed one owner at a time, so an interrupt or
//! the item limit stops the ranking work as well as the writes.
//!
//! Drafts that are not owners in a run have their stored list emptied, so a
//! list written while an item was published is never served after it was
//! unpublished.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use serde::Serialize;

use crate::config::RelataConfig;
use crate::content::ContentItem;
use crate::error::{RelataError, Result};
use crate::similarity::{RelatedItemsList, RelevanceEngine};

/// Content store collaborator as seen by the batch driver
pub trait ContentStore {
    /// All published items in stable snapshot order
    fn load_published(&self) -> Result<Vec<ContentItem>>;

    /// All draft items
    fn load_drafts(&self) -> Result<Vec<ContentItem>>;

    /// Replace the owner's related-items list wholesale
    fn replace_related(&self, owner_id: &str, ordered_target_ids: &[String]) -> Result<()>;
}

/// Parameters for one batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub top_k: usize,
    pub suggest_for_drafts: bool,
    /// Stop after this many owners have been processed
    pub max_items: Option<usize>,
    /// Rank without writing
    pub dry_run: bool,
}

impl BatchOptions {
    pub fn from_config(config: &RelataConfig) -> Self {
        BatchOptions {
            top_k: config.ranking.top_k,
            suggest_for_drafts: config.ranking.suggest_for_drafts,
            max_items: config.batch.max_items,
            dry_run: false,
        }
    }
}

/// A write that failed for one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistFailure {
    pub owner_id: String,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Published items in the snapshot
    pub snapshot_size: usize,
    /// Snapshot records dropped for lacking an id
    pub skipped_malformed: usize,
    /// Owners whose list was computed and handed to the store (or not, on dry run)
    pub processed: usize,
    pub written: usize,
    /// Drafts whose stored list was emptied
    pub cleared: usize,
    /// Processed owners that received no suggestions
    pub empty: usize,
    pub failures: Vec<PersistFailure>,
    pub interrupted: bool,
    /// Stopped by `max_items`
    pub truncated: bool,
    pub dry_run: bool,
    pub lists: Vec<RelatedItemsList>,
}

impl BatchReport {
    /// Whether every owner of the snapshot was processed
    pub fn is_complete(&self) -> bool {
        !self.interrupted && !self.truncated
    }

    /// Fail when any write failed
    pub fn ensure_persisted(&self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(RelataError::PartialPersist {
                failed: self.failures.len(),
                attempted: self.written + self.cleared + self.failures.len(),
            })
        }
    }
}

/// Drop records that cannot be addressed; the rest of the batch proceeds
fn sanitize(items: Vec<ContentItem>) -> (Vec<ContentItem>, usize) {
    let before = items.len();
    let kept: Vec<ContentItem> = items
        .into_iter()
        .filter(|item| {
            let ok = item.has_valid_id();
            if !ok {
                tracing::warn!("skipping content item without an id");
            }
            ok
        })
        .collect();
    let skipped = before - kept.len();
    (kept, skipped)
}

fn interrupted(interrupt: Option<&AtomicBool>) -> bool {
    interrupt.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn persist<S: ContentStore + ?Sized>(
    store: &S,
    owner_id: &str,
    targets: &[String],
    report: &mut BatchReport,
) -> bool {
    match store.replace_related(owner_id, targets) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(owner_id, error = %e, "failed to persist related items");
            report.failures.push(PersistFailure {
                owner_id: owner_id.to_string(),
                error: e.to_string(),
            });
            false
        }
    }
}

/// Run one full recompute against `store`
#[tracing::instrument(skip(store, interrupt), fields(top_k = options.top_k, dry_run = options.dry_run))]
pub fn run_batch<S: ContentStore + ?Sized>(
    store: &S,
    options: &BatchOptions,
    interrupt: Option<&AtomicBool>,
) -> Result<BatchReport> {
    let start = Instant::now();

    let (snapshot, mut skipped_malformed) = sanitize(store.load_published()?);
    let (drafts, skipped) = sanitize(store.load_drafts()?);
    skipped_malformed += skipped;

    let engine = RelevanceEngine::new(&snapshot);

    let mut report = BatchReport {
        snapshot_size: snapshot.len(),
        skipped_malformed,
        dry_run: options.dry_run,
        ..Default::default()
    };

    if !options.suggest_for_drafts && !options.dry_run {
        for draft in &drafts {
            if interrupted(interrupt) {
                tracing::info!("batch interrupted before ranking");
                report.interrupted = true;
                return Ok(report);
            }
            if persist(store, &draft.id, &[], &mut report) {
                report.cleared += 1;
            }
        }
    }

    let owner_drafts: &[ContentItem] = if options.suggest_for_drafts {
        &drafts
    } else {
        &[]
    };

    for owner in snapshot.iter().chain(owner_drafts) {
        if interrupted(interrupt) {
            tracing::info!(processed = report.processed, "batch interrupted");
            report.interrupted = true;
            break;
        }
        if options.max_items.is_some_and(|max| report.processed >= max) {
            tracing::info!(processed = report.processed, "batch item limit reached");
            report.truncated = true;
            break;
        }

        let list = engine.related_list(owner, options.top_k);

        report.processed += 1;
        if list.is_empty() {
            report.empty += 1;
        }

        if !options.dry_run && persist(store, &list.owner_id, &list.ordered_target_ids, &mut report)
        {
            report.written += 1;
        }

        report.lists.push(list);
    }

    crate::trace_time!(start, "batch", owners = report.processed);
    tracing::debug!(
        elapsed = ?start.elapsed(),
        processed = report.processed,
        written = report.written,
        cleared = report.cleared,
        failed = report.failures.len(),
        "batch finished"
    );

    Ok(report)
}
