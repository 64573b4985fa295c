//! Review orchestration and the validation boundary.
//!
//! [`ReviewService`] wires a store to the scheduler, scorer, and selector.
//! All raw input validation happens here, before any state is touched:
//! out-of-range ratings and limits are rejected (never clamped), and store
//! errors pass through unchanged.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{RecallError, RecallResult};
use crate::priority::PriorityScorer;
use crate::selection::{Selection, SelectionMode, Selector};
use crate::srs::Sm2Scheduler;
use crate::traits::ItemStore;
use crate::types::{Rating, ReviewItem};

/// Outcome of a submitted review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    /// The item as persisted after the review.
    pub item: ReviewItem,
    /// The rating that was applied.
    pub rating: Rating,
}

/// Orchestrates rating submission and session building over an [`ItemStore`].
pub struct ReviewService<S: ItemStore> {
    store: S,
    scheduler: Sm2Scheduler,
    selector: Selector,
    max_session_limit: usize,
}

impl<S: ItemStore> ReviewService<S> {
    /// Create a service from a store and engine configuration.
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self {
            store,
            scheduler: Sm2Scheduler::new(config.srs),
            selector: Selector::new(PriorityScorer::new(config.weights)),
            max_session_limit: config.max_session_limit,
        }
    }

    /// Create a service with default configuration.
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, EngineConfig::default())
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create and persist an item with default scheduling state.
    ///
    /// The item is due immediately. A UUID v4 id is generated.
    pub fn create_item(&self, owner_id: &str, now: DateTime<Utc>) -> RecallResult<ReviewItem> {
        self.create_item_with_id(Uuid::new_v4().to_string(), owner_id, now)
    }

    /// Create and persist an item with a caller-supplied id.
    pub fn create_item_with_id(
        &self,
        id: impl Into<String>,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> RecallResult<ReviewItem> {
        let item = ReviewItem::new(id, owner_id, now);
        self.store.insert(&item)?;
        debug!(item_id = %item.id, owner_id, "created review item");
        Ok(item)
    }

    /// Apply a rating to an item and persist the advanced schedule.
    ///
    /// `score` is the raw 0-5 recall quality; anything else fails with
    /// `InvalidRating` before the item is even loaded. Passing the
    /// `updated_at` observed when the item was shown as
    /// `expected_updated_at` turns the write into a compare-and-swap, so a
    /// double-submission is rejected with `Conflict` instead of advancing
    /// the schedule twice.
    pub fn submit_review(
        &self,
        owner_id: &str,
        item_id: &str,
        score: u8,
        expected_updated_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> RecallResult<ReviewOutcome> {
        let rating = Rating::from_score(score).ok_or_else(|| RecallError::invalid_rating(score))?;

        let item = self.store.get(owner_id, item_id)?;
        let advanced = self.scheduler.advance_item(&item, rating, now);
        self.store.update_schedule(&advanced, expected_updated_at)?;

        debug!(
            item_id,
            owner_id,
            score,
            interval_days = advanced.interval_days,
            ease_factor = advanced.ease_factor,
            repetitions = advanced.repetitions,
            status = %advanced.status,
            "applied review"
        );

        Ok(ReviewOutcome {
            item: advanced,
            rating,
        })
    }

    /// Build a bounded review session from the current due set.
    ///
    /// `limit` must be in `1..=max_session_limit`; anything else fails with
    /// `InvalidLimit` before the store is queried.
    pub fn review_session(
        &self,
        owner_id: &str,
        mode: SelectionMode,
        limit: usize,
        include_stats: bool,
        now: DateTime<Utc>,
    ) -> RecallResult<Selection> {
        if limit == 0 || limit > self.max_session_limit {
            return Err(RecallError::invalid_limit(limit, self.max_session_limit));
        }

        let due = self.store.due_items(owner_id, now)?;
        let selection = self.selector.select(due, mode, limit, include_stats, now);

        debug!(
            owner_id,
            %mode,
            limit,
            selected = selection.count,
            "built review session"
        );

        Ok(selection)
    }
}
