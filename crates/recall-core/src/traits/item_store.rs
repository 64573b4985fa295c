//! Item store trait.

use chrono::{DateTime, Utc};

use crate::error::RecallResult;
use crate::types::ReviewItem;

/// Persistence seam for review items.
///
/// The engine is pure; everything stateful goes through this trait. An
/// implementation must provide single-writer semantics per item for
/// schedule updates: two concurrent updates for the same item must not
/// interleave partial state. [`update_schedule`](ItemStore::update_schedule)
/// exposes this as compare-and-swap on `updated_at`.
///
/// Selection reads a snapshot and may run concurrently with unrelated
/// updates; staleness of the snapshot is acceptable.
pub trait ItemStore {
    /// Insert a new item. Fails if the id already exists.
    fn insert(&self, item: &ReviewItem) -> RecallResult<()>;

    /// Fetch one item, enforcing ownership.
    ///
    /// Returns `NotFound` for a missing id and `Ownership` when the item
    /// exists under a different owner; both are surfaced unchanged to
    /// callers.
    fn get(&self, owner_id: &str, item_id: &str) -> RecallResult<ReviewItem>;

    /// All items with `next_review_at <= now` for one owner.
    ///
    /// Ordered ascending by `next_review_at`, then id, so snapshots are
    /// deterministic and time-mode selection can be pushed down without
    /// changing observable results.
    fn due_items(&self, owner_id: &str, now: DateTime<Utc>) -> RecallResult<Vec<ReviewItem>>;

    /// Persist a scheduling update.
    ///
    /// With `expected_updated_at`, the write only applies if the stored
    /// `updated_at` still matches (compare-and-swap); a stale token fails
    /// with `Conflict` and leaves the row untouched. With `None` the write
    /// is last-write-wins.
    fn update_schedule(
        &self,
        item: &ReviewItem,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> RecallResult<()>;

    /// Number of items for one owner.
    fn count(&self, owner_id: &str) -> RecallResult<usize>;
}
