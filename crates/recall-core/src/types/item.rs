//! Review item types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Coarse learning status of a review item.
///
/// The status is a label derived from the outcome of the most recent rating,
/// not an input to the scheduling math. A failed review relabels the item
/// `new` regardless of its previous status; see
/// [`next_status`](crate::srs::next_status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemStatus {
    /// Never successfully recalled, or reset by a failed review.
    New,
    /// At least one successful recall since the last reset.
    Learning,
    /// Promoted by the caller after sustained successful recalls.
    Mastered,
}

impl Default for ItemStatus {
    fn default() -> Self {
        ItemStatus::New
    }
}

/// A learnable item with its per-owner review history.
///
/// Scheduling state is mutated exclusively through the scheduler in response
/// to a rating event. Invariants: `interval_days >= 1`,
/// `ease_factor >= 1.3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Unique identifier, immutable.
    pub id: String,
    /// Owning user. Ownership is enforced by the store, not the engine.
    pub owner_id: String,
    /// Days until next review.
    pub interval_days: u32,
    /// SM-2 ease factor, floored at 1.3.
    pub ease_factor: f64,
    /// Consecutive successful recalls since the last reset.
    pub repetitions: u32,
    /// Coarse learning status.
    pub status: ItemStatus,
    /// The item is due when `now >= next_review_at`.
    pub next_review_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last schedule update. Equal to `created_at` until the first review.
    pub updated_at: DateTime<Utc>,
}

impl ReviewItem {
    /// Default ease factor assigned to freshly created items.
    pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

    /// Create an item with default scheduling state, due immediately.
    ///
    /// Defaults: `interval_days = 1`, `ease_factor = 2.5`,
    /// `repetitions = 0`, `status = new`, `next_review_at = now`.
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            interval_days: 1,
            ease_factor: Self::DEFAULT_EASE_FACTOR,
            repetitions: 0,
            status: ItemStatus::New,
            next_review_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the status.
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the ease factor.
    pub fn with_ease_factor(mut self, ease_factor: f64) -> Self {
        self.ease_factor = ease_factor;
        self
    }

    /// Set the interval.
    pub fn with_interval_days(mut self, interval_days: u32) -> Self {
        self.interval_days = interval_days;
        self
    }

    /// Set the repetition count.
    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the next review timestamp.
    pub fn with_next_review_at(mut self, next_review_at: DateTime<Utc>) -> Self {
        self.next_review_at = next_review_at;
        self
    }

    /// Whether the item is due for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::str::FromStr;

    #[test]
    fn test_new_item_defaults() {
        let now = Utc::now();
        let item = ReviewItem::new("item-1", "user-1", now);

        assert_eq!(item.interval_days, 1);
        assert!((item.ease_factor - 2.5).abs() < f64::EPSILON);
        assert_eq!(item.repetitions, 0);
        assert_eq!(item.status, ItemStatus::New);
        assert_eq!(item.next_review_at, now);
        assert_eq!(item.updated_at, item.created_at);
    }

    #[test]
    fn test_new_item_is_due_immediately() {
        let now = Utc::now();
        let item = ReviewItem::new("item-1", "user-1", now);

        assert!(item.is_due(now));
        assert!(item.is_due(now + Duration::hours(1)));
        assert!(!item.is_due(now - Duration::seconds(1)));
    }

    #[test]
    fn test_is_due_at_exact_boundary() {
        let now = Utc::now();
        let item = ReviewItem::new("item-1", "user-1", now).with_next_review_at(now);

        // Due is inclusive: now >= next_review_at
        assert!(item.is_due(now));
    }

    #[test]
    fn test_status_string_round_trip() {
        assert_eq!(ItemStatus::New.to_string(), "new");
        assert_eq!(ItemStatus::Learning.to_string(), "learning");
        assert_eq!(ItemStatus::Mastered.to_string(), "mastered");

        assert_eq!(ItemStatus::from_str("new").unwrap(), ItemStatus::New);
        assert_eq!(ItemStatus::from_str("learning").unwrap(), ItemStatus::Learning);
        assert_eq!(ItemStatus::from_str("mastered").unwrap(), ItemStatus::Mastered);
        assert!(ItemStatus::from_str("archived").is_err());
    }
}
