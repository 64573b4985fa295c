//! SM-2 scheduler for review state transitions.
//!
//! Single canonical implementation of the state-transition function: given
//! an item's scheduling state and a recall rating, compute the next state.
//! The ease factor always updates (pass or fail) before the interval branch,
//! and a failed recall resets repetitions and interval while keeping the
//! ease penalty.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SrsConfig;
use crate::types::{ItemStatus, Rating, ReviewItem};

/// Output of a single scheduling step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    /// Days until the next review.
    pub interval_days: u32,
    /// Updated ease factor, floored at the configured minimum.
    pub ease_factor: f64,
    /// Consecutive successful recalls since the last reset.
    pub repetitions: u32,
    /// When the item becomes due again.
    pub next_review_at: DateTime<Utc>,
}

/// Status transition driven by a rating outcome.
///
/// A passing rating moves the item to `learning`; a failing rating moves it
/// to `new`. This includes `mastered` items, which are relabeled `new` on a
/// failed review rather than demoted to `learning` — observed production
/// behavior, kept as-is pending product review.
pub fn next_status(rating: Rating) -> ItemStatus {
    if rating.is_passing() {
        ItemStatus::Learning
    } else {
        ItemStatus::New
    }
}

/// SM-2 scheduler.
///
/// Pure and total over its input domain: preconditions (`interval >= 1`,
/// `ease_factor >= floor`, rating in 0-5) are enforced at the validation
/// boundary, and [`Rating`] makes out-of-range qualities unrepresentable.
#[derive(Debug, Clone, Default)]
pub struct Sm2Scheduler {
    config: SrsConfig,
}

impl Sm2Scheduler {
    /// Create a scheduler with the given scheduling constants.
    pub fn new(config: SrsConfig) -> Self {
        Self { config }
    }

    /// Get the scheduling constants.
    pub fn config(&self) -> &SrsConfig {
        &self.config
    }

    /// Advance an item's scheduling state in response to a rating.
    ///
    /// # Arguments
    /// * `interval_days` - Current interval (>= 1)
    /// * `ease_factor` - Current ease factor (>= configured floor)
    /// * `repetitions` - Consecutive successful recalls so far
    /// * `rating` - Recall quality for this review instance
    /// * `now` - Review timestamp
    pub fn advance(
        &self,
        interval_days: u32,
        ease_factor: f64,
        repetitions: u32,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> ScheduleUpdate {
        // Ease always updates, pass or fail. A failed item keeps the
        // penalty permanently unless later successes recover it.
        let ease_factor = self.next_ease_factor(ease_factor, rating);

        let (interval_days, repetitions) = if !rating.is_passing() {
            // Failed recall: full reset of repetitions and interval.
            (self.config.relearn_interval_days, 0)
        } else {
            let repetitions = repetitions + 1;
            let interval = match repetitions {
                1 => self.config.first_interval_days,
                2 => self.config.second_interval_days,
                // Old interval, new ease factor.
                _ => (interval_days as f64 * ease_factor).round() as u32,
            };
            (interval, repetitions)
        };

        ScheduleUpdate {
            interval_days,
            ease_factor,
            repetitions,
            next_review_at: now + Duration::days(interval_days as i64),
        }
    }

    /// Advance a full item: scheduling state, status label, and `updated_at`.
    pub fn advance_item(&self, item: &ReviewItem, rating: Rating, now: DateTime<Utc>) -> ReviewItem {
        let update = self.advance(
            item.interval_days,
            item.ease_factor,
            item.repetitions,
            rating,
            now,
        );

        let mut next = item.clone();
        next.interval_days = update.interval_days;
        next.ease_factor = update.ease_factor;
        next.repetitions = update.repetitions;
        next.next_review_at = update.next_review_at;
        next.status = next_status(rating);
        next.updated_at = now;
        next
    }

    /// Apply the SM-2 ease-factor delta and floor.
    ///
    /// Deltas by quality: 0 -> -0.80, 1 -> -0.54, 2 -> -0.32, 3 -> -0.14,
    /// 4 -> 0.00, 5 -> +0.10.
    fn next_ease_factor(&self, ease_factor: f64, rating: Rating) -> f64 {
        let q = rating.to_score() as f64;
        let next = ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
        next.max(self.config.min_ease_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> Sm2Scheduler {
        Sm2Scheduler::default()
    }

    fn t0() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z".parse().unwrap()
    }

    // ============================================================
    // advance: concrete scenarios
    // ============================================================

    #[test]
    fn test_first_perfect_recall_from_defaults() {
        let update = scheduler().advance(1, 2.5, 0, Rating::Perfect, t0());

        assert!((update.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(update.repetitions, 1);
        assert_eq!(update.interval_days, 1);
        assert_eq!(update.next_review_at, t0() + Duration::days(1));
    }

    #[test]
    fn test_second_success_jumps_to_six_days() {
        let update = scheduler().advance(1, 2.5, 1, Rating::Perfect, t0());

        assert_eq!(update.repetitions, 2);
        assert_eq!(update.interval_days, 6);
    }

    #[test]
    fn test_third_success_multiplies_old_interval_by_new_ease() {
        // New ease is 2.5 + 0.1 = 2.6; interval = round(6 * 2.6) = 16
        let update = scheduler().advance(6, 2.5, 2, Rating::Perfect, t0());

        assert_eq!(update.repetitions, 3);
        assert_eq!(update.interval_days, 16);
    }

    #[test]
    fn test_failure_resets_but_keeps_ease_penalty() {
        // Blackout: ease 2.6 - 0.8 = 1.8
        let update = scheduler().advance(6, 2.6, 2, Rating::Blackout, t0());

        assert_eq!(update.repetitions, 0);
        assert_eq!(update.interval_days, 1);
        assert!((update.ease_factor - 1.8).abs() < 1e-9);
        assert_eq!(update.next_review_at, t0() + Duration::days(1));
    }

    #[test]
    fn test_rating_four_leaves_ease_unchanged() {
        let update = scheduler().advance(1, 2.5, 0, Rating::Hesitant, t0());
        assert!((update.ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_ease_deltas_per_quality() {
        let expected = [-0.80, -0.54, -0.32, -0.14, 0.00, 0.10];
        for (score, delta) in expected.iter().enumerate() {
            let rating = Rating::from_score(score as u8).unwrap();
            let update = scheduler().advance(10, 2.5, 4, rating, t0());
            assert!(
                (update.ease_factor - (2.5 + delta)).abs() < 1e-9,
                "quality {} should shift ease by {}, got {}",
                score,
                delta,
                update.ease_factor - 2.5
            );
        }
    }

    // ============================================================
    // Invariants
    // ============================================================

    #[test]
    fn test_ease_factor_never_drops_below_floor() {
        for score in 0..=5u8 {
            let rating = Rating::from_score(score).unwrap();
            let update = scheduler().advance(1, 1.3, 0, rating, t0());
            assert!(
                update.ease_factor >= 1.3,
                "quality {} undercut the ease floor: {}",
                score,
                update.ease_factor
            );
        }
    }

    #[test]
    fn test_every_failing_rating_resets() {
        for score in 0..3u8 {
            let rating = Rating::from_score(score).unwrap();
            let update = scheduler().advance(42, 2.8, 9, rating, t0());
            assert_eq!(update.repetitions, 0);
            assert_eq!(update.interval_days, 1);
        }
    }

    #[test]
    fn test_every_passing_rating_increments_repetitions() {
        for score in 3..=5u8 {
            let rating = Rating::from_score(score).unwrap();
            let update = scheduler().advance(6, 2.5, 2, rating, t0());
            assert_eq!(update.repetitions, 3);
        }
    }

    #[test]
    fn test_perfect_streak_intervals_non_decreasing() {
        let sched = scheduler();
        let mut interval = 1u32;
        let mut ease = 2.5;
        let mut reps = 0u32;
        let mut previous = 0u32;

        for _ in 0..10 {
            let update = sched.advance(interval, ease, reps, Rating::Perfect, t0());
            assert!(
                update.interval_days >= previous,
                "interval shrank: {} -> {}",
                previous,
                update.interval_days
            );
            previous = update.interval_days;
            interval = update.interval_days;
            ease = update.ease_factor;
            reps = update.repetitions;
        }

        assert!(interval > 100, "ten perfect recalls should reach months-long intervals");
    }

    #[test]
    fn test_advance_is_deterministic() {
        let a = scheduler().advance(6, 2.2, 2, Rating::Difficult, t0());
        let b = scheduler().advance(6, 2.2, 2, Rating::Difficult, t0());
        assert_eq!(a, b);
    }

    // ============================================================
    // Status transition
    // ============================================================

    #[test]
    fn test_next_status_passing_and_failing() {
        assert_eq!(next_status(Rating::Blackout), ItemStatus::New);
        assert_eq!(next_status(Rating::Incorrect), ItemStatus::New);
        assert_eq!(next_status(Rating::Familiar), ItemStatus::New);
        assert_eq!(next_status(Rating::Difficult), ItemStatus::Learning);
        assert_eq!(next_status(Rating::Hesitant), ItemStatus::Learning);
        assert_eq!(next_status(Rating::Perfect), ItemStatus::Learning);
    }

    #[test]
    fn test_mastered_item_failing_relabels_new() {
        let item = ReviewItem::new("item-1", "user-1", t0())
            .with_status(ItemStatus::Mastered)
            .with_interval_days(30)
            .with_repetitions(6);

        let next = scheduler().advance_item(&item, Rating::Incorrect, t0());

        // Relabeled new, not learning.
        assert_eq!(next.status, ItemStatus::New);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.interval_days, 1);
    }

    #[test]
    fn test_advance_item_stamps_updated_at() {
        let created = t0() - Duration::days(3);
        let item = ReviewItem::new("item-1", "user-1", created);

        let next = scheduler().advance_item(&item, Rating::Perfect, t0());

        assert_eq!(next.updated_at, t0());
        assert_eq!(next.created_at, created);
        assert_eq!(next.status, ItemStatus::Learning);
        assert_eq!(next.id, item.id);
        assert_eq!(next.owner_id, item.owner_id);
    }
}
