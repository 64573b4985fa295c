//! Multi-factor urgency scoring for due items.
//!
//! Maps an item's scheduling state and the current time to a bounded score
//! in [0, 100] with a per-component breakdown and human-readable reasoning.
//! Pure and deterministic: identical inputs (including `now`) always produce
//! identical outputs, and nothing here blocks or allocates beyond the
//! reasoning strings.

use chrono::{DateTime, Utc};

use crate::config::PriorityWeights;
use crate::types::{ItemStatus, PriorityScore, ReviewItem, ScoreBreakdown};

/// Urgency scorer over a versioned weight set.
#[derive(Debug, Clone, Default)]
pub struct PriorityScorer {
    weights: PriorityWeights,
}

impl PriorityScorer {
    /// Create a scorer with the given weight set.
    pub fn new(weights: PriorityWeights) -> Self {
        Self { weights }
    }

    /// Get the weight set.
    pub fn weights(&self) -> &PriorityWeights {
        &self.weights
    }

    /// Score an item's review urgency at `now`.
    pub fn score(&self, item: &ReviewItem, now: DateTime<Utc>) -> PriorityScore {
        let mut reasoning = Vec::new();

        let breakdown = ScoreBreakdown {
            difficulty: self.difficulty_component(item, &mut reasoning),
            efficiency: self.efficiency_component(item, now, &mut reasoning),
            status: self.status_component(item, &mut reasoning),
            overdue: self.overdue_component(item, now, &mut reasoning),
            interval: self.interval_component(item),
        };

        let total = breakdown.sum().round().clamp(0.0, 100.0) as u8;

        PriorityScore {
            total,
            breakdown,
            reasoning,
        }
    }

    /// Lower ease factor -> higher urgency, capped at `difficulty_max`.
    fn difficulty_component(&self, item: &ReviewItem, reasoning: &mut Vec<String>) -> f64 {
        let w = &self.weights;
        let score =
            (w.difficulty_max - (item.ease_factor - w.ease_floor) * w.difficulty_slope).max(0.0);

        if item.ease_factor < w.struggling_ease_threshold {
            reasoning.push(format!(
                "Low ease factor ({:.2}) marks this as a hard item",
                item.ease_factor
            ));
        }
        score
    }

    /// Learning-pace deficit, amplified by the forgetting curve.
    ///
    /// Expected pace is one repetition per `expected_review_pace_days`; the
    /// deficit is boosted the longer the item goes unreviewed relative to
    /// its interval. The boost can push the raw term past the nominal cap;
    /// the final total clamp bounds the result.
    fn efficiency_component(
        &self,
        item: &ReviewItem,
        now: DateTime<Utc>,
        reasoning: &mut Vec<String>,
    ) -> f64 {
        let w = &self.weights;

        let days_since_created = (now - item.created_at).num_days().max(1);
        let expected_reps = (days_since_created as f64 / w.expected_review_pace_days).max(1.0);
        let normalized_efficiency = (item.repetitions as f64 / expected_reps).min(1.0);

        let days_since_last_review = (now - item.updated_at).num_days();
        let forgetting_multiplier = (1.0
            + (days_since_last_review as f64 / item.interval_days as f64) * w.forgetting_boost)
            .min(w.forgetting_cap);

        let score =
            ((1.0 - normalized_efficiency) * w.efficiency_max * forgetting_multiplier).max(0.0);

        if normalized_efficiency < w.low_efficiency_threshold {
            reasoning.push(format!(
                "Slow progress: {} successful recalls over {} days",
                item.repetitions, days_since_created
            ));
        }
        score
    }

    /// Status-table contribution with struggling/regression overrides.
    fn status_component(&self, item: &ReviewItem, reasoning: &mut Vec<String>) -> f64 {
        let w = &self.weights;
        let struggling = item.ease_factor < w.struggling_ease_threshold;

        match (item.status, struggling) {
            (ItemStatus::Learning, true) => {
                reasoning.push("Struggling while still learning".to_string());
                w.status_struggling
            }
            (ItemStatus::Mastered, true) => {
                reasoning.push("Regression detected on a mastered item".to_string());
                w.status_regression
            }
            (ItemStatus::New, _) => w.status_new,
            (ItemStatus::Learning, false) => w.status_learning,
            (ItemStatus::Mastered, false) => w.status_mastered,
        }
    }

    /// Hours past the due timestamp: linear inside the grace window, then a
    /// slower per-day tail, capped at `overdue_max`. Not-yet-due items
    /// contribute zero.
    fn overdue_component(
        &self,
        item: &ReviewItem,
        now: DateTime<Utc>,
        reasoning: &mut Vec<String>,
    ) -> f64 {
        let w = &self.weights;

        if item.next_review_at > now {
            return 0.0;
        }
        let hours_overdue = (now - item.next_review_at).num_hours();

        let score = if hours_overdue <= w.overdue_grace_hours {
            hours_overdue as f64 * w.overdue_hourly_rate
        } else {
            w.overdue_day_base
                + (hours_overdue as f64 / 24.0 * w.overdue_tail_rate).min(w.overdue_tail_cap)
        };

        if hours_overdue >= w.overdue_grace_hours {
            reasoning.push(format!("Overdue by {} hours", hours_overdue));
        }
        score.min(w.overdue_max)
    }

    /// Logistic decay over interval length: short intervals score near the
    /// cap, long intervals decay toward zero.
    fn interval_component(&self, item: &ReviewItem) -> f64 {
        let w = &self.weights;
        let interval = item.interval_days as f64;
        w.interval_max / (1.0 + ((interval - w.interval_midpoint_days) / w.interval_steepness).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn scorer() -> PriorityScorer {
        PriorityScorer::default()
    }

    fn t0() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z".parse().unwrap()
    }

    /// A fresh default item, due exactly now.
    fn fresh_item() -> ReviewItem {
        ReviewItem::new("item-1", "user-1", t0())
    }

    // ============================================================
    // Component behavior
    // ============================================================

    #[test]
    fn test_difficulty_maximal_at_ease_floor() {
        let item = fresh_item().with_ease_factor(1.3);
        let score = scorer().score(&item, t0());
        assert!((score.breakdown.difficulty - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty_zero_for_easy_items() {
        let item = fresh_item().with_ease_factor(3.0);
        let score = scorer().score(&item, t0());
        assert!((score.breakdown.difficulty - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty_reasoning_below_threshold() {
        let hard = fresh_item().with_ease_factor(1.5);
        let easy = fresh_item().with_ease_factor(2.5);

        let hard_score = scorer().score(&hard, t0());
        let easy_score = scorer().score(&easy, t0());

        assert!(hard_score
            .reasoning
            .iter()
            .any(|r| r.contains("Low ease factor")));
        assert!(!easy_score
            .reasoning
            .iter()
            .any(|r| r.contains("Low ease factor")));
    }

    #[test]
    fn test_efficiency_full_deficit_for_untouched_item() {
        // Created just now, zero repetitions: deficit is complete but the
        // forgetting multiplier is still 1.
        let item = fresh_item();
        let score = scorer().score(&item, t0());
        assert!((score.breakdown.efficiency - 25.0).abs() < 1e-9);
        assert!(score
            .reasoning
            .iter()
            .any(|r| r.contains("Slow progress")));
    }

    #[test]
    fn test_efficiency_zero_when_on_pace() {
        // 14 days old with 2 repetitions: exactly on a one-per-week pace.
        let created = t0() - Duration::days(14);
        let mut item = ReviewItem::new("item-1", "user-1", created).with_repetitions(2);
        item.updated_at = t0();

        let score = scorer().score(&item, t0());
        assert!((score.breakdown.efficiency - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_efficiency_amplified_by_forgetting_curve() {
        // Unreviewed for ten intervals: multiplier saturates at 2x.
        let created = t0() - Duration::days(10);
        let item = ReviewItem::new("item-1", "user-1", created).with_interval_days(1);

        let score = scorer().score(&item, t0());
        assert!((score.breakdown.efficiency - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_status_table_and_overrides() {
        let base = |status, ease| {
            let item = fresh_item().with_status(status).with_ease_factor(ease);
            scorer().score(&item, t0()).breakdown.status
        };

        assert!((base(ItemStatus::New, 2.5) - 20.0).abs() < 1e-9);
        assert!((base(ItemStatus::Learning, 2.5) - 15.0).abs() < 1e-9);
        assert!((base(ItemStatus::Mastered, 2.5) - 5.0).abs() < 1e-9);

        // Overrides kick in below the struggling threshold.
        assert!((base(ItemStatus::Learning, 1.8) - 18.0).abs() < 1e-9);
        assert!((base(ItemStatus::Mastered, 1.8) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_regression_reasoning_emitted() {
        let item = fresh_item()
            .with_status(ItemStatus::Mastered)
            .with_ease_factor(1.6);
        let score = scorer().score(&item, t0());
        assert!(score.reasoning.iter().any(|r| r.contains("Regression")));
    }

    #[test]
    fn test_overdue_zero_before_due() {
        let item = fresh_item().with_next_review_at(t0() + Duration::hours(1));
        let score = scorer().score(&item, t0());
        assert!((score.breakdown.overdue - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_overdue_linear_inside_grace_window() {
        let item = fresh_item().with_next_review_at(t0() - Duration::hours(10));
        let score = scorer().score(&item, t0());
        assert!((score.breakdown.overdue - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_overdue_tail_past_grace_window() {
        // 48h overdue: 12 + min(8, 48/24 * 2) = 16
        let item = fresh_item().with_next_review_at(t0() - Duration::hours(48));
        let score = scorer().score(&item, t0());
        assert!((score.breakdown.overdue - 16.0).abs() < 1e-9);
        assert!(score.reasoning.iter().any(|r| r.contains("Overdue by 48 hours")));
    }

    #[test]
    fn test_overdue_caps_at_twenty() {
        let item = fresh_item().with_next_review_at(t0() - Duration::days(90));
        let score = scorer().score(&item, t0());
        assert!((score.breakdown.overdue - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_interval_component_logistic_shape() {
        let short = fresh_item().with_interval_days(1);
        let mid = fresh_item().with_interval_days(10);
        let long = fresh_item().with_interval_days(120);

        let s = scorer().score(&short, t0()).breakdown.interval;
        let m = scorer().score(&mid, t0()).breakdown.interval;
        let l = scorer().score(&long, t0()).breakdown.interval;

        // Midpoint sits at half the cap; the tails order correctly.
        assert!((m - 7.5).abs() < 1e-9);
        assert!(s > m && m > l);
        assert!(l < 0.01);
    }

    // ============================================================
    // Total bounds and determinism
    // ============================================================

    #[test]
    fn test_worst_case_item_clamps_to_hundred() {
        // Ease at the floor, never reviewed in ten days, two days overdue,
        // shortest interval: every component near its peak.
        let created = t0() - Duration::days(10);
        let item = ReviewItem::new("item-1", "user-1", created)
            .with_ease_factor(1.3)
            .with_next_review_at(t0() - Duration::hours(48));

        let score = scorer().score(&item, t0());

        assert_eq!(score.total, 100);
        assert!((score.breakdown.difficulty - 35.0).abs() < 1e-9);
        assert!(score.breakdown.sum() > 100.0);
    }

    #[test]
    fn test_total_bounded_for_boundary_items() {
        let candidates = vec![
            fresh_item().with_ease_factor(1.3),
            fresh_item().with_ease_factor(10.0),
            fresh_item().with_interval_days(1),
            fresh_item().with_interval_days(3650),
            ReviewItem::new("old", "user-1", t0() - Duration::days(3650)),
            fresh_item().with_next_review_at(t0() - Duration::days(365)),
            fresh_item().with_repetitions(1000),
        ];

        for item in candidates {
            let score = scorer().score(&item, t0());
            assert!(score.total <= 100, "total {} out of bounds for {:?}", score.total, item.id);
        }
    }

    #[test]
    fn test_score_is_deterministic() {
        let created = t0() - Duration::days(20);
        let item = ReviewItem::new("item-1", "user-1", created)
            .with_ease_factor(1.9)
            .with_status(ItemStatus::Learning)
            .with_next_review_at(t0() - Duration::hours(30));

        let a = scorer().score(&item, t0());
        let b = scorer().score(&item, t0());
        assert_eq!(a, b);
    }
}
