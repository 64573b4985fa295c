//! Bounded, ordered selection over a due set.
//!
//! Given the full set of currently-due items for one owner, return the
//! subset a learner should see in one sitting, in review order, plus
//! optional summary statistics. Limit validation happens at the service
//! boundary; the selector assumes an already-validated limit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::priority::PriorityScorer;
use crate::types::{PriorityRange, ReviewItem};

/// Selection policy for a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SelectionMode {
    /// Oldest-due-first, strict due-time ordering.
    Time,
    /// Highest urgency first, multi-factor scoring.
    Difficulty,
}

/// Summary statistics for a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStats {
    /// Size of the full due set before truncation.
    pub total_due: usize,
    /// Policy that produced the ordering.
    pub priority_mode: SelectionMode,
    /// Score range over the selected subset (difficulty mode, non-empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_range: Option<PriorityRange>,
}

/// An ordered, bounded review session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Items in review order.
    pub items: Vec<ReviewItem>,
    /// Number of items selected.
    pub count: usize,
    /// Summary statistics, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SelectionStats>,
}

/// Session selector over a priority scorer.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    scorer: PriorityScorer,
}

impl Selector {
    /// Create a selector with the given scorer.
    pub fn new(scorer: PriorityScorer) -> Self {
        Self { scorer }
    }

    /// Rank and truncate a due set.
    ///
    /// Sorts are stable, so equal keys keep the store's order and repeated
    /// calls over the same snapshot are identical.
    pub fn select(
        &self,
        due_items: Vec<ReviewItem>,
        mode: SelectionMode,
        limit: usize,
        include_stats: bool,
        now: DateTime<Utc>,
    ) -> Selection {
        let total_due = due_items.len();

        let (items, priority_range) = match mode {
            SelectionMode::Time => {
                let mut items = due_items;
                items.sort_by_key(|item| item.next_review_at);
                items.truncate(limit);
                (items, None)
            }
            SelectionMode::Difficulty => {
                let mut scored: Vec<(ReviewItem, u8)> = due_items
                    .into_iter()
                    .map(|item| {
                        let total = self.scorer.score(&item, now).total;
                        (item, total)
                    })
                    .collect();
                scored.sort_by(|a, b| b.1.cmp(&a.1));
                scored.truncate(limit);

                let range = match (scored.first(), scored.last()) {
                    (Some(first), Some(last)) => Some(PriorityRange {
                        highest: first.1,
                        lowest: last.1,
                    }),
                    _ => None,
                };

                (scored.into_iter().map(|(item, _)| item).collect(), range)
            }
        };

        let stats = include_stats.then(|| SelectionStats {
            total_due,
            priority_mode: mode,
            priority_range: match mode {
                SelectionMode::Difficulty => priority_range,
                SelectionMode::Time => None,
            },
        });

        Selection {
            count: items.len(),
            items,
            stats,
        }
    }
}
