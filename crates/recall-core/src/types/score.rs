//! Priority score types.

use serde::{Deserialize, Serialize};

/// Per-component breakdown of a priority score.
///
/// Values are the unclamped-after-component-clamp terms that were summed
/// into the total, kept as floats so callers can inspect the weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Low ease factor contribution.
    pub difficulty: f64,
    /// Learning efficiency deficit, amplified by the forgetting curve.
    pub efficiency: f64,
    /// Status-table contribution (with struggling/regression overrides).
    pub status: f64,
    /// How far past the due timestamp the item is.
    pub overdue: f64,
    /// Short-interval boost (logistic decay over interval length).
    pub interval: f64,
}

impl ScoreBreakdown {
    /// Sum of all components, before rounding and the final [0,100] clamp.
    pub fn sum(&self) -> f64 {
        self.difficulty + self.efficiency + self.status + self.overdue + self.interval
    }
}

/// Urgency score for a due item.
///
/// Ephemeral and derived: recomputed on every selection, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityScore {
    /// Total urgency in [0, 100].
    pub total: u8,
    /// Component breakdown.
    pub breakdown: ScoreBreakdown,
    /// Human-readable explanations for the dominant factors.
    pub reasoning: Vec<String>,
}

/// Highest and lowest totals over a selected subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRange {
    pub highest: u8,
    pub lowest: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_sum() {
        let breakdown = ScoreBreakdown {
            difficulty: 30.0,
            efficiency: 12.5,
            status: 20.0,
            overdue: 14.0,
            interval: 13.2,
        };
        assert!((breakdown.sum() - 89.7).abs() < 1e-9);
    }
}
