//! Review urgency scoring.

mod scorer;

pub use scorer::PriorityScorer;
