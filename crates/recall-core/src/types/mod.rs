//! Core types for recall.

mod item;
mod rating;
mod score;

pub use item::{ItemStatus, ReviewItem};
pub use rating::Rating;
pub use score::{PriorityRange, PriorityScore, ScoreBreakdown};
