//! recall-core - Core library for recall.
//!
//! This crate provides the spaced-repetition scheduling engine: the SM-2
//! state-transition function, multi-factor review prioritization, bounded
//! session selection, and the store seam that persistence layers implement.
//!
//! # Example
//!
//! ```ignore
//! use recall_core::{ReviewService, SelectionMode, SqliteItemStore};
//! use chrono::Utc;
//!
//! let store = SqliteItemStore::new("items.db")?;
//! let service = ReviewService::with_defaults(store);
//!
//! // Create an item; it is due immediately
//! let item = service.create_item("user-1", Utc::now())?;
//!
//! // Rate a recall (0-5) and persist the advanced schedule
//! let outcome = service.submit_review("user-1", &item.id, 4, None, Utc::now())?;
//!
//! // Build a bounded session over the due set
//! let session = service.review_session("user-1", SelectionMode::Difficulty, 20, true, Utc::now())?;
//! ```

pub mod config;
pub mod error;
pub mod priority;
pub mod review;
pub mod selection;
pub mod srs;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{EngineConfig, PriorityWeights, SrsConfig};
pub use error::{ErrorCode, RecallError, RecallResult};
pub use priority::PriorityScorer;
pub use review::{ReviewOutcome, ReviewService};
pub use selection::{Selection, SelectionMode, SelectionStats, Selector};
pub use srs::{ease_stars, next_status, ScheduleUpdate, Sm2Scheduler};
pub use store::SqliteItemStore;
pub use traits::ItemStore;
pub use types::{
    ItemStatus, PriorityRange, PriorityScore, Rating, ReviewItem, ScoreBreakdown,
};
