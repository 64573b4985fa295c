//! SM-2 spaced-repetition scheduling.

mod presentation;
mod scheduler;

pub use presentation::ease_stars;
pub use scheduler::{next_status, ScheduleUpdate, Sm2Scheduler};
