//! Session selection over the due set.

mod selector;

pub use selector::{Selection, SelectionMode, SelectionStats, Selector};
