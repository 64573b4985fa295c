//! Browse-time presentation helpers.
//!
//! Thin views over the canonical scheduling state for list/browse surfaces.
//! These deliberately contain no scheduling logic of their own; the due
//! check lives on [`ReviewItem::is_due`](crate::types::ReviewItem::is_due).

/// Ease factor at or above which an item renders all five stars.
const FIVE_STAR_EASE: f64 = 3.0;

/// Ease floor, rendering a single star.
const ONE_STAR_EASE: f64 = 1.3;

/// Render an ease factor as a five-star difficulty badge.
///
/// The floor (1.3) maps to one filled star, 3.0 and above to five. More
/// stars mean an easier item.
pub fn ease_stars(ease_factor: f64) -> String {
    let span = FIVE_STAR_EASE - ONE_STAR_EASE;
    let normalized = ((ease_factor - ONE_STAR_EASE) / span).clamp(0.0, 1.0);
    let filled = 1 + (normalized * 4.0).round() as usize;

    let mut stars = String::with_capacity(5 * '★'.len_utf8());
    for _ in 0..filled {
        stars.push('★');
    }
    for _ in filled..5 {
        stars.push('☆');
    }
    stars
}
