//! Recall quality ratings.

use serde::{Deserialize, Serialize};

/// Recall quality submitted once per review instance (SM-2 scale 0-5).
///
/// The rating is a closed enum so the scheduler is total over its input
/// domain: an out-of-range score is rejected at the validation boundary
/// ([`RecallError::invalid_rating`](crate::error::RecallError::invalid_rating))
/// and cannot reach the scheduling math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rating {
    /// Complete blackout, no recollection.
    Blackout = 0,
    /// Incorrect, but the answer was recognized once shown.
    Incorrect = 1,
    /// Incorrect, yet the answer felt familiar.
    Familiar = 2,
    /// Correct with serious difficulty.
    Difficult = 3,
    /// Correct after some hesitation.
    Hesitant = 4,
    /// Perfect, effortless recall.
    Perfect = 5,
}

impl Rating {
    /// Convert to the raw SM-2 quality score (0-5).
    pub fn to_score(self) -> u8 {
        self as u8
    }

    /// Create from a raw quality score.
    ///
    /// Returns None for scores above 5.
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            0 => Some(Rating::Blackout),
            1 => Some(Rating::Incorrect),
            2 => Some(Rating::Familiar),
            3 => Some(Rating::Difficult),
            4 => Some(Rating::Hesitant),
            5 => Some(Rating::Perfect),
            _ => None,
        }
    }

    /// Whether this rating counts as a successful recall (score >= 3).
    pub fn is_passing(self) -> bool {
        self.to_score() >= 3
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.to_score()
    }
}

impl TryFrom<u8> for Rating {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::from_score(value).ok_or(())
    }
}
