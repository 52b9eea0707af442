//! Error types for the place registry.

use crate::types::PlaceId;
use thiserror::Error;

/// Typed failures surfaced by registry mutations and reads.
///
/// Every failure is detected before any state is mutated, so a caller can
/// correct its input and resubmit; there is never a partial-success state
/// to reconcile.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacesError {
    /// The rating lies outside the accepted `[1, 5]` range.
    #[error("invalid rating {rating}: must be between 1 and 5")]
    InvalidRating {
        /// The rejected value.
        rating: u8,
    },

    /// The referenced place identifier was never created.
    #[error("place {place_id} not found")]
    PlaceNotFound {
        /// The identifier that failed to resolve.
        place_id: PlaceId,
    },
}
