//! Domain types for the place registry.
//!
//! A place is a named record any actor may register; reviews are rated
//! text records appended to exactly one place. Both are write-once: the
//! registry supports creation and appending, never update or deletion.

use crate::error::PlacesError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a registered place.
///
/// Identifiers are assigned in strictly increasing order starting at 1;
/// no identifier is reused or skipped for a successfully created place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(u64);

impl PlaceId {
    /// The identifier assigned to the first place in a fresh registry.
    pub const FIRST: Self = Self(1);

    /// Creates a `PlaceId` from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The identifier that follows this one in assignment order.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of the account a call is made on behalf of.
///
/// The registry assumes nothing about the identity scheme beyond equality:
/// whatever wallet or session layer fronts the store decides what the
/// string holds (an address, a username, a key fingerprint).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Creates an `ActorId` from any string-like identity.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A review rating, constrained to the inclusive range `[1, 5]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;

    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a `Rating`, rejecting values outside `[1, 5]`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidRating`] for out-of-range values.
    pub fn new(value: u8) -> Result<Self, PlacesError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PlacesError::InvalidRating { rating: value })
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// A rated text review attached to exactly one place.
///
/// Reviews are append-only: once submitted they are never moved, edited,
/// or removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Identity of the account that submitted the review.
    pub reviewer: ActorId,
    /// Rating in `[1, 5]`.
    pub rating: Rating,
    /// Free-form review text, stored verbatim.
    pub text: String,
    /// When the review was submitted.
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new review.
    #[must_use]
    pub const fn new(
        reviewer: ActorId,
        rating: Rating,
        text: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            reviewer,
            rating,
            text,
            created_at,
        }
    }
}

/// A named record representing a physical or logical location.
///
/// Every field except the review sequence is write-once at creation time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Sequential identifier.
    pub id: PlaceId,
    /// Identity of the account that created the place.
    pub creator: ActorId,
    /// Display name, stored verbatim.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Free-form location text (e.g. `"12.34,56.78"`).
    pub location: String,
    /// When the place was created.
    pub created_at: DateTime<Utc>,
    /// Reviews in insertion order.
    pub reviews: Vec<Review>,
}

impl Place {
    /// Creates a new place with an empty review sequence.
    #[must_use]
    pub const fn new(
        id: PlaceId,
        creator: ActorId,
        name: String,
        description: String,
        location: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            creator,
            name,
            description,
            location,
            created_at,
            reviews: Vec::new(),
        }
    }

    /// Number of reviews appended to this place.
    ///
    /// Derived from the review sequence, so it always equals the
    /// sequence's length.
    #[must_use]
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }
}

/// State of the place registry
///
/// Owns every place ever created, keyed by identifier, together with the
/// count of creations so far (which determines the next identifier).
/// Mutations go through the reducer; the state's public surface is
/// read-only so the append-only discipline cannot be bypassed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacesState {
    /// All places, keyed by identifier.
    places: BTreeMap<PlaceId, Place>,
    /// Number of places created so far.
    created: u64,
}

impl PlacesState {
    /// Creates a new empty registry state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifier that will be assigned to the next created place.
    ///
    /// Equals one greater than the number of places created so far, so a
    /// fresh registry reports [`PlaceId::FIRST`].
    #[must_use]
    pub const fn next_place_id(&self) -> PlaceId {
        PlaceId::new(self.created + 1)
    }

    /// The identifier assigned by the most recent creation, if any.
    #[must_use]
    pub fn last_assigned_id(&self) -> Option<PlaceId> {
        (self.created > 0).then(|| PlaceId::new(self.created))
    }

    /// Returns the number of places created so far.
    #[must_use]
    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    /// Checks if a place exists.
    #[must_use]
    pub fn exists(&self, id: PlaceId) -> bool {
        self.places.contains_key(&id)
    }

    /// Looks up a place by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::PlaceNotFound`] if the identifier was never
    /// assigned.
    pub fn place(&self, id: PlaceId) -> Result<&Place, PlacesError> {
        self.places
            .get(&id)
            .ok_or(PlacesError::PlaceNotFound { place_id: id })
    }

    /// The review sequence of a place, in insertion order.
    ///
    /// An existing place with no reviews yields an empty slice, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::PlaceNotFound`] if the identifier was never
    /// assigned.
    pub fn reviews(&self, id: PlaceId) -> Result<&[Review], PlacesError> {
        self.place(id).map(|place| place.reviews.as_slice())
    }

    /// Iterates over every registered place in identifier order.
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    /// Inserts a new place under the next sequential identifier.
    ///
    /// Returns the identifier that was assigned.
    pub(crate) fn insert_place(
        &mut self,
        creator: ActorId,
        name: String,
        description: String,
        location: String,
        created_at: DateTime<Utc>,
    ) -> PlaceId {
        let id = self.next_place_id();
        self.places.insert(
            id,
            Place::new(id, creator, name, description, location, created_at),
        );
        self.created += 1;
        id
    }

    /// Appends a review to the end of a place's review sequence.
    pub(crate) fn append_review(
        &mut self,
        place_id: PlaceId,
        review: Review,
    ) -> Result<(), PlacesError> {
        let place = self
            .places
            .get_mut(&place_id)
            .ok_or(PlacesError::PlaceNotFound { place_id })?;
        place.reviews.push(review);
        Ok(())
    }
}

/// Commands accepted by the place registry.
///
/// Commands carry raw caller input; the reducer validates them before any
/// state is touched. The `actor` on each command is the identity the
/// execution context established for the caller, not a caller-chosen
/// field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacesAction {
    /// Register a new place.
    CreatePlace {
        /// Display name.
        name: String,
        /// Free-form description.
        description: String,
        /// Free-form location text.
        location: String,
        /// Identity of the creating account.
        actor: ActorId,
    },

    /// Append a rated review to an existing place.
    AddReview {
        /// The place to review.
        place_id: PlaceId,
        /// Raw rating value; must lie in `[1, 5]` to be accepted.
        rating: u8,
        /// Free-form review text.
        text: String,
        /// Identity of the reviewing account.
        actor: ActorId,
    },
}

/// Out-of-band signal emitted after a successful mutation.
///
/// Notifications are for external observers (a UI refresh, an indexer);
/// they are published to store subscribers and never conflated with a
/// mutation's return value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// A place was created.
    PlaceCreated {
        /// The identifier assigned to the place.
        place_id: PlaceId,
        /// Identity of the creating account.
        creator: ActorId,
        /// The place's display name.
        name: String,
    },

    /// A review was appended to a place.
    ReviewAdded {
        /// The reviewed place.
        place_id: PlaceId,
        /// Identity of the reviewing account.
        reviewer: ActorId,
        /// The accepted rating.
        rating: Rating,
    },
}
