//! The caller-facing surface of the place registry.
//!
//! [`PlaceLedger`] wraps a [`Store`] and exposes the registry's five
//! operations plus notification subscription. Everything else — identity,
//! presentation, durability — is a caller's concern: the ledger receives
//! an [`ActorId`] on every mutating call and assumes nothing about where
//! it came from.

use crate::error::PlacesError;
use crate::reducer::{PlacesEnvironment, PlacesReducer};
use crate::types::{ActorId, Notification, Place, PlaceId, PlacesAction, PlacesState, Review};
use spotbase_core::environment::Clock;
use spotbase_runtime::Store;
use std::sync::Arc;
use tokio::sync::broadcast;

/// The place/review store: owns every record, assigns identifiers,
/// validates input, and emits notifications after successful mutations.
///
/// A ledger is a handle: cloning it yields another handle to the same
/// underlying store, while two ledgers built with [`PlaceLedger::new`]
/// are fully independent. There are no hidden singletons — pass the
/// ledger to whatever needs it.
#[derive(Clone)]
pub struct PlaceLedger {
    store: Store<PlacesState, PlacesAction, PlacesEnvironment, PlacesReducer>,
}

impl PlaceLedger {
    /// Creates an empty ledger using the given clock for timestamps.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Store::new(
                PlacesState::new(),
                PlacesReducer::new(),
                PlacesEnvironment::new(clock),
            ),
        }
    }

    /// Creates an empty ledger with a custom notification channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, which the broadcast channel rejects.
    #[must_use]
    pub fn with_notification_capacity(clock: Arc<dyn Clock>, capacity: usize) -> Self {
        Self {
            store: Store::with_notification_capacity(
                PlacesState::new(),
                PlacesReducer::new(),
                PlacesEnvironment::new(clock),
                capacity,
            ),
        }
    }

    /// Registers a new place and returns the identifier it was assigned.
    ///
    /// Identifiers are assigned sequentially starting at 1. The three
    /// text fields are stored verbatim; creation accepts any input, so
    /// the only conceivable failure is identifier-space exhaustion, which
    /// is out of scope for normal use.
    ///
    /// Emits [`Notification::PlaceCreated`] on success.
    ///
    /// # Errors
    ///
    /// Creation itself cannot fail validation; the `Result` is the
    /// mutation channel's type and is always `Ok` today.
    ///
    /// # Panics
    ///
    /// Panics if the store reports no assigned identifier immediately
    /// after a creation, which the single-writer lock makes impossible.
    #[allow(clippy::expect_used)]
    pub async fn create_place(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        actor: ActorId,
    ) -> Result<PlaceId, PlacesError> {
        let action = PlacesAction::CreatePlace {
            name: name.into(),
            description: description.into(),
            location: location.into(),
            actor,
        };

        // The query runs under the same write lock as the mutation, so
        // the newest identifier is the one this call assigned.
        let assigned = self
            .store
            .send_and_query(action, PlacesState::last_assigned_id)
            .await?;
        Ok(assigned.expect("creation always assigns an identifier"))
    }

    /// Appends a rated review to an existing place.
    ///
    /// The rating must lie in `[1, 5]` and is checked before the place
    /// identifier; either the review append and the count change both
    /// happen, or neither does.
    ///
    /// Emits [`Notification::ReviewAdded`] on success.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::InvalidRating`] when `rating` is outside `[1, 5]`
    /// - [`PlacesError::PlaceNotFound`] when `place_id` was never created
    pub async fn add_review(
        &self,
        place_id: PlaceId,
        rating: u8,
        text: impl Into<String>,
        actor: ActorId,
    ) -> Result<(), PlacesError> {
        self.store
            .send(PlacesAction::AddReview {
                place_id,
                rating,
                text: text.into(),
                actor,
            })
            .await
    }

    /// Returns a snapshot of a place, including its live review count.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::PlaceNotFound`] if the identifier was never
    /// created.
    pub async fn place(&self, place_id: PlaceId) -> Result<Place, PlacesError> {
        self.store.state(|s| s.place(place_id).cloned()).await
    }

    /// Returns a place's full review sequence in insertion order.
    ///
    /// An existing place with no reviews yields an empty vector, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::PlaceNotFound`] if the identifier was never
    /// created.
    pub async fn reviews(&self, place_id: PlaceId) -> Result<Vec<Review>, PlacesError> {
        self.store
            .state(|s| s.reviews(place_id).map(<[Review]>::to_vec))
            .await
    }

    /// The identifier that will be assigned to the next created place.
    ///
    /// Equals one greater than the number of places created so far;
    /// reports [`PlaceId::FIRST`] before any place exists.
    pub async fn next_place_id(&self) -> PlaceId {
        self.store.state(PlacesState::next_place_id).await
    }

    /// Returns a snapshot of every registered place in identifier order.
    pub async fn places(&self) -> Vec<Place> {
        self.store.state(|s| s.places().cloned().collect()).await
    }

    /// Subscribes to the ledger's notifications.
    ///
    /// The receiver observes every notification emitted after this call,
    /// in mutation order. A receiver that lags past the channel capacity
    /// skips the oldest notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.store.subscribe()
    }
}
