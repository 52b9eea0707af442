//! Reducer logic for the place registry.
//!
//! Commands are validated first and applied only once every check has
//! passed; a rejected command returns a typed error and leaves the state
//! exactly as it was. Each successful mutation publishes one notification.

use crate::error::PlacesError;
use crate::types::{Notification, PlaceId, PlacesAction, PlacesState, Rating, Review};
use spotbase_core::{
    SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec,
};

/// Environment dependencies for the places reducer
#[derive(Clone)]
pub struct PlacesEnvironment {
    /// Clock for capturing creation and submission timestamps
    pub clock: std::sync::Arc<dyn Clock>,
}

impl PlacesEnvironment {
    /// Creates a new `PlacesEnvironment`
    #[must_use]
    pub fn new(clock: std::sync::Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Reducer for the place registry
#[derive(Clone, Debug, Default)]
pub struct PlacesReducer;

impl PlacesReducer {
    /// Creates a new `PlacesReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates an `AddReview` command and returns the accepted rating.
    ///
    /// The rating range is checked before place existence: a fresh
    /// registry rejects `AddReview { place_id: 1, rating: 0, .. }` with
    /// `InvalidRating`, not `PlaceNotFound`.
    fn validate_add_review(
        state: &PlacesState,
        place_id: PlaceId,
        rating: u8,
    ) -> Result<Rating, PlacesError> {
        let rating = Rating::new(rating)?;

        if !state.exists(place_id) {
            return Err(PlacesError::PlaceNotFound { place_id });
        }

        Ok(rating)
    }
}

impl Reducer for PlacesReducer {
    type State = PlacesState;
    type Action = PlacesAction;
    type Environment = PlacesEnvironment;
    type Notification = Notification;
    type Error = PlacesError;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<SmallVec<[Effect<Notification>; 4]>, PlacesError> {
        match action {
            PlacesAction::CreatePlace {
                name,
                description,
                location,
                actor,
            } => {
                // Creation accepts any input; the three text fields are
                // stored verbatim.
                let place_id = state.insert_place(
                    actor.clone(),
                    name.clone(),
                    description,
                    location,
                    env.clock.now(),
                );
                tracing::debug!(%place_id, creator = %actor, "place created");

                Ok(smallvec![Effect::Publish(Notification::PlaceCreated {
                    place_id,
                    creator: actor,
                    name,
                })])
            }

            PlacesAction::AddReview {
                place_id,
                rating,
                text,
                actor,
            } => {
                let rating = Self::validate_add_review(state, place_id, rating)?;

                let review = Review::new(actor.clone(), rating, text, env.clock.now());
                state.append_review(place_id, review)?;
                tracing::debug!(%place_id, reviewer = %actor, rating = rating.value(), "review added");

                Ok(smallvec![Effect::Publish(Notification::ReviewAdded {
                    place_id,
                    reviewer: actor,
                    rating,
                })])
            }
        }
    }
}
