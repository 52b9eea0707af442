//! Place registry: named places with rated text reviews.
//!
//! Any actor may register a place and append rated reviews to it. All
//! state lives in one append-mostly store that assigns sequential
//! identifiers, validates input before mutating anything, and publishes a
//! notification after every successful mutation. There is no update, no
//! deletion, and no access control beyond "any caller may write".
//!
//! # Quick Start
//!
//! ```no_run
//! use spotbase_core::environment::SystemClock;
//! use spotbase_places::{ActorId, PlaceLedger};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ledger = PlaceLedger::new(Arc::new(SystemClock));
//!
//! // Register a place
//! let id = ledger
//!     .create_place("Cafe", "Nice coffee", "12.34,56.78", ActorId::new("alice"))
//!     .await?;
//!
//! // Review it
//! ledger.add_review(id, 5, "Great!", ActorId::new("bob")).await?;
//!
//! // Read it back
//! let place = ledger.place(id).await?;
//! println!("{} has {} review(s)", place.name, place.review_count());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ledger;
pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use error::PlacesError;
pub use ledger::PlaceLedger;
pub use reducer::{PlacesEnvironment, PlacesReducer};
pub use types::{ActorId, Notification, Place, PlaceId, PlacesAction, PlacesState, Rating, Review};
