//! Simple CLI demo for the place registry.
//!
//! Registers a place, reviews it, shows how invalid input is rejected,
//! and prints every notification the store publishes along the way.

use spotbase_core::environment::SystemClock;
use spotbase_places::{ActorId, Notification, PlaceLedger};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== SpotBase Demo ===\n");

    let ledger = PlaceLedger::new(Arc::new(SystemClock));

    // Observe notifications like an external indexer or UI would.
    let mut notifications = ledger.subscribe();
    let observer = tokio::spawn(async move {
        while let Ok(notification) = notifications.recv().await {
            match notification {
                Notification::PlaceCreated {
                    place_id,
                    creator,
                    name,
                } => println!("  [notification] place {place_id} ({name}) created by {creator}"),
                Notification::ReviewAdded {
                    place_id,
                    reviewer,
                    rating,
                } => println!("  [notification] place {place_id} rated {rating} by {reviewer}"),
            }
        }
    });

    let alice = ActorId::new("alice");
    let bob = ActorId::new("bob");

    println!("Registering a place...");
    let cafe = ledger
        .create_place("Cafe", "Nice coffee", "12.34,56.78", alice.clone())
        .await?;
    println!("Assigned id {cafe}; next id will be {}", ledger.next_place_id().await);

    println!("\nReviewing it...");
    ledger.add_review(cafe, 5, "Great!", bob.clone()).await?;
    ledger.add_review(cafe, 4, "Would come back.", alice).await?;

    println!("\nTrying an out-of-range rating...");
    match ledger.add_review(cafe, 0, "bad", bob).await {
        Ok(()) => println!("  unexpectedly accepted"),
        Err(error) => println!("  rejected: {error}"),
    }

    println!("\nRegistry contents:");
    for place in ledger.places().await {
        println!(
            "  #{} {} @ {} with {} review(s)",
            place.id,
            place.name,
            place.location,
            place.review_count()
        );
        for review in ledger.reviews(place.id).await? {
            println!("      {} by {}: {}", review.rating, review.reviewer, review.text);
        }
    }

    // Dropping the last ledger handle closes the notification channel,
    // which lets the observer task finish.
    drop(ledger);
    observer.await?;

    println!("\n=== Demo Complete ===");
    Ok(())
}
