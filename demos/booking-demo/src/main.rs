//! CLI walkthrough of the booking wizard.
//!
//! Drives the full flow against a canned in-process backend: schedule,
//! players, payment, review, submission, success. Run with
//! `RUST_LOG=debug` to watch the reducer's tracing output.

use std::time::Duration;

use playgrounds_api::{BookingConfirmation, PaymentMethod, Slot, SlotQuery, Submission};
use playgrounds_booking::{
    BookingAction, BookingEnvironment, BookingReducer, DurationOption, VenueConfig, WizardState,
};
use playgrounds_core::environment::{Clock, SystemClock};
use playgrounds_core::{Effect, async_effect};
use playgrounds_runtime::Store;

/// In-process backend: every date has two open evening slots, and every
/// submission is confirmed after a short simulated round trip.
#[derive(Clone)]
struct CannedBackend {
    clock: SystemClock,
}

impl BookingEnvironment for CannedBackend {
    fn fetch_slots(&self, query: SlotQuery, request_seq: u64) -> Effect<BookingAction> {
        async_effect! {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let slots = vec![
                Slot {
                    id: format!("{}-18", query.date),
                    label: "18:00".to_string(),
                    is_available: true,
                },
                Slot {
                    id: format!("{}-20", query.date),
                    label: "20:00".to_string(),
                    is_available: true,
                },
            ];
            Some(BookingAction::SlotsLoaded {
                request_seq,
                result: Ok(slots),
            })
        }
    }

    fn create_booking(&self, submission: Submission) -> Effect<BookingAction> {
        async_effect! {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let confirmation = BookingConfirmation {
                id: Some("demo-booking-1".to_string()),
                booking_id: None,
                venue: None,
                slot_label: None,
                total_price_cents: None,
            };
            tracing::info!(slot_id = %submission.slot_id, "canned backend confirmed booking");
            Some(BookingAction::BookingCompleted {
                result: Ok(confirmation),
            })
        }
    }

    fn clock(&self) -> &dyn Clock {
        &self.clock
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Playgrounds Booking Wizard ===\n");

    let venue = VenueConfig::new("venue-1", "Hoops Arena", 1500)
        .with_player_bounds(2, 10)
        .with_durations(vec![
            DurationOption::new("d60", 60, "1 hour"),
            DurationOption::new("d90", 90, "1.5 hours"),
        ]);
    let store = Store::new(
        WizardState::new(venue),
        BookingReducer::new(),
        CannedBackend { clock: SystemClock },
    );

    println!("Scheduling: 1.5 hours on 2025-06-01...");
    store
        .send(BookingAction::DurationSelected(DurationOption::new(
            "d90", 90, "1.5 hours",
        )))
        .await?;
    let mut handle = store
        .send(BookingAction::DateSelected("2025-06-01".to_string()))
        .await?;
    handle.wait().await;

    let slots = store.state(|s| s.slots.clone()).await;
    println!("Available slots:");
    for slot in &slots {
        println!("  - {} ({})", slot.label, slot.id);
    }

    let first_slot = slots.first().map(|s| s.id.clone()).unwrap_or_default();
    store.send(BookingAction::SlotSelected(first_slot)).await?;
    store.send(BookingAction::NextPressed).await?;

    println!("\nPlayers: 4");
    store.send(BookingAction::PlayersChanged(4)).await?;
    store.send(BookingAction::NextPressed).await?;

    println!("Payment: cash on arrival");
    store
        .send(BookingAction::PaymentSelected(PaymentMethod::Cash))
        .await?;
    store.send(BookingAction::NextPressed).await?;

    let total = store.state(WizardState::total_price_cents).await;
    println!(
        "\nReview: total {}.{:02} JOD, confirming...",
        total / 100,
        total % 100
    );
    let mut handle = store.send(BookingAction::NextPressed).await?;
    handle.wait().await;

    match store.state(|s| s.success.clone()).await {
        Some(summary) => {
            println!("\nBooked!");
            println!("  reference: {}", summary.reference.as_deref().unwrap_or("-"));
            println!("  venue:     {}", summary.venue_name);
            println!("  date:      {} at {}", summary.date, summary.slot_label);
            println!("  players:   {}", summary.players);
            println!(
                "  total:     {}.{:02} JOD",
                summary.total_price_cents / 100,
                summary.total_price_cents % 100
            );
        }
        None => {
            let error = store.state(|s| s.error.clone()).await;
            println!("\nBooking failed: {}", error.unwrap_or_default());
        }
    }

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
