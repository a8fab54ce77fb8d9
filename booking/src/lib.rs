//! Booking reservation wizard for the Playgrounds client.
//!
//! A sports venue booking flows through four steps: schedule (duration,
//! date, time slot), players, payment, and review. Confirming the review
//! submits the booking to the backend and lands on a terminal success
//! screen. The whole flow is a single reducer over [`WizardState`],
//! executed by the store in `playgrounds-runtime`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use playgrounds_api::BackendClient;
//! use playgrounds_booking::{
//!     BookingReducer, HttpBookingEnvironment, VenueConfig, WizardState,
//! };
//! use playgrounds_runtime::Store;
//!
//! # async fn example() {
//! let venue = VenueConfig::new("venue-1", "Court A", 1500);
//! let client = Arc::new(BackendClient::new("https://api.example.com"));
//! let store = Store::new(
//!     WizardState::new(venue),
//!     BookingReducer::new(),
//!     HttpBookingEnvironment::new(client),
//! );
//! # }
//! ```

/// Environment trait and HTTP-backed implementation.
pub mod environment;
/// Price derivation from duration and hourly rate.
pub mod pricing;
/// Action enum and the wizard reducer.
pub mod reducer;
/// Draft to backend submission conversion.
pub mod submission;
/// Wizard state, steps, draft, and venue configuration.
pub mod types;
/// Per-step readiness checks and hints.
pub mod validation;

pub use environment::{BookingEnvironment, HttpBookingEnvironment};
pub use reducer::{BookingAction, BookingReducer, SLOTS_ERROR, SUBMIT_ERROR};
pub use submission::{DraftError, build_submission};
pub use types::{
    BookingDraft, BookingSummary, DurationOption, VenueConfig, WizardState, WizardStep,
};
