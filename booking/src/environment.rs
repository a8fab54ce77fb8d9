//! Environment dependencies for the booking wizard.
//!
//! The reducer only sees this trait; production wires it to the HTTP
//! backend, tests swap in scripted implementations.

use std::sync::Arc;

use playgrounds_api::{BackendClient, SlotQuery, Submission};
use playgrounds_core::environment::{Clock, SystemClock};
use playgrounds_core::{Effect, async_effect};

use crate::reducer::BookingAction;

/// External dependencies of the booking reducer.
pub trait BookingEnvironment: Send + Sync {
    /// Start an availability fetch. The resulting effect must feed back
    /// a [`BookingAction::SlotsLoaded`] carrying `request_seq` unchanged
    /// so stale responses can be discarded.
    fn fetch_slots(&self, query: SlotQuery, request_seq: u64) -> Effect<BookingAction>;

    /// Start a booking submission. The resulting effect must feed back
    /// a [`BookingAction::BookingCompleted`].
    fn create_booking(&self, submission: Submission) -> Effect<BookingAction>;

    /// Clock used to timestamp confirmations.
    fn clock(&self) -> &dyn Clock;
}

/// Production environment backed by the HTTP client.
#[derive(Clone)]
pub struct HttpBookingEnvironment {
    client: Arc<BackendClient>,
    clock: SystemClock,
}

impl HttpBookingEnvironment {
    /// Wrap a backend client.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self {
            client,
            clock: SystemClock,
        }
    }
}

impl BookingEnvironment for HttpBookingEnvironment {
    fn fetch_slots(&self, query: SlotQuery, request_seq: u64) -> Effect<BookingAction> {
        let client = Arc::clone(&self.client);
        async_effect! {
            let result = client
                .fetch_slots(&query)
                .await
                .map_err(|e| e.to_string());
            Some(BookingAction::SlotsLoaded {
                request_seq,
                result,
            })
        }
    }

    fn create_booking(&self, submission: Submission) -> Effect<BookingAction> {
        let client = Arc::clone(&self.client);
        async_effect! {
            let result = client
                .create_booking(&submission)
                .await
                .map_err(|e| e.to_string());
            Some(BookingAction::BookingCompleted { result })
        }
    }

    fn clock(&self) -> &dyn Clock {
        &self.clock
    }
}
