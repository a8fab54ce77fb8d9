//! Wire types for the booking backend
//!
//! Every endpoint wraps its payload in a `{success, data, error}` envelope;
//! [`ApiEnvelope::into_result`] converts that into a `Result` so callers never
//! inspect the flag themselves.

use crate::error::BackendError;
use serde::{Deserialize, Serialize};

/// Query for bookable time slots
///
/// Slots are keyed on the full triple - changing the date or the duration
/// yields a different slot list, which is why the wizard refetches whenever
/// either changes.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SlotQuery {
    /// Venue to query
    #[serde(rename = "venueId")]
    pub venue_id: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Reservation length in minutes
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
}

/// A bookable time window for a venue/date/duration
///
/// Slot lists are ephemeral: each fetch replaces the previous list wholesale,
/// they are never merged.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    /// Opaque slot identifier
    pub id: String,
    /// Display label, e.g. `"18:00 - 19:00"`
    #[serde(alias = "start_time")]
    pub label: String,
    /// Whether the slot can currently be booked
    #[serde(default = "default_true", rename = "isAvailable")]
    pub is_available: bool,
}

const fn default_true() -> bool {
    true
}

/// Payment method for a reservation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    /// Pay cash when the booking is made
    Cash,
    /// Pay cash at the venue on the reserved date
    CashOnDate,
    /// CliQ bank transfer, proven by an uploaded receipt image
    Cliq,
}

impl PaymentMethod {
    /// Wire value used in form fields and JSON bodies
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::CashOnDate => "cashOnDate",
            Self::Cliq => "cliq",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response payload of a successful booking creation
///
/// Every field is optional: the backend's response shape varies by deployment,
/// and the client falls back to locally-known draft fields when building the
/// success summary.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct BookingConfirmation {
    /// Primary identifier of the created booking
    #[serde(default)]
    pub id: Option<String>,
    /// Alternate identifier some deployments return instead of `id`
    #[serde(default, rename = "bookingId")]
    pub booking_id: Option<String>,
    /// Venue name, when the backend echoes it
    #[serde(default)]
    pub venue: Option<String>,
    /// Slot label, when the backend echoes it
    #[serde(default, rename = "slotLabel")]
    pub slot_label: Option<String>,
    /// Total price in cents, when the backend echoes it
    #[serde(default, rename = "totalPriceCents")]
    pub total_price_cents: Option<u64>,
}

impl BookingConfirmation {
    /// Booking reference, preferring `id` over `bookingId`
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.id.as_deref().or(self.booking_id.as_deref())
    }
}

/// The `{success, data, error}` envelope every endpoint responds with
#[derive(Clone, Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Payload, present on success
    #[serde(default)]
    pub data: Option<T>,
    /// Error message, present on failure
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the envelope into a `Result`
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Rejected`] when `success` is false, and
    /// [`BackendError::ResponseParseFailed`] when a success envelope is
    /// missing its payload.
    pub fn into_result(self) -> Result<T, BackendError> {
        if self.success {
            self.data.ok_or_else(|| {
                BackendError::ResponseParseFailed("success envelope without data".to_string())
            })
        } else {
            Err(BackendError::Rejected(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn payment_method_wire_values() {
        assert_eq!(PaymentMethod::Cash.as_str(), "cash");
        assert_eq!(PaymentMethod::CashOnDate.as_str(), "cashOnDate");
        assert_eq!(PaymentMethod::Cliq.as_str(), "cliq");

        let json = serde_json::to_string(&PaymentMethod::CashOnDate).unwrap();
        assert_eq!(json, "\"cashOnDate\"");
    }

    #[test]
    fn slot_deserializes_start_time_alias() {
        let slot: Slot =
            serde_json::from_str(r#"{"id": "s1", "start_time": "18:00", "isAvailable": false}"#)
                .unwrap();
        assert_eq!(slot.label, "18:00");
        assert!(!slot.is_available);
    }

    #[test]
    fn slot_availability_defaults_to_true() {
        let slot: Slot = serde_json::from_str(r#"{"id": "s1", "label": "18:00"}"#).unwrap();
        assert!(slot.is_available);
    }

    #[test]
    fn envelope_success_unwraps_data() {
        let envelope: ApiEnvelope<Vec<Slot>> = serde_json::from_str(
            r#"{"success": true, "data": [{"id": "s1", "label": "18:00"}]}"#,
        )
        .unwrap();
        let slots = envelope.into_result().unwrap();
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn envelope_failure_surfaces_error() {
        let envelope: ApiEnvelope<Vec<Slot>> =
            serde_json::from_str(r#"{"success": false, "error": "venue closed"}"#).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(matches!(err, BackendError::Rejected(msg) if msg == "venue closed"));
    }

    #[test]
    fn confirmation_reference_prefers_id() {
        let confirmation = BookingConfirmation {
            id: Some("b-1".to_string()),
            booking_id: Some("legacy-9".to_string()),
            ..BookingConfirmation::default()
        };
        assert_eq!(confirmation.reference(), Some("b-1"));

        let legacy = BookingConfirmation {
            booking_id: Some("legacy-9".to_string()),
            ..BookingConfirmation::default()
        };
        assert_eq!(legacy.reference(), Some("legacy-9"));
    }
}
