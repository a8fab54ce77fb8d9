//! Conversion from a validated draft into a backend submission.

use playgrounds_api::{PaymentMethod, Submission};
use thiserror::Error;

use crate::types::{BookingDraft, VenueConfig};

/// A required draft field was missing when building the submission.
///
/// Step validation makes these unreachable through normal navigation;
/// they exist so the builder never has to panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// No duration selected.
    #[error("draft has no duration selected")]
    MissingDuration,
    /// No date selected.
    #[error("draft has no date selected")]
    MissingDate,
    /// No time slot selected.
    #[error("draft has no time slot selected")]
    MissingSlot,
    /// No payment method selected.
    #[error("draft has no payment method selected")]
    MissingPaymentMethod,
    /// CliQ payment without an attached receipt.
    #[error("CliQ payment requires a transfer receipt")]
    MissingReceipt,
}

/// Build a backend submission from the draft.
pub fn build_submission(
    venue: &VenueConfig,
    draft: &BookingDraft,
) -> Result<Submission, DraftError> {
    let duration = draft.duration.as_ref().ok_or(DraftError::MissingDuration)?;
    if draft.date.is_empty() {
        return Err(DraftError::MissingDate);
    }
    let slot = draft
        .selected_slot
        .as_ref()
        .ok_or(DraftError::MissingSlot)?;
    let payment_method = draft
        .payment_method
        .ok_or(DraftError::MissingPaymentMethod)?;
    if payment_method == PaymentMethod::Cliq && draft.receipt.is_none() {
        return Err(DraftError::MissingReceipt);
    }

    Ok(Submission {
        venue_id: venue.venue_id.clone(),
        date: draft.date.clone(),
        duration_minutes: duration.minutes,
        slot_id: slot.id.clone(),
        players: draft.players,
        payment_method,
        receipt: draft.receipt.clone(),
    })
}
