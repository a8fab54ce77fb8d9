//! Per-step readiness checks.
//!
//! Each step has a pure predicate over the draft (and venue bounds).
//! The reducer consults these on forward navigation; a failing check
//! blocks the step change and surfaces the matching hint.

use playgrounds_api::PaymentMethod;

use crate::types::{BookingDraft, VenueConfig, WizardStep};

/// Hint shown when the schedule step is incomplete.
pub const SCHEDULE_HINT: &str = "Pick a duration, date, and time slot to continue";
/// Hint shown when the player count is out of range.
pub const PLAYERS_HINT: &str = "Enter how many players are coming";
/// Hint shown when the payment step is incomplete.
pub const PAYMENT_HINT: &str = "Choose a payment method (CliQ needs a receipt)";

/// Duration, date, and slot are all chosen.
pub fn schedule_ready(draft: &BookingDraft) -> bool {
    draft.duration.is_some() && !draft.date.is_empty() && draft.selected_slot.is_some()
}

/// Player count is positive and within the venue's bounds.
pub fn players_ready(venue: &VenueConfig, draft: &BookingDraft) -> bool {
    draft.players > 0 && draft.players >= venue.min_players && draft.players <= venue.max_players
}

/// A payment method is chosen, and CliQ additionally has a receipt.
pub fn payment_ready(draft: &BookingDraft) -> bool {
    match draft.payment_method {
        None => false,
        Some(PaymentMethod::Cliq) => draft.receipt.is_some(),
        Some(PaymentMethod::Cash | PaymentMethod::CashOnDate) => true,
    }
}

/// Whether forward navigation may leave the given step.
///
/// Review is always "ready": leaving it goes through submission, which
/// has its own guard. Success is terminal.
pub fn step_ready(venue: &VenueConfig, draft: &BookingDraft, step: WizardStep) -> bool {
    match step {
        WizardStep::Schedule => schedule_ready(draft),
        WizardStep::Players => players_ready(venue, draft),
        WizardStep::Payment => payment_ready(draft),
        WizardStep::Review | WizardStep::Success => true,
    }
}

/// The hint to surface when the given step fails validation.
pub fn validation_hint(step: WizardStep) -> Option<&'static str> {
    match step {
        WizardStep::Schedule => Some(SCHEDULE_HINT),
        WizardStep::Players => Some(PLAYERS_HINT),
        WizardStep::Payment => Some(PAYMENT_HINT),
        WizardStep::Review | WizardStep::Success => None,
    }
}
