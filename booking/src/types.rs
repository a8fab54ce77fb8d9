//! State types for the booking reservation wizard.
//!
//! The wizard walks a single [`WizardState`] through four linear steps
//! (schedule, players, payment, review) and a terminal success step. All
//! user input accumulates in a [`BookingDraft`]; everything else on the
//! state is derived or transient UI status.

use chrono::{DateTime, Utc};
use playgrounds_api::{BookingConfirmation, PaymentMethod, ReceiptImage, Slot};
use serde::{Deserialize, Serialize};

use crate::pricing;

/// A selectable booking duration offered by a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationOption {
    /// Stable identifier, unique within a venue's duration list.
    pub id: String,
    /// Length of the reservation in minutes.
    pub minutes: u32,
    /// Display label, e.g. "1.5 hours".
    pub label: String,
    /// Fixed price override in cents. When absent the price is derived
    /// from the venue's hourly rate, pro-rated by minutes.
    pub base_price_cents: Option<u64>,
}

impl DurationOption {
    /// Create a duration priced from the venue's hourly rate.
    pub fn new(id: impl Into<String>, minutes: u32, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            minutes,
            label: label.into(),
            base_price_cents: None,
        }
    }

    /// Attach a fixed price in cents, overriding the hourly derivation.
    #[must_use]
    pub fn with_base_price(mut self, cents: u64) -> Self {
        self.base_price_cents = Some(cents);
        self
    }
}

/// Static venue configuration the wizard is launched with.
///
/// This is read-only input: the reducer never mutates it, only consults
/// it for pricing, player bounds, and which payment methods to offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Backend identifier for the venue.
    pub venue_id: String,
    /// Display name, also the fallback on the success summary.
    pub name: String,
    /// Hourly rate in cents, used when a duration has no fixed price.
    pub price_per_hour_cents: u64,
    /// Smallest allowed player count (inclusive).
    pub min_players: u32,
    /// Largest allowed player count (inclusive).
    pub max_players: u32,
    /// Durations the venue offers.
    pub durations: Vec<DurationOption>,
    /// Whether cash on arrival is accepted.
    pub allow_cash: bool,
    /// Whether cash on the booked date is accepted.
    pub allow_cash_on_date: bool,
    /// Whether CliQ transfer (with receipt upload) is accepted.
    pub allow_cliq: bool,
}

impl VenueConfig {
    /// Create a venue with default player bounds (1..=99) and every
    /// payment method enabled.
    pub fn new(
        venue_id: impl Into<String>,
        name: impl Into<String>,
        price_per_hour_cents: u64,
    ) -> Self {
        Self {
            venue_id: venue_id.into(),
            name: name.into(),
            price_per_hour_cents,
            min_players: 1,
            max_players: 99,
            durations: Vec::new(),
            allow_cash: true,
            allow_cash_on_date: true,
            allow_cliq: true,
        }
    }

    /// Set inclusive player count bounds.
    #[must_use]
    pub fn with_player_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the offered durations.
    #[must_use]
    pub fn with_durations(mut self, durations: Vec<DurationOption>) -> Self {
        self.durations = durations;
        self
    }

    /// Enable or disable individual payment methods.
    #[must_use]
    pub fn with_payment_methods(mut self, cash: bool, cash_on_date: bool, cliq: bool) -> Self {
        self.allow_cash = cash;
        self.allow_cash_on_date = cash_on_date;
        self.allow_cliq = cliq;
        self
    }

    /// Whether the venue accepts the given payment method.
    pub fn allows(&self, method: PaymentMethod) -> bool {
        match method {
            PaymentMethod::Cash => self.allow_cash,
            PaymentMethod::CashOnDate => self.allow_cash_on_date,
            PaymentMethod::Cliq => self.allow_cliq,
        }
    }
}

/// The wizard's current step.
///
/// Steps are strictly ordered; navigation only ever moves one step at a
/// time. `Success` is terminal and reachable only through a confirmed
/// submission, never through forward navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    /// Duration, date, and time slot selection.
    Schedule,
    /// Player count entry.
    Players,
    /// Payment method choice, plus receipt upload for CliQ.
    Payment,
    /// Read-only summary; confirming here submits the booking.
    Review,
    /// Terminal confirmation screen.
    Success,
}

impl WizardStep {
    /// Zero-based position in the step sequence.
    pub fn index(self) -> usize {
        match self {
            Self::Schedule => 0,
            Self::Players => 1,
            Self::Payment => 2,
            Self::Review => 3,
            Self::Success => 4,
        }
    }

    /// The step reached by forward navigation. `Review` and `Success`
    /// have no forward neighbour: leaving `Review` goes through
    /// submission instead.
    pub fn next(self) -> Self {
        match self {
            Self::Schedule => Self::Players,
            Self::Players => Self::Payment,
            Self::Payment | Self::Review => Self::Review,
            Self::Success => Self::Success,
        }
    }

    /// The step reached by backward navigation, flooring at `Schedule`.
    pub fn previous(self) -> Self {
        match self {
            Self::Schedule | Self::Players => Self::Schedule,
            Self::Payment => Self::Players,
            Self::Review => Self::Payment,
            Self::Success => Self::Success,
        }
    }

    /// Whether this is the terminal step.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Accumulated user input across the wizard steps.
///
/// The draft survives submission failures untouched so the user can
/// retry without re-entering anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    /// Chosen duration, if any.
    pub duration: Option<DurationOption>,
    /// Chosen date as an ISO `YYYY-MM-DD` string; empty until picked.
    pub date: String,
    /// Chosen slot from the most recently fetched availability list.
    pub selected_slot: Option<Slot>,
    /// Number of players.
    pub players: u32,
    /// Chosen payment method, if any.
    pub payment_method: Option<PaymentMethod>,
    /// Uploaded transfer receipt, required only for CliQ.
    pub receipt: Option<ReceiptImage>,
}

impl BookingDraft {
    /// An empty draft with a single player preselected.
    pub fn new() -> Self {
        Self {
            duration: None,
            date: String::new(),
            selected_slot: None,
            players: 1,
            payment_method: None,
            receipt: None,
        }
    }
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Confirmation details shown on the success step.
///
/// Server-provided fields win; anything the server omits falls back to
/// the draft and locally computed price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    /// Server booking reference, when one was returned.
    pub reference: Option<String>,
    /// Venue display name.
    pub venue_name: String,
    /// Booked date.
    pub date: String,
    /// Booked slot label.
    pub slot_label: String,
    /// Player count.
    pub players: u32,
    /// Total price in cents.
    pub total_price_cents: u64,
    /// When the confirmation was received, per the environment clock.
    pub booked_at: DateTime<Utc>,
}

/// Complete wizard state owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    /// Venue the wizard was launched for.
    pub venue: VenueConfig,
    /// Current step.
    pub step: WizardStep,
    /// Accumulated user input.
    pub draft: BookingDraft,
    /// Time slots fetched for the current duration and date.
    pub slots: Vec<Slot>,
    /// Whether a slot fetch is in flight for the current inputs.
    pub slots_loading: bool,
    /// User-facing message when the last slot fetch failed.
    pub slots_error: Option<String>,
    /// Generation token for slot fetches; responses carrying an older
    /// token are discarded.
    pub slot_request_seq: u64,
    /// Whether validation hints are shown on the current step.
    pub validation_visible: bool,
    /// Whether a submission is in flight.
    pub submitting: bool,
    /// User-facing message when the last submission failed.
    pub error: Option<String>,
    /// Confirmation summary, set once submission succeeds.
    pub success: Option<BookingSummary>,
}

impl WizardState {
    /// Fresh wizard state at the schedule step.
    pub fn new(venue: VenueConfig) -> Self {
        Self {
            venue,
            step: WizardStep::Schedule,
            draft: BookingDraft::new(),
            slots: Vec::new(),
            slots_loading: false,
            slots_error: None,
            slot_request_seq: 0,
            validation_visible: false,
            submitting: false,
            error: None,
            success: None,
        }
    }

    /// Total price in cents for the current draft.
    pub fn total_price_cents(&self) -> u64 {
        pricing::total_price_cents(self.draft.duration.as_ref(), self.venue.price_per_hour_cents)
    }

    /// Build the success summary from a server confirmation, filling
    /// any omitted fields from the draft.
    pub fn success_summary(
        &self,
        confirmation: &BookingConfirmation,
        booked_at: DateTime<Utc>,
    ) -> BookingSummary {
        BookingSummary {
            reference: confirmation.reference().map(str::to_string),
            venue_name: confirmation
                .venue
                .clone()
                .unwrap_or_else(|| self.venue.name.clone()),
            date: self.draft.date.clone(),
            slot_label: confirmation.slot_label.clone().unwrap_or_else(|| {
                self.draft
                    .selected_slot
                    .as_ref()
                    .map(|s| s.label.clone())
                    .unwrap_or_default()
            }),
            players: self.draft.players,
            total_price_cents: confirmation
                .total_price_cents
                .unwrap_or_else(|| self.total_price_cents()),
            booked_at,
        }
    }
}
