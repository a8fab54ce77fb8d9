//! The booking wizard reducer.
//!
//! All wizard behaviour lives here: step navigation, validation gating,
//! slot fetch lifecycle with stale-response discarding, the submission
//! guard, and success/failure handling. The reducer is pure; network
//! work is described as effects and executed by the store.

use std::marker::PhantomData;

use playgrounds_api::{BookingConfirmation, PaymentMethod, ReceiptImage, Slot, SlotQuery};
use playgrounds_core::reducer::Reducer;
use playgrounds_core::{Effect, SmallVec, smallvec};

use crate::environment::BookingEnvironment;
use crate::submission::build_submission;
use crate::types::{DurationOption, WizardState, WizardStep};
use crate::validation;

/// User-facing message when a slot fetch fails.
pub const SLOTS_ERROR: &str = "Couldn't load time slots. Try another date or duration.";
/// User-facing message when a submission fails.
pub const SUBMIT_ERROR: &str = "We couldn't complete your booking. Please try again.";

/// Every event the wizard reacts to: user input, navigation, and
/// feedback from in-flight effects.
#[derive(Debug, Clone)]
pub enum BookingAction {
    /// User picked a duration on the schedule step.
    DurationSelected(DurationOption),
    /// User picked a date (ISO `YYYY-MM-DD`) on the schedule step.
    DateSelected(String),
    /// User tapped a slot in the fetched availability list, by id.
    SlotSelected(String),
    /// User changed the player count.
    PlayersChanged(u32),
    /// User picked a payment method.
    PaymentSelected(PaymentMethod),
    /// User attached a CliQ transfer receipt.
    ReceiptAttached(ReceiptImage),
    /// User removed the attached receipt.
    ReceiptCleared,
    /// Forward navigation; on the review step this submits.
    NextPressed,
    /// Backward navigation.
    BackPressed,
    /// Reset to a fresh wizard from the success step.
    StartOver,
    /// A slot fetch finished. `request_seq` identifies which fetch.
    SlotsLoaded {
        /// Generation token the fetch was started with.
        request_seq: u64,
        /// Fetched slots, or a transport/backend error description.
        result: Result<Vec<Slot>, String>,
    },
    /// The booking submission finished.
    BookingCompleted {
        /// Server confirmation, or a transport/backend error description.
        result: Result<BookingConfirmation, String>,
    },
}

/// Reducer driving [`WizardState`].
#[derive(Debug)]
pub struct BookingReducer<E> {
    _env: PhantomData<E>,
}

impl<E> BookingReducer<E> {
    /// Create the reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self { _env: PhantomData }
    }
}

impl<E> Default for BookingReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

// PhantomData should not force E: Clone onto the reducer.
impl<E> Clone for BookingReducer<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

type Effects = SmallVec<[Effect<BookingAction>; 4]>;

impl<E: BookingEnvironment> BookingReducer<E> {
    /// Start a fresh availability fetch if both duration and date are
    /// set. Bumps the generation token so any fetch still in flight is
    /// discarded when it lands.
    fn refresh_slots(state: &mut WizardState, env: &E) -> Effects {
        let Some(duration) = state.draft.duration.as_ref() else {
            return smallvec![Effect::None];
        };
        if state.draft.date.is_empty() {
            return smallvec![Effect::None];
        }

        state.slot_request_seq += 1;
        state.slots_loading = true;
        state.slots_error = None;

        let query = SlotQuery {
            venue_id: state.venue.venue_id.clone(),
            date: state.draft.date.clone(),
            duration_minutes: duration.minutes,
        };
        tracing::debug!(
            request_seq = state.slot_request_seq,
            date = %query.date,
            duration_minutes = query.duration_minutes,
            "fetching slots"
        );
        smallvec![env.fetch_slots(query, state.slot_request_seq)]
    }

    /// A schedule input changed: the current slot list no longer
    /// describes the draft, so drop it and the selection with it.
    fn invalidate_slots(state: &mut WizardState) {
        state.slots.clear();
        state.draft.selected_slot = None;
    }

    fn apply_slots(
        state: &mut WizardState,
        request_seq: u64,
        result: Result<Vec<Slot>, String>,
    ) -> Effects {
        if request_seq != state.slot_request_seq {
            tracing::debug!(
                request_seq,
                current_seq = state.slot_request_seq,
                "discarding stale slot response"
            );
            return smallvec![Effect::None];
        }

        state.slots_loading = false;
        match result {
            Ok(slots) => {
                state.slots_error = None;
                let selection_survives = state
                    .draft
                    .selected_slot
                    .as_ref()
                    .is_some_and(|selected| slots.iter().any(|s| s.id == selected.id));
                if !selection_survives {
                    state.draft.selected_slot = None;
                }
                state.slots = slots;
            }
            Err(error) => {
                tracing::warn!(%error, "slot fetch failed");
                state.slots.clear();
                state.draft.selected_slot = None;
                state.slots_error = Some(SLOTS_ERROR.to_string());
            }
        }
        smallvec![Effect::None]
    }

    fn advance(state: &mut WizardState, env: &E) -> Effects {
        if state.step.is_terminal() {
            return smallvec![Effect::None];
        }
        if !validation::step_ready(&state.venue, &state.draft, state.step) {
            state.validation_visible = true;
            return smallvec![Effect::None];
        }
        if state.step == WizardStep::Review {
            return Self::submit(state, env);
        }
        state.step = state.step.next();
        state.validation_visible = false;
        smallvec![Effect::None]
    }

    fn submit(state: &mut WizardState, env: &E) -> Effects {
        if state.submitting {
            tracing::debug!("submission already in flight, ignoring");
            return smallvec![Effect::None];
        }

        match build_submission(&state.venue, &state.draft) {
            Ok(submission) => {
                state.submitting = true;
                state.error = None;
                tracing::info!(
                    venue_id = %submission.venue_id,
                    payment_method = %submission.payment_method,
                    "submitting booking"
                );
                smallvec![env.create_booking(submission)]
            }
            // Unreachable through navigation; earlier steps gate all
            // required fields. Surface it like a failed submission.
            Err(error) => {
                tracing::error!(%error, "draft incomplete at submission");
                state.error = Some(SUBMIT_ERROR.to_string());
                smallvec![Effect::None]
            }
        }
    }

    fn apply_submission_outcome(
        state: &mut WizardState,
        result: Result<BookingConfirmation, String>,
        env: &E,
    ) -> Effects {
        if !state.submitting {
            tracing::debug!("ignoring submission outcome with no submission in flight");
            return smallvec![Effect::None];
        }
        state.submitting = false;

        match result {
            Ok(confirmation) => {
                let summary = state.success_summary(&confirmation, env.clock().now());
                tracing::info!(reference = ?summary.reference, "booking confirmed");
                state.success = Some(summary);
                state.error = None;
                state.step = WizardStep::Success;
            }
            Err(error) => {
                // Draft and step stay put so the user can retry.
                tracing::warn!(%error, "booking submission failed");
                state.error = Some(SUBMIT_ERROR.to_string());
            }
        }
        smallvec![Effect::None]
    }
}

impl<E: BookingEnvironment> Reducer for BookingReducer<E> {
    type State = WizardState;
    type Action = BookingAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut WizardState,
        action: BookingAction,
        env: &E,
    ) -> SmallVec<[Effect<BookingAction>; 4]> {
        match action {
            BookingAction::DurationSelected(duration) => {
                if state.draft.duration.as_ref().is_some_and(|d| d.id == duration.id) {
                    return smallvec![Effect::None];
                }
                state.draft.duration = Some(duration);
                Self::invalidate_slots(state);
                Self::refresh_slots(state, env)
            }
            BookingAction::DateSelected(date) => {
                if state.draft.date == date {
                    return smallvec![Effect::None];
                }
                state.draft.date = date;
                Self::invalidate_slots(state);
                Self::refresh_slots(state, env)
            }
            BookingAction::SlotSelected(slot_id) => {
                match state.slots.iter().find(|s| s.id == slot_id) {
                    Some(slot) if slot.is_available => {
                        state.draft.selected_slot = Some(slot.clone());
                    }
                    Some(_) => {
                        tracing::debug!(%slot_id, "ignoring selection of unavailable slot");
                    }
                    None => {
                        tracing::debug!(%slot_id, "ignoring selection of unknown slot");
                    }
                }
                smallvec![Effect::None]
            }
            BookingAction::PlayersChanged(players) => {
                state.draft.players = players;
                smallvec![Effect::None]
            }
            BookingAction::PaymentSelected(method) => {
                if state.venue.allows(method) {
                    state.draft.payment_method = Some(method);
                } else {
                    tracing::debug!(%method, "ignoring payment method the venue disallows");
                }
                smallvec![Effect::None]
            }
            BookingAction::ReceiptAttached(receipt) => {
                state.draft.receipt = Some(receipt);
                smallvec![Effect::None]
            }
            BookingAction::ReceiptCleared => {
                state.draft.receipt = None;
                smallvec![Effect::None]
            }
            BookingAction::NextPressed => Self::advance(state, env),
            BookingAction::BackPressed => {
                if !state.step.is_terminal() {
                    state.step = state.step.previous();
                    state.validation_visible = false;
                }
                smallvec![Effect::None]
            }
            BookingAction::StartOver => {
                if state.step.is_terminal() {
                    *state = WizardState::new(state.venue.clone());
                }
                smallvec![Effect::None]
            }
            BookingAction::SlotsLoaded {
                request_seq,
                result,
            } => Self::apply_slots(state, request_seq, result),
            BookingAction::BookingCompleted { result } => {
                Self::apply_submission_outcome(state, result, env)
            }
        }
    }
}
