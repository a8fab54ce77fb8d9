//! End-to-end wizard flows through the store runtime.
//!
//! These tests drive the reducer through a real `Store` with a scripted
//! environment, covering the full happy path, submission failure and
//! retry, the double-submit guard, the slot fetch race, and teardown
//! while a fetch is in flight.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use playgrounds_api::{BookingConfirmation, PaymentMethod, Slot, SlotQuery, Submission};
use playgrounds_booking::{
    BookingAction, BookingEnvironment, BookingReducer, DurationOption, SUBMIT_ERROR, VenueConfig,
    WizardState, WizardStep,
};
use playgrounds_core::environment::Clock;
use playgrounds_core::{Effect, async_effect};
use playgrounds_runtime::Store;
use playgrounds_testing::mocks::{FixedClock, test_clock};
use tokio::sync::Notify;

struct ScriptedFetch {
    delay: Duration,
    result: Result<Vec<Slot>, String>,
}

/// Environment that replays scripted responses in call order. Fetches
/// and bookings are popped synchronously when the reducer asks for the
/// effect, so scripts line up with the order effects were started in.
#[derive(Clone)]
struct ScriptedEnv {
    fetches: Arc<Mutex<VecDeque<ScriptedFetch>>>,
    bookings: Arc<Mutex<VecDeque<Result<BookingConfirmation, String>>>>,
    create_calls: Arc<AtomicUsize>,
    submission_gate: Option<Arc<Notify>>,
    clock: FixedClock,
}

impl ScriptedEnv {
    fn new() -> Self {
        Self {
            fetches: Arc::new(Mutex::new(VecDeque::new())),
            bookings: Arc::new(Mutex::new(VecDeque::new())),
            create_calls: Arc::new(AtomicUsize::new(0)),
            submission_gate: None,
            clock: test_clock(),
        }
    }

    fn script_fetch(&self, delay: Duration, result: Result<Vec<Slot>, String>) {
        self.fetches
            .lock()
            .unwrap()
            .push_back(ScriptedFetch { delay, result });
    }

    fn script_booking(&self, result: Result<BookingConfirmation, String>) {
        self.bookings.lock().unwrap().push_back(result);
    }

    fn with_submission_gate(mut self, gate: Arc<Notify>) -> Self {
        self.submission_gate = Some(gate);
        self
    }

    fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

impl BookingEnvironment for ScriptedEnv {
    fn fetch_slots(&self, _query: SlotQuery, request_seq: u64) -> Effect<BookingAction> {
        let scripted = self
            .fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ScriptedFetch {
                delay: Duration::ZERO,
                result: Ok(Vec::new()),
            });
        async_effect! {
            tokio::time::sleep(scripted.delay).await;
            Some(BookingAction::SlotsLoaded {
                request_seq,
                result: scripted.result,
            })
        }
    }

    fn create_booking(&self, _submission: Submission) -> Effect<BookingAction> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .bookings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted booking outcome".to_string()));
        let gate = self.submission_gate.clone();
        async_effect! {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            Some(BookingAction::BookingCompleted { result })
        }
    }

    fn clock(&self) -> &dyn Clock {
        &self.clock
    }
}

fn venue() -> VenueConfig {
    VenueConfig::new("venue-1", "Court A", 1500)
        .with_player_bounds(1, 12)
        .with_durations(vec![
            DurationOption::new("d60", 60, "1 hour"),
            DurationOption::new("d90", 90, "1.5 hours"),
        ])
}

fn slot(id: &str, label: &str) -> Slot {
    Slot {
        id: id.to_string(),
        label: label.to_string(),
        is_available: true,
    }
}

type WizardStore = Store<WizardState, BookingAction, ScriptedEnv, BookingReducer<ScriptedEnv>>;

fn store_with(env: ScriptedEnv) -> WizardStore {
    Store::new(WizardState::new(venue()), BookingReducer::new(), env)
}

async fn send(store: &WizardStore, action: BookingAction) {
    let mut handle = store.send(action).await.expect("store accepts action");
    handle.wait().await;
}

/// Drive the wizard from a fresh state to the review step with a cash
/// payment. Assumes one scripted fetch returning slot "s1".
async fn walk_to_review(store: &WizardStore) {
    send(
        store,
        BookingAction::DurationSelected(DurationOption::new("d90", 90, "1.5 hours")),
    )
    .await;
    send(store, BookingAction::DateSelected("2025-06-01".to_string())).await;
    send(store, BookingAction::SlotSelected("s1".to_string())).await;
    send(store, BookingAction::NextPressed).await;
    send(store, BookingAction::PlayersChanged(4)).await;
    send(store, BookingAction::NextPressed).await;
    send(store, BookingAction::PaymentSelected(PaymentMethod::Cash)).await;
    send(store, BookingAction::NextPressed).await;
    let step = store.state(|s| s.step).await;
    assert_eq!(step, WizardStep::Review);
}

#[tokio::test]
async fn happy_path_reaches_success_with_summary() {
    let env = ScriptedEnv::new();
    env.script_fetch(
        Duration::ZERO,
        Ok(vec![slot("s1", "18:00"), slot("s2", "19:30")]),
    );
    env.script_booking(Ok(BookingConfirmation {
        id: Some("bk-42".to_string()),
        booking_id: None,
        venue: None,
        slot_label: None,
        total_price_cents: None,
    }));
    let store = store_with(env);

    walk_to_review(&store).await;
    send(&store, BookingAction::NextPressed).await;

    let (step, summary) = store.state(|s| (s.step, s.success.clone())).await;
    assert_eq!(step, WizardStep::Success);
    let summary = summary.expect("summary set on success");
    assert_eq!(summary.reference.as_deref(), Some("bk-42"));
    assert_eq!(summary.venue_name, "Court A");
    assert_eq!(summary.slot_label, "18:00");
    assert_eq!(summary.players, 4);
    assert_eq!(summary.total_price_cents, 2250);
}

#[tokio::test]
async fn failed_submission_allows_retry() {
    let env = ScriptedEnv::new();
    env.script_fetch(Duration::ZERO, Ok(vec![slot("s1", "18:00")]));
    env.script_booking(Err("backend 500".to_string()));
    env.script_booking(Ok(BookingConfirmation {
        id: Some("bk-7".to_string()),
        booking_id: None,
        venue: None,
        slot_label: None,
        total_price_cents: None,
    }));
    let store = store_with(env.clone());

    walk_to_review(&store).await;
    send(&store, BookingAction::NextPressed).await;

    let (step, error, submitting, draft_slot) = store
        .state(|s| {
            (
                s.step,
                s.error.clone(),
                s.submitting,
                s.draft.selected_slot.clone(),
            )
        })
        .await;
    assert_eq!(step, WizardStep::Review);
    assert_eq!(error.as_deref(), Some(SUBMIT_ERROR));
    assert!(!submitting);
    assert!(draft_slot.is_some());

    // Retry with the untouched draft.
    send(&store, BookingAction::NextPressed).await;
    let (step, error) = store.state(|s| (s.step, s.error.clone())).await;
    assert_eq!(step, WizardStep::Success);
    assert_eq!(error, None);
    assert_eq!(env.create_calls(), 2);
}

#[tokio::test]
async fn second_confirm_while_submitting_is_ignored() {
    let gate = Arc::new(Notify::new());
    let env = ScriptedEnv::new().with_submission_gate(Arc::clone(&gate));
    env.script_fetch(Duration::ZERO, Ok(vec![slot("s1", "18:00")]));
    env.script_booking(Ok(BookingConfirmation::default()));
    let store = store_with(env.clone());

    walk_to_review(&store).await;

    // First confirm starts the submission; its effect is parked on the gate.
    let mut first = store
        .send(BookingAction::NextPressed)
        .await
        .expect("store accepts action");
    assert!(store.state(|s| s.submitting).await);

    // Second confirm while in flight must not start another request.
    send(&store, BookingAction::NextPressed).await;
    assert_eq!(env.create_calls(), 1);

    gate.notify_one();
    first.wait().await;

    assert_eq!(store.state(|s| s.step).await, WizardStep::Success);
    assert_eq!(env.create_calls(), 1);
}

#[tokio::test]
async fn slow_stale_fetch_loses_to_current_one() {
    let env = ScriptedEnv::new();
    // First fetch is slow and will land after its inputs changed.
    env.script_fetch(Duration::from_millis(100), Ok(vec![slot("old", "09:00")]));
    env.script_fetch(Duration::ZERO, Ok(vec![slot("new", "18:00")]));
    let store = store_with(env);

    send(
        &store,
        BookingAction::DurationSelected(DurationOption::new("d60", 60, "1 hour")),
    )
    .await;
    let mut slow = store
        .send(BookingAction::DateSelected("2025-06-01".to_string()))
        .await
        .expect("store accepts action");
    send(&store, BookingAction::DateSelected("2025-06-02".to_string())).await;

    // Let the superseded fetch land; its response must be discarded.
    slow.wait().await;

    let (slots, seq, loading) = store
        .state(|s| (s.slots.clone(), s.slot_request_seq, s.slots_loading))
        .await;
    assert_eq!(seq, 2);
    assert!(!loading);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].id, "new");
}

#[tokio::test]
async fn shutdown_discards_inflight_fetch_feedback() {
    let env = ScriptedEnv::new();
    env.script_fetch(Duration::from_millis(50), Ok(vec![slot("s1", "18:00")]));
    let store = store_with(env);

    send(
        &store,
        BookingAction::DurationSelected(DurationOption::new("d60", 60, "1 hour")),
    )
    .await;
    store
        .send(BookingAction::DateSelected("2025-06-01".to_string()))
        .await
        .expect("store accepts action");

    // Tear down while the fetch is still sleeping. The effect finishes,
    // but its feedback is rejected and never touches state.
    store
        .shutdown(Duration::from_secs(1))
        .await
        .expect("clean shutdown");

    let (slots, loading) = store.state(|s| (s.slots.clone(), s.slots_loading)).await;
    assert!(slots.is_empty());
    assert!(loading);
}
