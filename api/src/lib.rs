//! # Playgrounds API
//!
//! REST backend client for the Playgrounds booking service.
//!
//! This crate owns the wire boundary of the booking client:
//!
//! - [`types`] - request/response shapes for slot availability and booking
//!   creation, including the `{success, data, error}` envelope the backend
//!   wraps every payload in
//! - [`submission`] - the [`Submission`](submission::Submission) value type
//!   that encodes a finished booking draft as either a JSON body or a
//!   multipart form (CliQ receipts travel as an attached image)
//! - [`client`] - the reqwest-backed [`BackendClient`](client::BackendClient)
//! - [`error`] - the [`BackendError`](error::BackendError) taxonomy
//!
//! The crate does not retry, queue, or cache; callers decide how to react to
//! failures (the booking wizard surfaces them as inline state).

pub mod client;
pub mod error;
pub mod submission;
pub mod types;

pub use client::BackendClient;
pub use error::BackendError;
pub use submission::{ReceiptImage, Submission, SubmissionBody};
pub use types::{BookingConfirmation, PaymentMethod, Slot, SlotQuery};
