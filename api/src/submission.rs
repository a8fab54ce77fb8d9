//! The outbound booking payload and its dual encoding
//!
//! The booking-creation endpoint accepts either a JSON body or a
//! multipart/form-data body and dispatches on content type. Rather than
//! branching at the call site, the whole decision lives on the
//! [`Submission`] value type: [`Submission::body`] produces the byte-correct
//! variant for the chosen payment method, and adding a payment method with
//! its own encoding means adding a branch here, not in the wizard.

use crate::types::PaymentMethod;
use serde_json::json;

/// Fixed filename for the uploaded CliQ receipt part
pub const RECEIPT_FILE_NAME: &str = "cliq-receipt.jpg";

/// Fixed MIME type for the uploaded CliQ receipt part
pub const RECEIPT_MIME_TYPE: &str = "image/jpeg";

/// A locally-picked receipt image, attached when paying via CliQ
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceiptImage {
    /// Raw image bytes as read from the picker
    pub bytes: Vec<u8>,
}

impl ReceiptImage {
    /// Wrap raw image bytes
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

/// A validated, ready-to-send reservation
///
/// Built once from a completed booking draft at the Review→Submit
/// transition; consuming it does not mutate the draft, so a failed
/// submission can be retried with an identical payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Venue being booked
    pub venue_id: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Reservation length in minutes
    pub duration_minutes: u32,
    /// Chosen slot identifier
    pub slot_id: String,
    /// Player headcount
    pub players: u32,
    /// How the reservation is paid
    pub payment_method: PaymentMethod,
    /// Receipt image, required iff `payment_method` is CliQ
    pub receipt: Option<ReceiptImage>,
}

/// The encoded request body variants
#[derive(Debug)]
pub enum SubmissionBody {
    /// `application/json` body with the base fields
    Json(serde_json::Value),
    /// `multipart/form-data` body: stringified base fields plus the receipt
    /// file part
    Multipart(reqwest::multipart::Form),
}

impl Submission {
    /// Base fields as string pairs, in the order the backend documents them
    ///
    /// Shared by both encodings: the JSON body carries them typed, the
    /// multipart body carries them stringified.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("venueId", self.venue_id.clone()),
            ("date", self.date.clone()),
            ("durationMinutes", self.duration_minutes.to_string()),
            ("slotId", self.slot_id.clone()),
            ("players", self.players.to_string()),
            ("paymentType", self.payment_method.as_str().to_string()),
        ]
    }

    /// Encode as a JSON body
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "venueId": self.venue_id,
            "date": self.date,
            "durationMinutes": self.duration_minutes,
            "slotId": self.slot_id,
            "players": self.players,
            "paymentType": self.payment_method.as_str(),
        })
    }

    /// Encode as a multipart form with the receipt attached
    ///
    /// The receipt part uses the fixed filename [`RECEIPT_FILE_NAME`] and
    /// MIME type [`RECEIPT_MIME_TYPE`]. A missing receipt simply produces a
    /// form without the file part; [`Submission::body`] never takes this
    /// path for non-CliQ payments.
    #[must_use]
    pub fn to_multipart(&self) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.form_fields() {
            form = form.text(name, value);
        }
        if let Some(receipt) = &self.receipt {
            let part = reqwest::multipart::Part::bytes(receipt.bytes.clone())
                .file_name(RECEIPT_FILE_NAME)
                .mime_str(RECEIPT_MIME_TYPE)
                .unwrap_or_else(|_| {
                    reqwest::multipart::Part::bytes(receipt.bytes.clone())
                        .file_name(RECEIPT_FILE_NAME)
                });
            form = form.part("receipt", part);
        }
        form
    }

    /// Pick the encoding for this submission
    ///
    /// CliQ payments with an attached receipt go multipart; everything else
    /// goes JSON.
    #[must_use]
    pub fn body(&self) -> SubmissionBody {
        if self.payment_method == PaymentMethod::Cliq && self.receipt.is_some() {
            SubmissionBody::Multipart(self.to_multipart())
        } else {
            SubmissionBody::Json(self.to_json())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(payment_method: PaymentMethod, receipt: Option<ReceiptImage>) -> Submission {
        Submission {
            venue_id: "venue-7".to_string(),
            date: "2025-06-01".to_string(),
            duration_minutes: 90,
            slot_id: "slot-3".to_string(),
            players: 10,
            payment_method,
            receipt,
        }
    }

    #[test]
    fn json_body_carries_base_fields() {
        let body = submission(PaymentMethod::Cash, None).to_json();

        assert_eq!(body["venueId"], "venue-7");
        assert_eq!(body["date"], "2025-06-01");
        assert_eq!(body["durationMinutes"], 90);
        assert_eq!(body["slotId"], "slot-3");
        assert_eq!(body["players"], 10);
        assert_eq!(body["paymentType"], "cash");
    }

    #[test]
    fn form_fields_stringify_every_base_field() {
        let fields = submission(PaymentMethod::CashOnDate, None).form_fields();

        assert_eq!(fields.len(), 6);
        assert!(fields.contains(&("durationMinutes", "90".to_string())));
        assert!(fields.contains(&("paymentType", "cashOnDate".to_string())));
    }

    #[test]
    fn cliq_with_receipt_encodes_multipart() {
        let receipt = ReceiptImage::new(vec![0xFF, 0xD8, 0xFF]);
        let body = submission(PaymentMethod::Cliq, Some(receipt)).body();

        assert!(matches!(body, SubmissionBody::Multipart(_)));
    }

    #[test]
    fn cash_encodes_json() {
        let body = submission(PaymentMethod::Cash, None).body();
        assert!(matches!(body, SubmissionBody::Json(_)));
    }

    #[test]
    fn cliq_without_receipt_falls_back_to_json() {
        // The wizard's Payment validator prevents this state from reaching
        // submission; the encoder still degrades predictably.
        let body = submission(PaymentMethod::Cliq, None).body();
        assert!(matches!(body, SubmissionBody::Json(_)));
    }
}
