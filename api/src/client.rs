//! Booking backend client implementation

use crate::{
    error::BackendError,
    submission::{Submission, SubmissionBody},
    types::{ApiEnvelope, BookingConfirmation, Slot, SlotQuery},
};
use reqwest::{Client, StatusCode};

/// Booking backend API client
///
/// A thin wrapper over reqwest: no retries, no caching. The wizard layers
/// its own semantics (stale-response discards, user-driven resubmission) on
/// top of plain request/response calls.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl BackendClient {
    /// Create a new client for the given backend base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            auth_token: None,
        }
    }

    /// Attach a bearer token sent with every request
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetch the bookable slots for a venue, date, and duration
    ///
    /// The returned list replaces any previously-fetched list wholesale.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, rejected
    /// envelopes, or undecodable bodies.
    #[tracing::instrument(skip(self), fields(venue_id = %query.venue_id, date = %query.date))]
    pub async fn fetch_slots(&self, query: &SlotQuery) -> Result<Vec<Slot>, BackendError> {
        let request = self
            .client
            .get(format!("{}/playgrounds/slots", self.base_url))
            .query(&[
                ("venueId", query.venue_id.as_str()),
                ("date", query.date.as_str()),
                ("durationMinutes", &query.duration_minutes.to_string()),
            ]);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    /// Create a booking from a finished submission
    ///
    /// Dispatches on the submission's encoding: JSON for cash payments,
    /// multipart (receipt attached) for CliQ.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, rejected
    /// envelopes, or undecodable bodies.
    #[tracing::instrument(skip(self, submission), fields(venue_id = %submission.venue_id))]
    pub async fn create_booking(
        &self,
        submission: &Submission,
    ) -> Result<BookingConfirmation, BackendError> {
        let request = self
            .client
            .post(format!("{}/playgrounds/bookings", self.base_url));
        let request = self.authorize(request);

        let request = match submission.body() {
            SubmissionBody::Json(body) => request.json(&body),
            SubmissionBody::Multipart(form) => request.multipart(form),
        };

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    /// Decode an enveloped response, mapping statuses onto the error taxonomy
    async fn decode<T: serde::de::DeserializeOwned + Default>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<ApiEnvelope<T>>()
                .await
                .map_err(|e| BackendError::ResponseParseFailed(e.to_string()))?
                .into_result(),
            StatusCode::UNAUTHORIZED => Err(BackendError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(BackendError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }
}
