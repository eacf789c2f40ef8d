//! HTTP implementation of the remote booking API
//!
//! Thin REST client over `reqwest`: JSON bodies in and out, multipart upload
//! for payment proofs, and a single status-code mapping into the crate error
//! taxonomy so services never see raw HTTP.

use std::time::Duration;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::settings::Settings;
use crate::models::booking::{Booking, BookingDetail, CreateBookingRequest, CreatedBooking};
use crate::models::participant::{JoinSessionRequest, Participant};
use crate::models::session::{
    CreateMabarSessionRequest, CreatedSession, MabarSession, UpdateMabarSessionRequest,
};
use crate::models::slot::Field;
use crate::utils::errors::{CourtBuddyError, Result};
use crate::utils::helpers::sanitize_filename;

use super::BookingApi;

/// Structured error payload returned by the remote API
#[derive(Debug, Clone, Default, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    field_id: Option<i64>,
    date: Option<NaiveDate>,
    session_id: Option<i64>,
    slots_total: Option<i32>,
    invoice: Option<String>,
}

/// REST client for the booking platform API
#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    client: Client,
    settings: Settings,
    auth_token: Option<String>,
}

impl HttpBookingApi {
    /// Create a new client from settings
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_seconds))
            .user_agent(format!("CourtBuddy/{}", crate::VERSION))
            .build()
            .map_err(CourtBuddyError::Http)?;

        Ok(Self {
            client,
            settings,
            auth_token: None,
        })
    }

    /// Attach a bearer token for authenticated calls
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.api.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Translate a non-success response into the error taxonomy.
    ///
    /// `not_found` carries the caller's context so a bare 404 still names the
    /// resource that was missing.
    async fn map_error(
        endpoint: &str,
        response: Response,
        not_found: CourtBuddyError,
    ) -> CourtBuddyError {
        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        let message = body.message.clone().unwrap_or_else(|| status.to_string());

        warn!(endpoint = endpoint, status = status.as_u16(), message = %message, "Remote API returned an error");

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                CourtBuddyError::Validation(message)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                CourtBuddyError::Authentication(message)
            }
            StatusCode::NOT_FOUND => not_found,
            StatusCode::CONFLICT => match body.code.as_deref() {
                Some("session_full") => CourtBuddyError::SessionFull {
                    session_id: body.session_id.unwrap_or_default(),
                    slots_total: body.slots_total.unwrap_or_default(),
                },
                _ => CourtBuddyError::SlotConflict {
                    field_id: body.field_id.unwrap_or_default(),
                    date: body.date.unwrap_or_default(),
                    detail: message,
                },
            },
            StatusCode::GONE => CourtBuddyError::BookingExpired {
                invoice: body.invoice.unwrap_or_default(),
            },
            _ => CourtBuddyError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    async fn parse_json<T: DeserializeOwned>(
        endpoint: &str,
        response: Response,
        not_found: CourtBuddyError,
    ) -> Result<T> {
        if response.status().is_success() {
            debug!(endpoint = endpoint, "Remote API call succeeded");
            Ok(response.json::<T>().await?)
        } else {
            Err(Self::map_error(endpoint, response, not_found).await)
        }
    }

    async fn expect_no_content(
        endpoint: &str,
        response: Response,
        not_found: CourtBuddyError,
    ) -> Result<()> {
        if response.status().is_success() {
            debug!(endpoint = endpoint, "Remote API call succeeded");
            Ok(())
        } else {
            Err(Self::map_error(endpoint, response, not_found).await)
        }
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn get_field(&self, field_id: i64) -> Result<Field> {
        let endpoint = self.endpoint(&format!("fields/{}", field_id));
        let response = self.request(self.client.get(&endpoint)).send().await?;
        Self::parse_json(&endpoint, response, CourtBuddyError::FieldNotFound { field_id }).await
    }

    async fn get_occupied_slots(&self, field_id: i64, date: NaiveDate) -> Result<Vec<String>> {
        let endpoint = self.endpoint(&format!("fields/{}/occupied?date={}", field_id, date));
        let response = self.request(self.client.get(&endpoint)).send().await?;
        Self::parse_json(&endpoint, response, CourtBuddyError::FieldNotFound { field_id }).await
    }

    async fn create_booking(&self, request: CreateBookingRequest) -> Result<CreatedBooking> {
        let endpoint = self.endpoint("bookings");
        let field_id = request.field_id;
        let response = self
            .request(self.client.post(&endpoint))
            .json(&request)
            .send()
            .await?;
        Self::parse_json(&endpoint, response, CourtBuddyError::FieldNotFound { field_id }).await
    }

    async fn get_booking(&self, invoice: &str) -> Result<BookingDetail> {
        let endpoint = self.endpoint(&format!("bookings/{}", invoice));
        let response = self.request(self.client.get(&endpoint)).send().await?;
        Self::parse_json(
            &endpoint,
            response,
            CourtBuddyError::BookingNotFound { invoice: invoice.to_string() },
        )
        .await
    }

    async fn cancel_booking(&self, invoice: &str) -> Result<Booking> {
        let endpoint = self.endpoint(&format!("bookings/{}/cancel", invoice));
        let response = self.request(self.client.post(&endpoint)).send().await?;
        Self::parse_json(
            &endpoint,
            response,
            CourtBuddyError::BookingNotFound { invoice: invoice.to_string() },
        )
        .await
    }

    async fn create_mabar_session(
        &self,
        funding: CreateBookingRequest,
        session: CreateMabarSessionRequest,
    ) -> Result<CreatedSession> {
        let endpoint = self.endpoint("mabar/sessions");
        let field_id = funding.field_id;
        let payload = serde_json::json!({
            "funding_booking": funding,
            "session": session,
        });
        let response = self
            .request(self.client.post(&endpoint))
            .json(&payload)
            .send()
            .await?;
        Self::parse_json(&endpoint, response, CourtBuddyError::FieldNotFound { field_id }).await
    }

    async fn get_session(&self, session_id: i64) -> Result<MabarSession> {
        let endpoint = self.endpoint(&format!("mabar/sessions/{}", session_id));
        let response = self.request(self.client.get(&endpoint)).send().await?;
        Self::parse_json(&endpoint, response, CourtBuddyError::SessionNotFound { session_id }).await
    }

    async fn update_session(
        &self,
        session_id: i64,
        request: UpdateMabarSessionRequest,
    ) -> Result<MabarSession> {
        let endpoint = self.endpoint(&format!("mabar/sessions/{}", session_id));
        let response = self
            .request(self.client.patch(&endpoint))
            .json(&request)
            .send()
            .await?;
        Self::parse_json(&endpoint, response, CourtBuddyError::SessionNotFound { session_id }).await
    }

    async fn delete_session(&self, session_id: i64) -> Result<()> {
        let endpoint = self.endpoint(&format!("mabar/sessions/{}", session_id));
        let response = self.request(self.client.delete(&endpoint)).send().await?;
        Self::expect_no_content(&endpoint, response, CourtBuddyError::SessionNotFound { session_id })
            .await
    }

    async fn get_participant(&self, participant_id: i64) -> Result<Participant> {
        let endpoint = self.endpoint(&format!("mabar/participants/{}", participant_id));
        let response = self.request(self.client.get(&endpoint)).send().await?;
        Self::parse_json(
            &endpoint,
            response,
            CourtBuddyError::ParticipantNotFound { participant_id },
        )
        .await
    }

    async fn join_session(
        &self,
        session_id: i64,
        request: JoinSessionRequest,
    ) -> Result<Participant> {
        let endpoint = self.endpoint(&format!("mabar/sessions/{}/participants", session_id));
        let response = self
            .request(self.client.post(&endpoint))
            .json(&request)
            .send()
            .await?;
        Self::parse_json(&endpoint, response, CourtBuddyError::SessionNotFound { session_id }).await
    }

    async fn upload_payment_proof(
        &self,
        participant_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Participant> {
        let endpoint = self.endpoint(&format!("mabar/participants/{}/proof", participant_id));
        let part = reqwest::multipart::Part::bytes(bytes).file_name(sanitize_filename(file_name));
        let form = reqwest::multipart::Form::new().part("proof", part);
        let response = self
            .request(self.client.post(&endpoint))
            .multipart(form)
            .send()
            .await?;
        Self::parse_json(
            &endpoint,
            response,
            CourtBuddyError::ParticipantNotFound { participant_id },
        )
        .await
    }

    async fn approve_participant(&self, participant_id: i64) -> Result<Participant> {
        let endpoint = self.endpoint(&format!("mabar/participants/{}/approve", participant_id));
        let response = self.request(self.client.post(&endpoint)).send().await?;
        Self::parse_json(
            &endpoint,
            response,
            CourtBuddyError::ParticipantNotFound { participant_id },
        )
        .await
    }

    async fn reject_participant(&self, participant_id: i64) -> Result<Participant> {
        let endpoint = self.endpoint(&format!("mabar/participants/{}/reject", participant_id));
        let response = self.request(self.client.post(&endpoint)).send().await?;
        Self::parse_json(
            &endpoint,
            response,
            CourtBuddyError::ParticipantNotFound { participant_id },
        )
        .await
    }

    async fn cancel_participation(&self, participant_id: i64) -> Result<Participant> {
        let endpoint = self.endpoint(&format!("mabar/participants/{}/cancel", participant_id));
        let response = self.request(self.client.post(&endpoint)).send().await?;
        Self::parse_json(
            &endpoint,
            response,
            CourtBuddyError::ParticipantNotFound { participant_id },
        )
        .await
    }

    async fn delete_participant(&self, participant_id: i64) -> Result<()> {
        let endpoint = self.endpoint(&format!("mabar/participants/{}", participant_id));
        let response = self.request(self.client.delete(&endpoint)).send().await?;
        Self::expect_no_content(
            &endpoint,
            response,
            CourtBuddyError::ParticipantNotFound { participant_id },
        )
        .await
    }

    async fn add_guest_participant(&self, session_id: i64, name: &str) -> Result<Participant> {
        let endpoint = self.endpoint(&format!("mabar/sessions/{}/guests", session_id));
        let payload = serde_json::json!({ "name": name });
        let response = self
            .request(self.client.post(&endpoint))
            .json(&payload)
            .send()
            .await?;
        Self::parse_json(&endpoint, response, CourtBuddyError::SessionNotFound { session_id }).await
    }
}
