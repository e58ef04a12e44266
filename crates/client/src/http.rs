//! [`reqwest`] implementation of the booking service API.

use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use serde::Deserialize;

use courtbook_core::{Application, Court, CreditSummary, Id, TimeSlot};

use crate::api::{
    ApplyOutcome, BookingApi, CancelOutcome, LoginOutcome, RecordsPage, RegisterOutcome,
    RegisterRequest,
};
use crate::error::ApiError;

/// HTTP client for one booking service instance.
///
/// The bearer credential lives behind interior mutability so the same
/// client can be shared before and after login.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct CourtsEnvelope {
    #[serde(default)]
    courts: Vec<Court>,
}

#[derive(Debug, Deserialize)]
struct TimeSlotsEnvelope {
    #[serde(default)]
    timeslots: Vec<TimeSlot>,
}

#[derive(Debug, Deserialize)]
struct ApplicationsEnvelope {
    #[serde(default)]
    applications: Vec<Application>,
}

impl HttpApi {
    /// Creates a client for the service at `base_url`, e.g.
    /// `http://localhost:5000`. Trailing slashes are dropped so paths
    /// can be joined verbatim.
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches `Authorization: Bearer <token>` when a credential is
    /// installed. Anonymous requests go out unchanged.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credential() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. On failure the
    /// body is folded into an [`ApiError::Status`], keeping the
    /// server's `message` when one is present.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status_body(status.as_u16(), &body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait(?Send)]
impl BookingApi for HttpApi {
    fn set_credential(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn credential(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn login(&self, student_id: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let body = serde_json::json!({
            "student_id": student_id,
            "password": password,
        });

        let response = self
            .client
            .post(self.url("/api/student/login"))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        let response = self
            .client
            .post(self.url("/api/student/register"))
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn courts(&self) -> Result<Vec<Court>, ApiError> {
        let response = self
            .authorize(self.client.get(self.url("/api/courts")))
            .send()
            .await?;

        let envelope: CourtsEnvelope = Self::parse_response(response).await?;
        Ok(envelope.courts)
    }

    async fn time_slots(
        &self,
        date: NaiveDate,
        court_id: Option<Id>,
    ) -> Result<Vec<TimeSlot>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![("date", date.to_string())];
        if let Some(court_id) = court_id {
            query.push(("court_id", court_id.to_string()));
        }

        let response = self
            .authorize(self.client.get(self.url("/api/timeslots/available")))
            .query(&query)
            .send()
            .await?;

        let envelope: TimeSlotsEnvelope = Self::parse_response(response).await?;
        Ok(envelope.timeslots)
    }

    async fn apply(&self, timeslot_id: Id) -> Result<ApplyOutcome, ApiError> {
        let body = serde_json::json!({ "timeslot_id": timeslot_id });

        let response = self
            .authorize(self.client.post(self.url("/api/student/apply")))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn cancel(&self, timeslot_id: Id) -> Result<CancelOutcome, ApiError> {
        let body = serde_json::json!({ "timeslot_id": timeslot_id });

        let response = self
            .authorize(self.client.post(self.url("/api/student/cancel")))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn my_applications(&self) -> Result<Vec<Application>, ApiError> {
        let response = self
            .authorize(self.client.get(self.url("/api/student/status")))
            .send()
            .await?;

        let envelope: ApplicationsEnvelope = Self::parse_response(response).await?;
        Ok(envelope.applications)
    }

    async fn my_records(&self) -> Result<RecordsPage, ApiError> {
        let response = self
            .authorize(self.client.get(self.url("/api/student/records")))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn credit(&self) -> Result<CreditSummary, ApiError> {
        let response = self
            .authorize(self.client.get(self.url("/api/student/credit")))
            .send()
            .await?;

        Self::parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn base_url_loses_trailing_slashes() {
        let api = HttpApi::new("http://localhost:5000/".to_string());
        assert_eq!(api.url("/api/courts"), "http://localhost:5000/api/courts");
    }

    #[test]
    fn credential_round_trips() {
        let api = HttpApi::new("http://localhost:5000".to_string());
        assert_eq!(api.credential(), None);
        api.set_credential(Some("tok-1".to_string()));
        assert_eq!(api.credential(), Some("tok-1".to_string()));
        api.set_credential(None);
        assert_eq!(api.credential(), None);
    }

    #[tokio::test]
    async fn invalid_base_url_fails_as_transport_error() {
        // An empty base leaves a relative URL, which reqwest rejects
        // before anything touches the network.
        let api = HttpApi::new(String::new());
        let err = api.courts().await.unwrap_err();
        assert_matches!(err, ApiError::Transport(_));
        assert_eq!(err.http_status(), None);
    }
}
