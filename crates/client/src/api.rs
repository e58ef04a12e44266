//! The booking service contract.
//!
//! [`BookingApi`] is the seam between application logic and transport:
//! the app talks to the trait, the binary hands it an [`HttpApi`], and
//! tests hand it an in-memory fake.
//!
//! [`HttpApi`]: crate::http::HttpApi

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use courtbook_core::{Application, Court, CreditSummary, Id, ReservationRecord, Student, TimeSlot};

use crate::error::ApiError;

/// Payload for creating a student account.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub student_id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

/// Successful login: the bearer token plus the identity snapshot the
/// session store persists.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginOutcome {
    pub token: String,
    pub student: Student,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterOutcome {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub student_id: Option<Id>,
}

/// Acknowledgement for a filed application. The new slot and
/// application statuses are not included; callers re-fetch instead of
/// guessing.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyOutcome {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub application_id: Option<Id>,
    #[serde(default)]
    pub priority_weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelOutcome {
    #[serde(default)]
    pub message: Option<String>,
}

/// Reservation history plus the aggregate stats block the service
/// attaches when it has one.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsPage {
    #[serde(default)]
    pub records: Vec<ReservationRecord>,
    #[serde(default)]
    pub stats: Option<CreditSummary>,
}

/// Client-side view of the booking service.
///
/// Futures are `!Send`; the app runs on a single-threaded runtime and
/// fakes keep their state in `RefCell`s.
#[async_trait::async_trait(?Send)]
pub trait BookingApi {
    /// Installs (or clears) the bearer credential attached to
    /// subsequent authenticated calls.
    fn set_credential(&self, token: Option<String>);

    fn credential(&self) -> Option<String>;

    async fn login(&self, student_id: &str, password: &str) -> Result<LoginOutcome, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ApiError>;

    async fn courts(&self) -> Result<Vec<Court>, ApiError>;

    /// Slots for one date, optionally narrowed to a single court. The
    /// returned list is authoritative for that date.
    async fn time_slots(
        &self,
        date: NaiveDate,
        court_id: Option<Id>,
    ) -> Result<Vec<TimeSlot>, ApiError>;

    async fn apply(&self, timeslot_id: Id) -> Result<ApplyOutcome, ApiError>;

    /// Withdraws the caller's pending application for the given slot.
    /// The service keys cancellation by slot, not by application id.
    async fn cancel(&self, timeslot_id: Id) -> Result<CancelOutcome, ApiError>;

    async fn my_applications(&self) -> Result<Vec<Application>, ApiError>;

    async fn my_records(&self) -> Result<RecordsPage, ApiError>;

    async fn credit(&self) -> Result<CreditSummary, ApiError>;
}
