//! Wire-shaped domain records returned by the booking service.
//!
//! Timestamps arrive as offset-less ISO strings; they are local to the
//! facility, so they map to `NaiveDateTime` rather than any fixed zone.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::status::{ApplicationStatus, RecordStatus, SlotStatus};
use crate::types::Id;

/// A court that can be booked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Court {
    pub id: Id,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(rename = "type", default)]
    pub court_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// One bookable interval on a specific court and date.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeSlot {
    pub id: Id,
    pub court_id: Id,
    #[serde(default)]
    pub court_name: Option<String>,
    #[serde(default)]
    pub court_location: Option<String>,
    pub date: NaiveDate,
    /// `HH:MM` or `HH:MM:SS`; kept verbatim so row keys match the wire.
    pub start_time: String,
    pub end_time: String,
    pub status: SlotStatus,
    #[serde(default)]
    pub applications_count: Option<i64>,
    /// Not every deployment prices slots; absent means free.
    #[serde(default)]
    pub price: f64,
}

/// A student's request for one slot, queued until the service decides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Application {
    pub id: Id,
    pub timeslot_id: Id,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub court_id: Option<Id>,
    #[serde(default)]
    pub court_name: Option<String>,
    #[serde(default)]
    pub court_location: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub applied_at: NaiveDateTime,
    #[serde(default)]
    pub processed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub priority_weight: Option<f64>,
    #[serde(default)]
    pub queue_position: Option<i64>,
}

/// A decided booking: an application that was approved, and whatever
/// happened to it afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReservationRecord {
    pub id: Id,
    pub timeslot_id: Id,
    #[serde(default)]
    pub court_id: Option<Id>,
    #[serde(default)]
    pub court_name: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: RecordStatus,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub cancelled_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// The signed-in student. Persisted locally alongside the token, so
/// this one also serializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Id,
    pub student_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub credit_score: Option<i64>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Credit standing plus the aggregate counters derived from it. The
/// service guarantees `credit_score`; the rest depends on deployment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreditSummary {
    pub credit_score: i64,
    #[serde(default)]
    pub total_applications: Option<i64>,
    #[serde(default)]
    pub successful_applications: Option<i64>,
    #[serde(default)]
    pub no_show_count: Option<i64>,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub priority_weight: Option<f64>,
}
