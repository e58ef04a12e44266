//! Shared test harness: an in-memory [`BookingApi`] with scripted
//! responses and a call log, plus fixture builders.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::oneshot;

use courtbook_app::{BookingState, View};
use courtbook_client::{
    ApiError, ApplyOutcome, BookingApi, CancelOutcome, LoginOutcome, RecordsPage, RegisterOutcome,
    RegisterRequest,
};
use courtbook_core::{
    Application, ApplicationStatus, BookingWindow, Court, CreditSummary, Id, RecordStatus,
    ReservationRecord, SlotStatus, Student, TimeSlot,
};

/// Every request the fake has served, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login { student_id: String },
    Register,
    Courts,
    TimeSlots { date: NaiveDate, court_id: Option<Id> },
    Apply { timeslot_id: Id },
    Cancel { timeslot_id: Id },
    MyApplications,
    MyRecords,
    Credit,
}

/// One scripted answer to a `time_slots` call. `Wait` parks the call on
/// a channel so tests can decide completion order.
pub enum SlotReply {
    Now(Vec<TimeSlot>),
    Wait(oneshot::Receiver<Vec<TimeSlot>>),
}

/// In-memory booking service. Collection fields hold what the service
/// currently "knows"; the `*_results` queues script mutation outcomes.
#[derive(Default)]
pub struct FakeApi {
    pub calls: RefCell<Vec<Call>>,
    token: RefCell<Option<String>>,
    pub login_results: RefCell<VecDeque<Result<LoginOutcome, ApiError>>>,
    pub courts: RefCell<Vec<Court>>,
    pub slots: RefCell<Vec<TimeSlot>>,
    pub slot_responses: RefCell<VecDeque<SlotReply>>,
    pub apply_results: RefCell<VecDeque<Result<ApplyOutcome, ApiError>>>,
    pub cancel_results: RefCell<VecDeque<Result<CancelOutcome, ApiError>>>,
    pub applications: RefCell<Vec<Application>>,
    pub records: RefCell<Vec<ReservationRecord>>,
    pub stats: RefCell<Option<CreditSummary>>,
    pub credit: RefCell<Option<CreditSummary>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait(?Send)]
impl BookingApi for FakeApi {
    fn set_credential(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    fn credential(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    async fn login(&self, student_id: &str, _password: &str) -> Result<LoginOutcome, ApiError> {
        self.calls.borrow_mut().push(Call::Login {
            student_id: student_id.to_string(),
        });
        self.login_results
            .borrow_mut()
            .pop_front()
            .expect("no login response scripted")
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        self.calls.borrow_mut().push(Call::Register);
        Ok(RegisterOutcome {
            message: Some("registered".to_string()),
            student_id: Some(99),
        })
    }

    async fn courts(&self) -> Result<Vec<Court>, ApiError> {
        self.calls.borrow_mut().push(Call::Courts);
        Ok(self.courts.borrow().clone())
    }

    async fn time_slots(
        &self,
        date: NaiveDate,
        court_id: Option<Id>,
    ) -> Result<Vec<TimeSlot>, ApiError> {
        self.calls.borrow_mut().push(Call::TimeSlots { date, court_id });
        let reply = self.slot_responses.borrow_mut().pop_front();
        match reply {
            None => Ok(self.slots.borrow().clone()),
            Some(SlotReply::Now(slots)) => Ok(slots),
            Some(SlotReply::Wait(receiver)) => Ok(receiver.await.expect("slot gate dropped")),
        }
    }

    async fn apply(&self, timeslot_id: Id) -> Result<ApplyOutcome, ApiError> {
        self.calls.borrow_mut().push(Call::Apply { timeslot_id });
        self.apply_results
            .borrow_mut()
            .pop_front()
            .expect("no apply response scripted")
    }

    async fn cancel(&self, timeslot_id: Id) -> Result<CancelOutcome, ApiError> {
        self.calls.borrow_mut().push(Call::Cancel { timeslot_id });
        self.cancel_results
            .borrow_mut()
            .pop_front()
            .expect("no cancel response scripted")
    }

    async fn my_applications(&self) -> Result<Vec<Application>, ApiError> {
        self.calls.borrow_mut().push(Call::MyApplications);
        Ok(self.applications.borrow().clone())
    }

    async fn my_records(&self) -> Result<RecordsPage, ApiError> {
        self.calls.borrow_mut().push(Call::MyRecords);
        Ok(RecordsPage {
            records: self.records.borrow().clone(),
            stats: self.stats.borrow().clone(),
        })
    }

    async fn credit(&self) -> Result<CreditSummary, ApiError> {
        self.calls.borrow_mut().push(Call::Credit);
        Ok(self.credit.borrow().clone().expect("no credit scripted"))
    }
}

// --- fixtures ---

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// The fixed "today" every test anchors on.
pub fn anchor() -> NaiveDate {
    date("2026-08-22")
}

/// First bookable day for the anchored window.
pub fn booking_day() -> NaiveDate {
    date("2026-08-23")
}

fn timestamp(hour: u32) -> NaiveDateTime {
    anchor().and_hms_opt(hour, 0, 0).unwrap()
}

pub fn new_state() -> RefCell<BookingState> {
    RefCell::new(BookingState::new(BookingWindow::around(anchor())))
}

pub fn signed_in_state() -> RefCell<BookingState> {
    let state = new_state();
    state.borrow_mut().sign_in(student());
    state
}

pub fn student() -> Student {
    Student {
        id: 1,
        student_id: "20260001".to_string(),
        name: "Li Wei".to_string(),
        email: "li.wei@example.edu".to_string(),
        phone: None,
        credit_score: Some(100),
        created_at: None,
    }
}

pub fn court(id: Id, name: &str) -> Court {
    Court {
        id,
        name: name.to_string(),
        location: "North hall".to_string(),
        capacity: 2,
        court_type: None,
        description: None,
        is_active: true,
    }
}

pub fn slot(id: Id, court_id: Id, start: &str, end: &str, status: &str) -> TimeSlot {
    TimeSlot {
        id,
        court_id,
        court_name: None,
        court_location: None,
        date: booking_day(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        status: SlotStatus::from_wire(status.to_string()),
        applications_count: None,
        price: 30.0,
    }
}

pub fn application(id: Id, timeslot_id: Id, status: &str) -> Application {
    Application {
        id,
        timeslot_id,
        status: ApplicationStatus::from_wire(status.to_string()),
        court_id: Some(1),
        court_name: Some("Court A".to_string()),
        court_location: None,
        date: booking_day(),
        start_time: "08:00".to_string(),
        end_time: "09:00".to_string(),
        applied_at: timestamp(10),
        processed_at: None,
        priority_weight: None,
        queue_position: None,
    }
}

pub fn record(id: Id, timeslot_id: Id, status: &str) -> ReservationRecord {
    ReservationRecord {
        id,
        timeslot_id,
        status: RecordStatus::from_wire(status.to_string()),
        court_id: Some(1),
        court_name: Some("Court A".to_string()),
        date: booking_day(),
        start_time: "08:00".to_string(),
        end_time: "09:00".to_string(),
        created_at: timestamp(11),
        cancelled_at: None,
        completed_at: None,
        rating: None,
        feedback: None,
    }
}

pub fn summary(credit_score: i64) -> CreditSummary {
    CreditSummary {
        credit_score,
        total_applications: None,
        successful_applications: None,
        no_show_count: None,
        success_rate: None,
        priority_weight: None,
    }
}

/// Convenience for tests that do not care about the view.
pub fn set_view(state: &RefCell<BookingState>, view: View) {
    state.borrow_mut().set_view(view);
}
