//! Owned application state.
//!
//! Server-held collections are only ever replaced wholesale with the
//! result of a fresh fetch, never merged or edited in place. Render
//! structures (the grid) are re-derived from this state on demand.

use chrono::NaiveDate;

use courtbook_core::{
    build_grid, Application, BookingWindow, Court, CoreError, CreditSummary, Id,
    ReservationRecord, Selection, SelectedSlot, SlotGrid, Student, TimeSlot,
};

/// The data-dependent screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Courts,
    Booking,
    Status,
    Profile,
}

#[derive(Debug)]
pub struct BookingState {
    window: BookingWindow,
    view: View,
    selected_date: NaiveDate,
    court_filter: Option<Id>,
    student: Option<Student>,
    courts: Vec<Court>,
    slots: Vec<TimeSlot>,
    applications: Vec<Application>,
    records: Vec<ReservationRecord>,
    record_stats: Option<CreditSummary>,
    credit: Option<CreditSummary>,
    selection: Selection,
}

impl BookingState {
    /// Fresh state anchored on `window`; the selected date starts at
    /// the first bookable day.
    pub fn new(window: BookingWindow) -> Self {
        Self {
            window,
            view: View::Courts,
            selected_date: window.first(),
            court_filter: None,
            student: None,
            courts: Vec::new(),
            slots: Vec::new(),
            applications: Vec::new(),
            records: Vec::new(),
            record_stats: None,
            credit: None,
            selection: Selection::default(),
        }
    }

    pub fn window(&self) -> BookingWindow {
        self.window
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Moves the booking view to `date`. Rejects dates outside the
    /// window before anything is fetched. Changing the date discards
    /// the selection; re-setting the current date keeps it.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<(), CoreError> {
        self.window.validate(date)?;
        if date != self.selected_date {
            tracing::debug!(%date, "booking date changed");
            self.selected_date = date;
            self.selection.clear();
        }
        Ok(())
    }

    pub fn court_filter(&self) -> Option<Id> {
        self.court_filter
    }

    /// Narrows slot fetches to one court, or back to all courts with
    /// `None`. The filter sticks across date changes and does not
    /// touch the selection.
    pub fn set_court_filter(&mut self, filter: Option<Id>) {
        tracing::debug!(?filter, "court filter changed");
        self.court_filter = filter;
    }

    // --- identity ---

    pub fn student(&self) -> Option<&Student> {
        self.student.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.student.is_some()
    }

    pub fn sign_in(&mut self, student: Student) {
        tracing::debug!(student_id = %student.student_id, "signed in");
        self.student = Some(student);
    }

    /// Drops the identity and every per-user collection. Courts and
    /// slots are public data and survive.
    pub fn sign_out(&mut self) {
        self.student = None;
        self.applications.clear();
        self.records.clear();
        self.record_stats = None;
        self.credit = None;
        self.selection.clear();
    }

    // --- server-held collections, replaced wholesale ---

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn replace_courts(&mut self, courts: Vec<Court>) {
        tracing::debug!(count = courts.len(), "courts replaced");
        self.courts = courts;
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn replace_slots(&mut self, slots: Vec<TimeSlot>) {
        tracing::debug!(count = slots.len(), "slot list replaced");
        self.slots = slots;
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn replace_applications(&mut self, applications: Vec<Application>) {
        tracing::debug!(count = applications.len(), "application list replaced");
        self.applications = applications;
    }

    pub fn records(&self) -> &[ReservationRecord] {
        &self.records
    }

    pub fn record_stats(&self) -> Option<&CreditSummary> {
        self.record_stats.as_ref()
    }

    pub fn replace_records(
        &mut self,
        records: Vec<ReservationRecord>,
        stats: Option<CreditSummary>,
    ) {
        tracing::debug!(count = records.len(), "record list replaced");
        self.records = records;
        self.record_stats = stats;
    }

    pub fn credit(&self) -> Option<&CreditSummary> {
        self.credit.as_ref()
    }

    pub fn set_credit(&mut self, credit: CreditSummary) {
        self.credit = Some(credit);
    }

    // --- lookups and derived structures ---

    pub fn find_slot(&self, slot_id: Id) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.id == slot_id)
    }

    pub fn find_application(&self, application_id: Id) -> Option<&Application> {
        self.applications.iter().find(|app| app.id == application_id)
    }

    pub fn grid(&self) -> SlotGrid {
        build_grid(&self.slots, &self.courts)
    }

    // --- selection ---

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_pick(&mut self, entry: SelectedSlot) -> bool {
        self.selection.toggle(entry)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}
