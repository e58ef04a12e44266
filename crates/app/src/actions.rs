//! Application actions: the only code that talks to the service.
//!
//! Each action is an async function over `&dyn BookingApi` and the
//! `RefCell`-owned [`BookingState`]. State is borrowed only between
//! suspension points, so the single-threaded runtime can interleave
//! actions at awaits without observing a half-applied one. After every
//! successful mutation the affected collections are re-fetched and
//! replaced wholesale; nothing here edits server data locally. When a
//! call fails, state keeps its last successfully fetched values.

use std::cell::RefCell;

use chrono::NaiveDate;

use courtbook_client::{BookingApi, RegisterRequest};
use courtbook_core::{click_slot, time_range_key, ClickOutcome, Id, SelectedSlot, TimeSlot};

use crate::error::AppError;
use crate::notice::Notice;
use crate::session::{SessionData, SessionStore};
use crate::state::{BookingState, View};

/// Confirmation data for an application about to be filed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyPrompt {
    pub slot_id: Id,
    pub court_name: String,
    pub date: NaiveDate,
    pub time_range: String,
    pub price: f64,
}

fn ensure_logged_in(state: &RefCell<BookingState>) -> Result<(), AppError> {
    if state.borrow().is_logged_in() {
        Ok(())
    } else {
        Err(AppError::NotLoggedIn)
    }
}

fn court_name_for(state: &BookingState, slot: &TimeSlot) -> String {
    if let Some(name) = &slot.court_name {
        return name.clone();
    }
    state
        .courts()
        .iter()
        .find(|court| court.id == slot.court_id)
        .map(|court| court.name.clone())
        .unwrap_or_else(|| format!("Court {}", slot.court_id))
}

// --- session ---

/// Rehydrates a persisted session, if a complete one exists.
pub fn restore_session(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
    store: &SessionStore,
) -> Option<Notice> {
    let data = store.load()?;
    api.set_credential(Some(data.token));
    let name = data.student.name.clone();
    state.borrow_mut().sign_in(data.student);
    Some(Notice::info(format!("Resumed session for {name}")))
}

pub async fn login(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
    store: &SessionStore,
    student_id: &str,
    password: &str,
) -> Result<Notice, AppError> {
    let outcome = api.login(student_id, password).await?;
    api.set_credential(Some(outcome.token.clone()));
    store.save(&SessionData {
        token: outcome.token,
        student: outcome.student.clone(),
    })?;
    let name = outcome.student.name.clone();
    state.borrow_mut().sign_in(outcome.student);
    tracing::info!(student_id, "signed in");
    Ok(Notice::success(format!("Signed in as {name}")))
}

/// Signs out locally: credential, session file and per-user state all
/// go together. The service keeps no session to tear down.
pub fn logout(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
    store: &SessionStore,
) -> Result<Notice, AppError> {
    api.set_credential(None);
    store.clear()?;
    state.borrow_mut().sign_out();
    tracing::info!("signed out");
    Ok(Notice::success("Signed out"))
}

/// Tears the session down after the service rejected the credential.
/// Clearing is best effort; the notice asks the user to sign in again.
pub fn drop_expired_session(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
    store: &SessionStore,
) -> Notice {
    api.set_credential(None);
    let _ = store.clear();
    state.borrow_mut().sign_out();
    Notice::warning("Session expired, please sign in again")
}

pub async fn register(
    api: &dyn BookingApi,
    request: &RegisterRequest,
) -> Result<Notice, AppError> {
    let outcome = api.register(request).await?;
    tracing::info!(student_id = ?outcome.student_id, "registration submitted");
    Ok(Notice::success(outcome.message.unwrap_or_else(|| {
        "Registered, you can sign in now".to_string()
    })))
}

// --- view activation and refreshes ---

/// Switches to `view` and re-fetches whatever it depends on.
pub async fn activate_view(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
    view: View,
) -> Result<(), AppError> {
    state.borrow_mut().set_view(view);
    match view {
        View::Courts => refresh_courts(api, state).await,
        View::Booking => {
            if state.borrow().courts().is_empty() {
                refresh_courts(api, state).await?;
            }
            refresh_slots(api, state).await
        }
        View::Status => refresh_status(api, state).await,
        View::Profile => refresh_profile(api, state).await,
    }
}

pub async fn refresh_courts(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
) -> Result<(), AppError> {
    let courts = api.courts().await?;
    state.borrow_mut().replace_courts(courts);
    Ok(())
}

/// Re-fetches the slot list for the currently selected date and court
/// filter. The response replaces the whole list once it arrives, so of
/// several overlapping refreshes the one completing last determines
/// the state.
pub async fn refresh_slots(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
) -> Result<(), AppError> {
    let (date, court) = {
        let state = state.borrow();
        (state.selected_date(), state.court_filter())
    };
    let slots = api.time_slots(date, court).await?;
    state.borrow_mut().replace_slots(slots);
    Ok(())
}

/// Loads the status view: applications and reservation records,
/// fetched concurrently.
pub async fn refresh_status(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
) -> Result<(), AppError> {
    ensure_logged_in(state)?;
    let (applications, page) = tokio::try_join!(api.my_applications(), api.my_records())?;
    state.borrow_mut().replace_applications(applications);
    state.borrow_mut().replace_records(page.records, page.stats);
    Ok(())
}

/// Loads the profile view: credit summary and reservation records,
/// fetched concurrently.
pub async fn refresh_profile(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
) -> Result<(), AppError> {
    ensure_logged_in(state)?;
    let (credit, page) = tokio::try_join!(api.credit(), api.my_records())?;
    state.borrow_mut().set_credit(credit);
    state.borrow_mut().replace_records(page.records, page.stats);
    Ok(())
}

// --- booking ---

/// Moves the booking view to another date. Validation happens before
/// any fetch; an out-of-window date produces no traffic at all.
pub async fn change_date(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
    date: NaiveDate,
) -> Result<Notice, AppError> {
    state.borrow_mut().set_date(date)?;
    if state.borrow().view() == View::Booking {
        refresh_slots(api, state).await?;
    }
    Ok(Notice::info(format!("Showing slots for {date}")))
}

/// Narrows slot fetches to one court, or back to all courts with
/// `None`, re-fetching right away when the booking view is active.
/// The selection is kept; picks on other courts stay staged.
pub async fn change_court_filter(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
    filter: Option<Id>,
) -> Result<Notice, AppError> {
    state.borrow_mut().set_court_filter(filter);
    if state.borrow().view() == View::Booking {
        refresh_slots(api, state).await?;
    }
    Ok(Notice::info(match filter {
        Some(court_id) => format!("Showing slots for court {court_id}"),
        None => "Showing all courts".to_string(),
    }))
}

/// Resolves a click on a grid cell against the authoritative slot list.
pub fn resolve_click(state: &RefCell<BookingState>, slot_id: Id) -> ClickOutcome {
    let state = state.borrow();
    click_slot(state.slots(), slot_id)
}

/// Toggles a slot in or out of the selection summary.
pub fn toggle_pick(state: &RefCell<BookingState>, slot_id: Id) -> Result<Notice, AppError> {
    let entry = {
        let state = state.borrow();
        let slot = state
            .find_slot(slot_id)
            .ok_or(AppError::UnknownSlot { slot_id })?;
        if !slot.status.is_bookable() {
            return Err(AppError::SlotNotBookable {
                label: slot.status.label().to_string(),
            });
        }
        SelectedSlot {
            time_range: time_range_key(&slot.start_time, &slot.end_time),
            court_id: slot.court_id,
            court_name: court_name_for(&state, slot),
            price: slot.price,
        }
    };

    let mut state = state.borrow_mut();
    let added = state.toggle_pick(entry.clone());
    let total = state.selection().total();
    let text = if added {
        format!(
            "Selected {} {} (total {:.2})",
            entry.court_name, entry.time_range, total
        )
    } else {
        format!(
            "Removed {} {} (total {:.2})",
            entry.court_name, entry.time_range, total
        )
    };
    Ok(Notice::info(text))
}

pub fn clear_selection(state: &RefCell<BookingState>) -> Notice {
    state.borrow_mut().clear_selection();
    Notice::info("Selection cleared")
}

/// Local preconditions for an application, checked before the user is
/// asked to confirm. No side effects.
pub fn prepare_apply(state: &RefCell<BookingState>, slot_id: Id) -> Result<ApplyPrompt, AppError> {
    let state = state.borrow();
    if !state.is_logged_in() {
        return Err(AppError::NotLoggedIn);
    }
    let slot = state
        .find_slot(slot_id)
        .ok_or(AppError::UnknownSlot { slot_id })?;
    if !slot.status.is_bookable() {
        return Err(AppError::SlotNotBookable {
            label: slot.status.label().to_string(),
        });
    }
    Ok(ApplyPrompt {
        slot_id,
        court_name: court_name_for(&state, slot),
        date: slot.date,
        time_range: time_range_key(&slot.start_time, &slot.end_time),
        price: slot.price,
    })
}

/// Files the application and reconciles. The new slot and application
/// statuses come from the re-fetch, never from guessing.
pub async fn submit_application(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
    slot_id: Id,
) -> Result<Notice, AppError> {
    ensure_logged_in(state)?;

    let outcome = api.apply(slot_id).await?;
    tracing::info!(slot_id, application_id = ?outcome.application_id, "application filed");

    state.borrow_mut().clear_selection();
    refresh_slots(api, state).await?;
    if state.borrow().view() == View::Status {
        let applications = api.my_applications().await?;
        state.borrow_mut().replace_applications(applications);
    }

    Ok(Notice::success(outcome.message.unwrap_or_else(|| {
        "Application submitted".to_string()
    })))
}

/// Withdraws a pending application. The status check runs locally
/// first; anything not pending is rejected without a network call.
pub async fn cancel_application(
    api: &dyn BookingApi,
    state: &RefCell<BookingState>,
    application_id: Id,
) -> Result<Notice, AppError> {
    ensure_logged_in(state)?;

    let timeslot_id = {
        let state = state.borrow();
        let application = state
            .find_application(application_id)
            .ok_or(AppError::UnknownApplication { application_id })?;
        if !application.status.is_cancellable() {
            return Err(AppError::NotCancellable {
                label: application.status.label().to_string(),
            });
        }
        application.timeslot_id
    };

    let outcome = api.cancel(timeslot_id).await?;
    tracing::info!(application_id, timeslot_id, "application cancelled");

    let applications = api.my_applications().await?;
    state.borrow_mut().replace_applications(applications);
    if state.borrow().view() == View::Booking {
        refresh_slots(api, state).await?;
    }

    Ok(Notice::success(outcome.message.unwrap_or_else(|| {
        "Application cancelled".to_string()
    })))
}
