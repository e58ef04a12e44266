//! Reconciliation behaviour: concurrent view loads, wholesale
//! replacement, and overlapping slot refreshes resolving out of order.

mod common;

use assert_matches::assert_matches;
use tokio::sync::oneshot;

use common::*;
use courtbook_app::{actions, AppError, View};
use courtbook_client::ApplyOutcome;

#[tokio::test]
async fn status_view_loads_applications_and_records_together() {
    let api = FakeApi::new();
    api.applications
        .borrow_mut()
        .push(application(31, 12, "pending"));
    api.records.borrow_mut().push(record(41, 12, "confirmed"));
    *api.stats.borrow_mut() = Some(summary(95));
    let state = signed_in_state();

    actions::activate_view(&api, &state, View::Status).await.unwrap();

    let state = state.borrow();
    assert_eq!(state.applications().len(), 1);
    assert_eq!(state.records().len(), 1);
    assert_eq!(state.record_stats().map(|s| s.credit_score), Some(95));
    assert_eq!(
        *api.calls.borrow(),
        vec![Call::MyApplications, Call::MyRecords]
    );
}

#[tokio::test]
async fn profile_view_loads_credit_and_records_together() {
    let api = FakeApi::new();
    *api.credit.borrow_mut() = Some(summary(88));
    api.records.borrow_mut().push(record(41, 12, "completed"));
    let state = signed_in_state();

    actions::activate_view(&api, &state, View::Profile).await.unwrap();

    let state = state.borrow();
    assert_eq!(state.credit().map(|c| c.credit_score), Some(88));
    assert_eq!(state.records().len(), 1);
    assert_eq!(*api.calls.borrow(), vec![Call::Credit, Call::MyRecords]);
}

#[tokio::test]
async fn per_user_views_require_a_session() {
    let api = FakeApi::new();
    let state = new_state();

    for view in [View::Status, View::Profile] {
        let err = actions::activate_view(&api, &state, view).await.unwrap_err();
        assert_matches!(err, AppError::NotLoggedIn);
    }
    assert!(api.calls.borrow().is_empty());
}

#[tokio::test]
async fn reloads_replace_collections_wholesale() {
    let api = FakeApi::new();
    api.applications
        .borrow_mut()
        .push(application(31, 12, "pending"));
    let state = signed_in_state();
    // Locally held entries the service no longer reports.
    state.borrow_mut().replace_applications(vec![
        application(90, 7, "approved"),
        application(91, 8, "rejected"),
    ]);

    actions::activate_view(&api, &state, View::Status).await.unwrap();

    let state = state.borrow();
    let ids: Vec<_> = state.applications().iter().map(|app| app.id).collect();
    assert_eq!(ids, vec![31]);
}

/// Two applications filed back to back, each followed by a slot
/// re-fetch. The responses resolve in reverse order, so the fetch that
/// completes last is the one that determines the final slot list, even
/// though it was issued first.
#[tokio::test]
async fn the_last_completed_slot_refresh_wins() {
    let api = FakeApi::new();
    let state = signed_in_state();
    set_view(&state, View::Status);
    state.borrow_mut().replace_slots(vec![
        slot(12, 1, "08:00", "09:00", "available"),
        slot(13, 2, "08:00", "09:00", "available"),
    ]);
    api.applications.borrow_mut().extend([
        application(31, 12, "pending"),
        application(32, 13, "pending"),
    ]);
    for id in [31, 32] {
        api.apply_results.borrow_mut().push_back(Ok(ApplyOutcome {
            message: None,
            application_id: Some(id),
            priority_weight: None,
        }));
    }

    let (first_gate, first_rx) = oneshot::channel();
    let (second_gate, second_rx) = oneshot::channel();
    api.slot_responses.borrow_mut().push_back(SlotReply::Wait(first_rx));
    api.slot_responses.borrow_mut().push_back(SlotReply::Wait(second_rx));

    let first_list = vec![
        slot(12, 1, "08:00", "09:00", "has_applications"),
        slot(13, 2, "08:00", "09:00", "available"),
    ];
    let second_list = vec![
        slot(12, 1, "08:00", "09:00", "has_applications"),
        slot(13, 2, "08:00", "09:00", "has_applications"),
    ];

    let release = async {
        second_gate.send(second_list.clone()).unwrap();
        // Give the released fetch a full scheduler pass to land before
        // the other gate opens.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        first_gate.send(first_list.clone()).unwrap();
    };

    let (first_result, second_result, ()) = tokio::join!(
        actions::submit_application(&api, &state, 12),
        actions::submit_application(&api, &state, 13),
        release,
    );
    first_result.unwrap();
    second_result.unwrap();

    // The first submission's fetch resolved last, so its (older) answer
    // stands until the next refresh.
    assert_eq!(state.borrow().slots(), first_list.as_slice());

    // Both reloads replaced the application list wholesale; each entry
    // appears exactly once.
    let state = state.borrow();
    let ids: Vec<_> = state.applications().iter().map(|app| app.id).collect();
    assert_eq!(ids, vec![31, 32]);
}
