//! Search lifecycle scenarios
//!
//! Synchronous scenarios drive `QueryController` directly; the ordering
//! scenarios run real worker threads against delayed fake stores.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};

use measurements_dashboard::query::worker::{drain_completions, spawn_search};
use measurements_dashboard::query::{Completion, FilterInput, Measurement, Phase, QueryController};
use measurements_dashboard::store::{FakeStore, FetchError, MeasurementStore, Store};
use measurements_dashboard::QueryDescriptor;

fn record(id: i64, patient: &str) -> Measurement {
    Measurement {
        id,
        patient_id: patient.to_string(),
        systolic: 120,
        diastolic: 80,
        heart_rate: 72,
        measured_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
        received_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 3).unwrap(),
    }
}

fn patient(id: &str) -> QueryDescriptor {
    FilterInput::new(id, None, None).to_descriptor_in(&Utc)
}

#[test]
fn test_successful_search_shows_results() {
    let store = FakeStore::with_measurements(&[record(1, "patient-1"), record(2, "patient-1")]);
    let mut controller = QueryController::new();

    let state = controller.search(&store, patient("patient-1"));

    assert_eq!(state.phase(), Phase::Success);
    assert_eq!(state.results().len(), 2);
    assert_eq!(state.error(), None);
    assert_eq!(store.request_count(), 1);
    assert_eq!(
        store.received()[0].patient_identifier(),
        Some("patient-1")
    );
}

#[test]
fn test_empty_result_is_success() {
    let store = FakeStore::new("[]");
    let mut controller = QueryController::new();

    let state = controller.search(&store, QueryDescriptor::default());

    assert_eq!(state.phase(), Phase::Success);
    assert!(state.results().is_empty());
}

#[test]
fn test_error_keeps_previous_results() {
    let ok = FakeStore::with_measurements(&[record(1, "p")]);
    let failing = FakeStore::with_status(500);
    let mut controller = QueryController::new();

    controller.search(&ok, patient("p"));
    let state = controller.search(&failing, patient("p"));

    assert_eq!(state.phase(), Phase::Error);
    assert_eq!(state.results().len(), 1);
    assert_eq!(
        state.error_description().as_deref(),
        Some("Request failed with status 500")
    );
}

#[test]
fn test_network_error_description() {
    let store = FakeStore::with_network_error("connection refused");
    let mut controller = QueryController::new();

    let state = controller.search(&store, QueryDescriptor::default());

    assert_eq!(
        state.error_description().as_deref(),
        Some("Network error: connection refused")
    );
}

#[test]
fn test_next_submit_clears_error() {
    let mut controller = QueryController::new();
    controller.search(&FakeStore::with_status(503), QueryDescriptor::default());

    controller.submit(QueryDescriptor::default());

    assert_eq!(controller.state().phase(), Phase::Loading);
    assert_eq!(controller.state().error_description(), None);
}

#[test]
fn test_duplicate_completion_is_ignored() {
    let mut controller = QueryController::new();
    let request = controller.submit(QueryDescriptor::default());

    let first = controller.complete(request.seq(), Ok(vec![record(1, "p")]));
    let second = controller.complete(request.seq(), Err(FetchError::Http { status: 500 }));

    assert_eq!(first, Completion::Applied(Phase::Success));
    assert_eq!(second, Completion::Stale { seq: request.seq() });
    assert_eq!(controller.state().phase(), Phase::Success);
}

#[test]
fn test_stale_completion_keeps_loading() {
    let mut controller = QueryController::new();
    let older = controller.submit(patient("a"));
    let newer = controller.submit(patient("b"));

    let outcome = controller.complete(older.seq(), Ok(vec![record(1, "a")]));

    assert_eq!(outcome, Completion::Stale { seq: older.seq() });
    assert_eq!(controller.state().phase(), Phase::Loading);
    assert_eq!(controller.in_flight(), Some(newer.seq()));
}

/// Pump completions until the controller leaves `Loading` or the deadline passes
fn wait_settled(
    controller: &mut QueryController,
    rx: &mpsc::Receiver<measurements_dashboard::query::SearchEvent>,
) -> Vec<Completion> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut seen = Vec::new();
    while controller.state().is_loading() && Instant::now() < deadline {
        seen.extend(drain_completions(controller, rx));
        std::thread::sleep(Duration::from_millis(5));
    }
    seen
}

#[test]
fn test_slow_older_search_never_overwrites_newer() {
    let slow: Arc<Store> = Arc::new(Store::Fake(
        FakeStore::with_measurements(&[record(1, "a")]).delayed(Duration::from_millis(300)),
    ));
    let fast: Arc<Store> = Arc::new(Store::Fake(FakeStore::with_measurements(&[
        record(2, "b"),
        record(3, "b"),
    ])));

    let (tx, rx) = mpsc::channel();
    let mut controller = QueryController::new();

    let slow_handle = spawn_search(slow, controller.submit(patient("a")), tx.clone());
    let fast_handle = spawn_search(fast, controller.submit(patient("b")), tx);

    let seen = wait_settled(&mut controller, &rx);
    assert_eq!(seen, vec![Completion::Applied(Phase::Success)]);
    assert_eq!(controller.state().results()[0].patient_id, "b");

    // The older outcome arrives later and is dropped.
    slow_handle.join().unwrap();
    fast_handle.join().unwrap();
    let late = drain_completions(&mut controller, &rx);
    assert_eq!(late.len(), 1);
    assert!(matches!(late[0], Completion::Stale { .. }));
    assert_eq!(controller.state().phase(), Phase::Success);
    assert_eq!(controller.state().results().len(), 2);
}

#[test]
fn test_fast_older_failure_does_not_end_newer_loading() {
    let failing: Arc<Store> = Arc::new(Store::Fake(FakeStore::with_status(500)));
    let slow_ok: Arc<Store> = Arc::new(Store::Fake(
        FakeStore::new("[]").delayed(Duration::from_millis(100)),
    ));

    let (tx, rx) = mpsc::channel();
    let mut controller = QueryController::new();

    let first = controller.submit(QueryDescriptor::default());
    let second = controller.submit(QueryDescriptor::default());
    spawn_search(failing, first, tx.clone()).join().unwrap();

    let early = drain_completions(&mut controller, &rx);
    assert!(matches!(early[..], [Completion::Stale { .. }]));
    assert_eq!(controller.state().phase(), Phase::Loading);

    spawn_search(slow_ok, second, tx);
    wait_settled(&mut controller, &rx);
    assert_eq!(controller.state().phase(), Phase::Success);
    assert_eq!(controller.state().error(), None);
}

#[test]
fn test_each_search_issues_one_request() {
    let store = FakeStore::new("[]");
    let mut controller = QueryController::new();
    for _ in 0..3 {
        let request = controller.submit(QueryDescriptor::default());
        let outcome = request.execute(&store);
        controller.complete(request.seq(), outcome);
    }
    assert_eq!(store.request_count(), 3);
    assert_eq!(store.fetch(&QueryDescriptor::default()).unwrap(), Vec::new());
}

#[test]
fn test_repeated_search_reaches_same_state() {
    let store = FakeStore::with_measurements(&[record(1, "patient-1")]);
    let descriptor = FilterInput::new(" patient-1 ", None, None).to_descriptor_in(&Utc);
    let mut controller = QueryController::new();

    let first = controller.search(&store, descriptor.clone()).clone();
    let second = controller.search(&store, descriptor).clone();

    assert_eq!(first.phase(), Phase::Success);
    assert_eq!(first, second);
    assert_eq!(store.received()[0], store.received()[1]);
}
