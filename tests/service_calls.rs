mod common;

use common::{wait_for, FakeServer, RecordingAlerter, RESTAURANT_NAME};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tablecall::dashboard::{
    Dashboard, Player, PushStatus, RequestSource, Settings, SoundPreference,
};
use tablecall::guest::GuestClient;
use tablecall::modules::request::lifecycle::{RequestStatus, RequestType};
use tempfile::TempDir;

struct Harness {
    server: FakeServer,
    alerter: RecordingAlerter,
    preference: SoundPreference,
    dashboard: Dashboard,
    _dir: TempDir,
}

async fn start(server: FakeServer, sound_enabled: bool) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let preference = SoundPreference::new(dir.path().join("sound.json"));
    preference.store(sound_enabled).await.unwrap();

    let alerter = RecordingAlerter::default();
    let dashboard = Dashboard::start(
        Arc::new(server.clone()),
        Player::new(Arc::new(alerter.clone()), false),
        preference.clone(),
        Settings::default(),
    )
    .await;

    Harness {
        server,
        alerter,
        preference,
        dashboard,
        _dir: dir,
    }
}

#[tokio::test(start_paused = true)]
async fn guest_call_is_alerted_once_and_resolved() {
    let harness = start(FakeServer::new().with_table("tok-4", 4, true), true).await;
    let mut view = harness.dashboard.view();
    wait_for(&mut view, |v| v.ready).await;

    let guest = GuestClient::new(harness.server.clone(), "tok-4");
    let table = guest.resolve().await.unwrap();
    assert_eq!(table.table_number, 4);
    assert_eq!(table.restaurant_name, RESTAURANT_NAME);

    let id = guest.submit(RequestType::Waiter).await.unwrap();
    let shown = wait_for(&mut view, |v| v.requests.iter().any(|r| r.id == id)).await;
    let row = shown.requests.iter().find(|r| r.id == id).unwrap();
    assert_eq!(row.table_number, 4);
    assert_eq!(row.request_type.label(), "Waiter requested");

    // several polls and the push event all cover the same id
    tokio::time::sleep(Duration::from_secs(7)).await;
    assert_eq!(harness.alerter.play_count(), 1);

    harness.dashboard.resolve(id.clone()).await;
    wait_for(&mut view, |v| v.requests.is_empty()).await;

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(harness.server.status_of(&id), Some(RequestStatus::Completed));
    assert!(view.borrow().requests.is_empty());
    assert_eq!(harness.alerter.play_count(), 1);

    // a second resolve of the same request succeeds without changes
    assert_eq!(harness.server.complete_request(&id).await, Ok(()));
    assert_eq!(harness.server.status_of(&id), Some(RequestStatus::Completed));

    harness.dashboard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn requests_waiting_at_startup_are_silent() {
    let server = FakeServer::new();
    server.open_request(1, RequestType::Waiter);
    server.open_request(2, RequestType::Bill);

    let harness = start(server, true).await;
    let mut view = harness.dashboard.view();

    let ready = wait_for(&mut view, |v| v.ready).await;
    assert_eq!(ready.requests.len(), 2);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(harness.alerter.play_count(), 0);

    harness.dashboard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn arrivals_in_one_poll_are_staggered() {
    let server = FakeServer::new();
    server.push_enabled.store(false, Ordering::SeqCst);

    let harness = start(server, true).await;
    let mut view = harness.dashboard.view();
    wait_for(&mut view, |v| v.ready).await;

    harness.server.open_request(3, RequestType::Waiter);
    harness.server.open_request(5, RequestType::Bill);

    wait_for(&mut view, |v| v.requests.len() == 2).await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    let plays = harness.alerter.plays.lock().unwrap().clone();
    assert_eq!(plays.len(), 2);
    assert_eq!(plays[1] - plays[0], Duration::from_millis(450));
    assert_eq!(view.borrow().push, PushStatus::Disconnected);

    harness.dashboard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn muted_dashboard_stays_quiet() {
    let harness = start(FakeServer::new(), false).await;
    let mut view = harness.dashboard.view();
    wait_for(&mut view, |v| v.ready).await;

    harness.server.open_request(1, RequestType::Waiter);
    wait_for(&mut view, |v| v.requests.len() == 1).await;
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(harness.alerter.play_count(), 0);

    harness.dashboard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn failed_resolve_puts_the_request_back() {
    let server = FakeServer::new();
    let request = server.open_request(7, RequestType::Bill);

    let harness = start(server, false).await;
    let mut view = harness.dashboard.view();
    wait_for(&mut view, |v| v.requests.len() == 1).await;

    harness.server.fail_completes.store(true, Ordering::SeqCst);
    harness.dashboard.resolve(request.id.clone()).await;

    let restored = wait_for(&mut view, |v| v.last_error.is_some()).await;
    assert_eq!(restored.requests.len(), 1);
    assert_eq!(harness.server.status_of(&request.id), Some(RequestStatus::Waiting));

    harness.server.fail_completes.store(false, Ordering::SeqCst);
    harness.dashboard.resolve(request.id.clone()).await;
    wait_for(&mut view, |v| v.requests.is_empty()).await;

    harness.dashboard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn poll_during_slow_resolve_does_not_reopen_the_request() {
    let server = FakeServer::new();
    server.push_enabled.store(false, Ordering::SeqCst);
    let request = server.open_request(4, RequestType::Waiter);
    *server.complete_delay.lock().unwrap() = Duration::from_millis(1_500);

    let harness = start(server, false).await;
    let mut view = harness.dashboard.view();
    wait_for(&mut view, |v| v.requests.len() == 1).await;

    tokio::time::sleep(Duration::from_secs(1)).await;
    harness.dashboard.resolve(request.id.clone()).await;
    wait_for(&mut view, |v| v.requests.is_empty()).await;

    // a poll lands while the completion is still in flight
    tokio::time::sleep(Duration::from_millis(1_200)).await;
    assert_eq!(harness.server.status_of(&request.id), Some(RequestStatus::Waiting));
    assert!(view.borrow().requests.is_empty());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(harness.server.status_of(&request.id), Some(RequestStatus::Completed));
    assert!(view.borrow().requests.is_empty());

    harness.dashboard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn snapshot_failure_keeps_the_last_list() {
    let server = FakeServer::new();
    server.open_request(2, RequestType::Waiter);

    let harness = start(server, false).await;
    let mut view = harness.dashboard.view();
    wait_for(&mut view, |v| v.requests.len() == 1).await;

    harness.server.fail_snapshots.store(true, Ordering::SeqCst);
    let failing = wait_for(&mut view, |v| v.last_error.is_some()).await;
    assert_eq!(failing.requests.len(), 1);

    harness.server.fail_snapshots.store(false, Ordering::SeqCst);
    wait_for(&mut view, |v| v.last_error.is_none()).await;

    harness.dashboard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn resolving_an_unknown_request_changes_nothing() {
    let server = FakeServer::new();
    server.open_request(1, RequestType::Waiter);

    let harness = start(server, false).await;
    let mut view = harness.dashboard.view();
    wait_for(&mut view, |v| v.requests.len() == 1).await;

    harness.dashboard.resolve("no-such-request").await;
    harness.dashboard.refresh().await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let current = view.borrow().clone();
    assert_eq!(current.requests.len(), 1);
    assert_eq!(current.last_error, None);

    harness.dashboard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn sound_choice_is_remembered() {
    let harness = start(FakeServer::new(), false).await;
    let mut view = harness.dashboard.view();
    wait_for(&mut view, |v| v.ready).await;

    assert!(harness.dashboard.enable_sound().await);
    wait_for(&mut view, |v| v.sound_enabled).await;
    assert!(harness.preference.load().await);

    harness.dashboard.disable_sound().await;
    wait_for(&mut view, |v| !v.sound_enabled).await;
    assert!(!harness.preference.load().await);

    harness.dashboard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn blocked_audio_keeps_sound_off() {
    let harness = start(FakeServer::new(), false).await;
    harness.alerter.refuse_unlock.store(true, Ordering::SeqCst);

    assert!(!harness.dashboard.enable_sound().await);
    assert!(!harness.dashboard.view().borrow().sound_enabled);
    assert!(!harness.preference.load().await);

    harness.dashboard.shutdown().await;
}
