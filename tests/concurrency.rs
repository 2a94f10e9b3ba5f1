mod common;

use std::time::Duration;

use common::mock_backend::{MockBackend, MockResponse};
use common::{make_actions, record_actions};
use tokio_util::sync::CancellationToken;
use trackcase::actions::resource::{COURTS, JUDGES};
use trackcase::actions::{ActionError, ListOptions};
use trackcase::store::{Action, FetchStatus, RequestMetadata};

#[tokio::test]
async fn identical_concurrent_reads_share_one_request() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"courts": [{"id": 1, "name": "A"}]}"#).with_delay(100))
        .await;

    let actions = make_actions(&backend.base_url());
    let seen = record_actions(actions.store());
    let other = actions.clone();

    let (a, b) = tokio::join!(
        actions.list(COURTS, ListOptions::default()),
        other.list(COURTS, ListOptions::default())
    );

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(backend.request_count().await, 1);
    assert_eq!(
        *seen.lock(),
        vec!["COURTS_READ_REQUEST", "COURTS_READ_SUCCESS", "COURTS_COMPLETE"]
    );
}

#[tokio::test]
async fn different_metadata_is_not_deduplicated() {
    let backend = MockBackend::start().await;
    for _ in 0..2 {
        backend
            .enqueue_response(MockResponse::json(r#"{"judges": []}"#).with_delay(50))
            .await;
    }

    let actions = make_actions(&backend.base_url());
    let (a, b) = tokio::join!(
        actions.list(JUDGES, ListOptions::default()),
        actions.list(
            JUDGES,
            ListOptions::default().with_metadata(RequestMetadata::page(1, 5))
        )
    );

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(backend.request_count().await, 2);
}

#[tokio::test]
async fn cancelled_scope_dispatches_only_complete() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"courts": []}"#).with_delay(500))
        .await;

    let actions = make_actions(&backend.base_url());
    let seen = record_actions(actions.store());
    let scope = CancellationToken::new();
    let scoped = actions.scoped(scope.clone());

    let task = tokio::spawn(async move { scoped.list(COURTS, ListOptions::default()).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    scope.cancel();

    let result = task.await.unwrap();
    assert_eq!(result, Err(ActionError::Cancelled));
    assert_eq!(*seen.lock(), vec!["COURTS_READ_REQUEST", "COURTS_COMPLETE"]);

    let state = actions.store().state();
    assert_eq!(state.courts.status, FetchStatus::NotFetched);
    assert!(!state.spinner.is_loading);
    assert!(state.alert.is_empty());
}

#[tokio::test]
async fn live_follower_takes_over_when_leader_is_cancelled() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"courts": []}"#).with_delay(500))
        .await;
    backend
        .enqueue_response(MockResponse::json(r#"{"courts": [{"id": 1, "name": "A"}]}"#))
        .await;

    let actions = make_actions(&backend.base_url());
    let scope = CancellationToken::new();
    let leader = actions.scoped(scope.clone());
    let follower = actions.clone();

    let lead = tokio::spawn(async move { leader.list(COURTS, ListOptions::default()).await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    let follow = tokio::spawn(async move { follower.list(COURTS, ListOptions::default()).await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    scope.cancel();

    assert_eq!(lead.await.unwrap(), Err(ActionError::Cancelled));
    let courts = follow.await.unwrap().expect("follower should refetch");
    assert_eq!(courts.len(), 1);
    assert_eq!(backend.request_count().await, 2);

    let state = actions.store().state();
    assert_eq!(state.courts.status, FetchStatus::Fetched);
    assert_eq!(state.courts.data, courts);
    assert!(state.alert.is_empty());
}

#[tokio::test]
async fn cancelled_follower_does_not_refetch() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"courts": []}"#).with_delay(300))
        .await;

    let actions = make_actions(&backend.base_url());
    let scope = CancellationToken::new();
    let leader = actions.clone();
    let follower = actions.scoped(scope.clone());

    let lead = tokio::spawn(async move { leader.list(COURTS, ListOptions::default()).await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    let follow = tokio::spawn(async move { follower.list(COURTS, ListOptions::default()).await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    scope.cancel();

    assert_eq!(follow.await.unwrap(), Err(ActionError::Cancelled));
    assert!(lead.await.unwrap().is_ok());
    assert_eq!(backend.request_count().await, 1);
}

#[tokio::test]
async fn logout_during_flight_leaves_initial_state() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"courts": [{"id": 3, "name": "C"}]}"#).with_delay(100))
        .await;

    let actions = make_actions(&backend.base_url());
    let reader = actions.clone();
    let task = tokio::spawn(async move { reader.list(COURTS, ListOptions::default()).await });
    tokio::time::sleep(Duration::from_millis(20)).await;

    actions.store().dispatch(Action::user_logout());
    assert_eq!(actions.store().state(), Default::default());

    // The late response still lands; logout does not cancel requests.
    task.await.unwrap().unwrap();
    let state = actions.store().state();
    assert_eq!(state.courts.status, FetchStatus::Fetched);
    assert_eq!(state.courts.data.len(), 1);
    assert_eq!(state.courts.data[0].id, Some(3));
}
