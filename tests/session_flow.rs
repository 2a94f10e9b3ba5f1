mod common;

use std::sync::Arc;

use common::mock_backend::{MockBackend, MockResponse};
use common::{logged_in_storage, make_actions_with};
use trackcase::actions::resource::COURTS;
use trackcase::actions::{ActionError, ListOptions};
use trackcase::storage::{self, KeyValueStore, MemoryStorage};
use trackcase::store::AppState;

#[tokio::test]
async fn login_persists_token_and_user() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"token": "abc123", "expiration": 30, "user_details": {"username": "jdoe", "is_admin": true}}"#,
        ))
        .await;

    let kv = Arc::new(MemoryStorage::new());
    let actions = make_actions_with(&backend.base_url(), kv.clone());

    let before = storage::now_millis();
    let outcome = actions.login("jdoe", "hunter2").await.expect("login");

    assert!(outcome.user_details.is_admin);
    assert!(outcome.expires_at >= before + 30 * 60_000);
    assert_eq!(storage::token(kv.as_ref()).as_deref(), Some("abc123"));
    assert_eq!(storage::username(kv.as_ref()).as_deref(), Some("jdoe"));
    assert!(storage::is_logged_in(kv.as_ref()));

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/trackcase-service/users/user/login");
    assert!(requests[0]
        .header("authorization")
        .is_some_and(|h| h.starts_with("Basic ")));
    assert_eq!(requests[0].json()["username"], "jdoe");
}

#[tokio::test]
async fn oversized_expiration_is_clamped() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"token": "abc123", "expiration": 9223372036854775807}"#,
        ))
        .await;

    let kv = Arc::new(MemoryStorage::new());
    let actions = make_actions_with(&backend.base_url(), kv.clone());

    let outcome = actions.login("jdoe", "hunter2").await.expect("login");
    assert_eq!(outcome.expires_at, i64::MAX);
    assert!(storage::is_logged_in(kv.as_ref()));
}

#[tokio::test]
async fn rejected_login_reports_detail_and_persists_nothing() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail_error(401, "Invalid credentials"))
        .await;

    let kv = Arc::new(MemoryStorage::new());
    let actions = make_actions_with(&backend.base_url(), kv.clone());

    let err = actions.login("jdoe", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(storage::token(kv.as_ref()).is_none());
    assert!(actions.store().state().alert.is_empty());
}

#[tokio::test]
async fn blank_login_fields_are_validation_errors() {
    let backend = MockBackend::start().await;
    let actions = make_actions_with(&backend.base_url(), Arc::new(MemoryStorage::new()));

    let err = actions.login(" ", "").await.unwrap_err();
    let ActionError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.get("username").is_some());
    assert!(errors.get("password").is_some());
    assert_eq!(backend.request_count().await, 0);
}

#[tokio::test]
async fn logout_resets_store_and_session() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"courts": [{"id": 1, "name": "A"}]}"#))
        .await;

    let kv = logged_in_storage();
    let actions = make_actions_with(&backend.base_url(), kv.clone());
    actions.list(COURTS, ListOptions::default()).await.unwrap();
    assert!(!actions.store().state().courts.data.is_empty());

    actions.logout().unwrap();

    assert_eq!(actions.store().state(), AppState::default());
    assert!(storage::token(kv.as_ref()).is_none());
    assert!(!storage::is_logged_in(kv.as_ref()));
}

#[tokio::test]
async fn database_ping_is_cached() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"ping": "successful"}"#))
        .await;

    let actions = make_actions_with(&backend.base_url(), Arc::new(MemoryStorage::new()));

    assert_eq!(actions.test_database().await.unwrap(), "successful");
    assert_eq!(actions.test_database().await.unwrap(), "successful");
    assert_eq!(backend.request_count().await, 1);
    assert_eq!(
        backend.captured_requests().await[0].path,
        "/trackcase-service/tests/ping"
    );
}

#[tokio::test]
async fn ping_cache_lives_in_the_client_store() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"ping": "successful"}"#))
        .await;

    let kv = Arc::new(MemoryStorage::new());
    let first = make_actions_with(&backend.base_url(), kv.clone());
    assert_eq!(first.test_database().await.unwrap(), "successful");
    assert!(kv.get_raw("pingStatus").is_some());

    let second = make_actions_with(&backend.base_url(), kv.clone());
    assert_eq!(second.test_database().await.unwrap(), "successful");
    assert_eq!(backend.request_count().await, 1);

    second.logout().unwrap();
    assert!(kv.get_raw("pingStatus").is_none());
}

#[tokio::test]
async fn failed_ping_is_not_cached() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail_error(503, "Database down"))
        .await;
    backend
        .enqueue_response(MockResponse::json(r#"{"ping": "successful"}"#))
        .await;

    let actions = make_actions_with(&backend.base_url(), Arc::new(MemoryStorage::new()));

    assert_eq!(
        actions.test_database().await.unwrap_err().to_string(),
        "Database down"
    );
    assert_eq!(actions.test_database().await.unwrap(), "successful");
    assert_eq!(backend.request_count().await, 2);
}
