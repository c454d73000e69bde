//! Session store behavior against the mock client.

use gateway_mock::{mock_backend_handle, MockClientConfig, DEMO_USER_ID};
use gateway_session::AuthSessionStore;

#[tokio::test]
async fn attach_resolves_loading_immediately() {
    let handle = mock_backend_handle(MockClientConfig::instant());
    let store = AuthSessionStore::attach(handle);

    let state = store.current();
    assert!(!state.loading);
    assert!(!state.signed_in());
}

#[tokio::test]
async fn sign_in_updates_the_snapshot() {
    let handle = mock_backend_handle(MockClientConfig::instant());
    let store = AuthSessionStore::attach(handle);

    let data = store.sign_in("demo@example.com", "demo").await.unwrap();
    assert_eq!(data.user.id, DEMO_USER_ID);

    let state = store.current();
    assert!(state.signed_in());
    assert_eq!(state.user.as_ref().unwrap().id, DEMO_USER_ID);
}

#[tokio::test]
async fn watch_subscribers_observe_changes() {
    let handle = mock_backend_handle(MockClientConfig::instant());
    let store = AuthSessionStore::attach(handle);
    let mut rx = store.subscribe();

    store.sign_in("demo@example.com", "demo").await.unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow().signed_in());

    store.sign_out().await.unwrap();
    rx.changed().await.unwrap();
    assert!(!rx.borrow().signed_in());
}

#[tokio::test]
async fn store_attached_after_sign_in_converges() {
    let handle = mock_backend_handle(MockClientConfig::instant());
    handle
        .auth()
        .sign_in_with_password("demo@example.com", "demo")
        .await
        .unwrap();

    let store = AuthSessionStore::attach(handle);
    // Primed from the direct session read, no event needed.
    assert!(store.current().signed_in());
}

#[tokio::test]
async fn sign_up_signs_the_new_account_in() {
    let handle = mock_backend_handle(MockClientConfig::instant());
    let store = AuthSessionStore::attach(handle);

    let data = store.sign_up("fresh@example.com", "pw").await.unwrap();
    assert_eq!(data.user.email, "fresh@example.com");
    assert!(store.current().signed_in());
}

#[tokio::test]
async fn detached_store_stops_tracking() {
    let handle = mock_backend_handle(MockClientConfig::instant());
    let store = AuthSessionStore::attach(handle.clone());

    store.detach();
    store.detach(); // idempotent

    handle
        .auth()
        .sign_in_with_password("demo@example.com", "demo")
        .await
        .unwrap();
    tokio::task::yield_now().await;

    // The deferred notification was never delivered to this store.
    assert!(!store.current().signed_in());
}

#[tokio::test]
async fn failed_sign_in_leaves_state_untouched() {
    let handle = mock_backend_handle(MockClientConfig::instant());
    let store = AuthSessionStore::attach(handle);

    assert!(store.sign_in("", "").await.is_err());
    assert!(!store.current().signed_in());
    assert!(!store.current().loading);
}
