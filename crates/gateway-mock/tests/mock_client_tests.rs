//! End-to-end tests of the mock client through the consumer-facing surface.

use gateway_core::{row_from, row_str, AuthError, AuthEvent, QueryError};
use gateway_mock::{mock_backend_handle, MockClientConfig, DEMO_ADMIN_ID, DEMO_USER_EMAIL};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn insert_then_select_single_round_trip() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    let inserted = handle
        .from("organizations")
        .insert(row_from(&[("name", json!("Acme"))]))
        .await
        .unwrap();
    assert_eq!(inserted.len(), 1);

    let row = handle
        .from("organizations")
        .select()
        .eq("name", "Acme")
        .single()
        .await
        .unwrap();
    assert_eq!(row_str(&row, "name"), Some("Acme"));
    assert!(row_str(&row, "id").is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn sign_in_demo_user_scenario() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    let data = handle
        .auth()
        .sign_in_with_password("demo@example.com", "demo")
        .await
        .unwrap();
    assert_eq!(data.user.email, DEMO_USER_EMAIL);
    assert_eq!(data.session.user.email, DEMO_USER_EMAIL);
}

#[tokio::test]
async fn empty_credentials_scenario() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    let err = handle
        .auth()
        .sign_in_with_password("", "")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials(_)));
    assert!(!err.message().is_empty());
    assert!(handle.auth().get_session().is_none());
}

#[tokio::test]
async fn system_roles_maybe_single_scenario() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    let row = handle
        .from("system_roles")
        .select()
        .eq("user_id", DEMO_ADMIN_ID)
        .maybe_single()
        .await
        .unwrap()
        .expect("seeded admin role");
    assert_eq!(row_str(&row, "role"), Some("platform_admin"));

    let missing = handle
        .from("system_roles")
        .select()
        .eq("user_id", "nonexistent")
        .maybe_single()
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn single_errors_on_zero_and_multiple() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    let err = handle
        .from("organizations")
        .select()
        .eq("name", "nope")
        .single()
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::NotFound { .. }));

    let err = handle
        .from("profiles")
        .select()
        .single()
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::MultipleRows { count: 2, .. }));
}

#[tokio::test]
async fn bare_awaited_select_returns_all_rows() {
    let handle = mock_backend_handle(MockClientConfig::instant());
    let rows = handle.from("profiles").select().await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn update_mutates_and_delete_removes() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    handle
        .from("organizations")
        .insert(row_from(&[("id", json!("org-x")), ("name", json!("Globex"))]))
        .await
        .unwrap();

    let updated = handle
        .from("organizations")
        .update(row_from(&[("name", json!("Globex Corp"))]))
        .eq("id", "org-x")
        .await
        .unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(row_str(&updated[0], "name"), Some("Globex Corp"));

    let row = handle
        .from("organizations")
        .select()
        .eq("id", "org-x")
        .single()
        .await
        .unwrap();
    assert_eq!(row_str(&row, "name"), Some("Globex Corp"));

    handle
        .from("organizations")
        .delete()
        .eq("id", "org-x")
        .await
        .unwrap();

    let gone = handle
        .from("organizations")
        .select()
        .eq("id", "org-x")
        .maybe_single()
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn column_projection_narrows_rows() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    let rows = handle
        .from("profiles")
        .select()
        .columns("id,email")
        .await
        .unwrap();
    assert!(rows.iter().all(|row| row.len() == 2));
}

#[tokio::test]
async fn listener_fires_after_sign_in_resolves() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let _sub = handle.auth().on_auth_state_change(Arc::new(move |event, session| {
        sink.lock().push((event, session.is_some()));
    }));

    handle
        .auth()
        .sign_in_with_password("demo@example.com", "demo")
        .await
        .unwrap();

    // The sign-in future has resolved: direct state reads see the session,
    // but the listener has not run yet.
    assert!(handle.auth().get_session().is_some());
    assert!(events.lock().is_empty());

    tokio::task::yield_now().await;
    assert_eq!(*events.lock(), vec![(AuthEvent::SignedIn, true)]);
}

#[tokio::test]
async fn late_subscriber_observes_current_session() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    handle
        .auth()
        .sign_in_with_password("demo@example.com", "demo")
        .await
        .unwrap();
    tokio::task::yield_now().await;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let _sub = handle.auth().on_auth_state_change(Arc::new(move |event, _| {
        assert_eq!(event, AuthEvent::SignedIn);
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    // Replay is deferred too, never synchronous with the registration.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    tokio::task::yield_now().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unsubscribe_twice_and_listener_stays_gone() {
    let handle = mock_backend_handle(MockClientConfig::instant());

    handle
        .auth()
        .sign_in_with_password("demo@example.com", "demo")
        .await
        .unwrap();
    tokio::task::yield_now().await;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let sub = handle.auth().on_auth_state_change(Arc::new(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    tokio::task::yield_now().await;
    let after_replay = calls.load(Ordering::SeqCst);

    sub.unsubscribe();
    sub.unsubscribe();

    handle.auth().sign_out().await.unwrap();
    tokio::task::yield_now().await;

    assert_eq!(calls.load(Ordering::SeqCst), after_replay);
}

#[tokio::test(start_paused = true)]
async fn operations_take_simulated_time() {
    use std::time::Duration;

    let config = MockClientConfig {
        latency: gateway_mock::LatencyProfile::fixed(Duration::from_millis(40)),
        store: None,
    };
    let handle = mock_backend_handle(config);

    let start = tokio::time::Instant::now();
    handle.from("profiles").select().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(40));
}
