//! Stub backend for tests: an axum router on an ephemeral local port.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use super::{ApiClient, DEFAULT_TIMEOUT};
use crate::auth::session::{SessionContext, StoredSession};
use crate::models::UserSummary;
use crate::notifications::MemoryNotifier;

pub(crate) struct Harness {
    pub api: ApiClient,
    pub notifier: Arc<MemoryNotifier>,
}

pub(crate) async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub(crate) async fn harness(router: Router) -> Harness {
    harness_with_timeout(router, DEFAULT_TIMEOUT).await
}

pub(crate) async fn harness_with_timeout(router: Router, timeout: Duration) -> Harness {
    let base_url = spawn(router).await;
    let notifier = Arc::new(MemoryNotifier::new());
    let session = Arc::new(SessionContext::in_memory());
    let api = ApiClient::new(&base_url, timeout, session, notifier.clone()).unwrap();
    Harness { api, notifier }
}

/// URL of a local port nothing listens on
pub(crate) async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub(crate) fn summary(user_id: i64, role: &str) -> UserSummary {
    UserSummary {
        user_id,
        email: format!("user{}@example.com", user_id),
        first_name: "Test".to_string(),
        last_name: format!("User{}", user_id),
        user_type: role.to_string(),
    }
}

/// Establish a session with token `test-token` for user 7
pub(crate) fn login_as(api: &ApiClient, role: &str) {
    login_as_user(api, 7, role);
}

pub(crate) fn login_as_user(api: &ApiClient, user_id: i64, role: &str) {
    let stored = StoredSession::new("test-token", "Bearer", &summary(user_id, role)).unwrap();
    api.session().establish(stored).unwrap();
}
