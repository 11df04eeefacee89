// =========================
// tests/integration/concurrency_tests.rs
// =========================
//! Concurrent and cancelled gate checks
use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use webook_backend_lib::session::{
    Clock, Decision, ManualClock, MemorySessionStore, SessionError, SessionGate, SessionRecord,
    SessionStore,
};

use crate::test_utils::T0;

fn gate_over(store: Arc<dyn SessionStore>, clock: Arc<ManualClock>) -> Arc<SessionGate> {
    Arc::new(
        SessionGate::builder()
            .refresh_interval(Duration::from_secs(10))
            .max_age(Duration::from_secs(60))
            .build(store, clock as Arc<dyn Clock>),
    )
}

async fn stale_session(store: &MemorySessionStore, key: &str, identity: i64) {
    let mut record = SessionRecord::for_identity(identity);
    record.insert("update_time", serde_json::json!(T0));
    store.set(key, record, Duration::from_secs(60)).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_stale_requests_all_pass() {
    let clock = Arc::new(ManualClock::new(T0));
    let store = Arc::new(MemorySessionStore::new(clock.clone()));
    stale_session(&store, "k", 1).await;
    let gate = gate_over(store.clone(), clock.clone());

    clock.set(T0 + 15_000);
    let checks = (0..32).map(|_| {
        let gate = gate.clone();
        tokio::spawn(async move { gate.admit("/users/profile", Some("k")).await })
    });
    let decisions: Vec<Decision> = join_all(checks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert!(decisions.iter().all(Decision::is_admitted));
    let record = store.get("k").await.unwrap().unwrap();
    assert_eq!(record.last_refresh_at().unwrap(), Some(T0 + 15_000));
    assert_eq!(record.identity().unwrap(), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sessions_do_not_interfere() {
    let clock = Arc::new(ManualClock::new(T0));
    let store = Arc::new(MemorySessionStore::new(clock.clone()));
    for i in 0..16 {
        stale_session(&store, &format!("k{i}"), i).await;
    }
    let gate = gate_over(store.clone(), clock.clone());

    clock.set(T0 + 20_000);
    let checks = (0..16).map(|i| {
        let gate = gate.clone();
        let key = format!("k{i}");
        tokio::spawn(async move { gate.admit("/users/profile", Some(key.as_str())).await })
    });
    for decision in join_all(checks).await {
        assert_eq!(decision.unwrap(), Decision::ContinueWithRefresh);
    }

    for i in 0..16 {
        let record = store.get(&format!("k{i}")).await.unwrap().unwrap();
        assert_eq!(record.identity().unwrap(), Some(i));
        assert_eq!(record.last_refresh_at().unwrap(), Some(T0 + 20_000));
    }
}

/// Reads from the inner store; writes never complete.
struct StuckWrites(Arc<MemorySessionStore>);

#[async_trait]
impl SessionStore for StuckWrites {
    async fn get(&self, key: &str) -> Result<Option<SessionRecord>, SessionError> {
        self.0.get(key).await
    }

    async fn set(&self, _: &str, _: SessionRecord, _: Duration) -> Result<(), SessionError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_cancelled_refresh_leaves_session_unchanged() {
    let clock = Arc::new(ManualClock::new(T0));
    let inner = Arc::new(MemorySessionStore::new(clock.clone()));
    stale_session(&inner, "k", 1).await;
    let gate = gate_over(Arc::new(StuckWrites(inner.clone())), clock.clone());

    clock.set(T0 + 30_000);
    let result = tokio::time::timeout(
        Duration::from_millis(50),
        gate.admit("/users/profile", Some("k")),
    )
    .await;
    assert!(result.is_err(), "refresh write should still be pending");

    let record = inner.get("k").await.unwrap().unwrap();
    assert_eq!(record.last_refresh_at().unwrap(), Some(T0));
}
