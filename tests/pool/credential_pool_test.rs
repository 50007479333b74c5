//! Credential rotation driving pool rebuilds, through the public API.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gallery::credential::{
    CredentialError, CredentialProvider, CredentialResult, ManualClock, TokenSource,
    DEFAULT_REFRESH_INTERVAL,
};
use gallery::pool::{PoolError, PoolFactory, PoolManager, PoolResult};
use gallery::GalleryError;

/// Hands out `token-1`, `token-2`, ... and can be told to fail.
#[derive(Default)]
struct SequenceSource {
    fetched: AtomicU32,
    failing: AtomicBool,
}

#[async_trait]
impl TokenSource for SequenceSource {
    async fn fetch_token(&self) -> CredentialResult<String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CredentialError::Source("identity service down".into()));
        }
        let n = self.fetched.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("token-{}", n))
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

/// Records every pool it builds, retires and closes.
#[derive(Default)]
struct RecordingFactory {
    built: Mutex<Vec<String>>,
    retired: Mutex<Vec<String>>,
    closed: Mutex<Vec<String>>,
}

#[async_trait]
impl PoolFactory for RecordingFactory {
    type Pool = Arc<String>;

    async fn build(&self, token: &str) -> PoolResult<Self::Pool> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.built.lock().unwrap().push(token.to_string());
        Ok(Arc::new(format!("pool[{}]", token)))
    }

    fn retire(&self, pool: Self::Pool) {
        self.retired.lock().unwrap().push(pool.to_string());
    }

    async fn close(&self, pool: Self::Pool) {
        self.closed.lock().unwrap().push(pool.to_string());
    }
}

struct Harness {
    clock: Arc<ManualClock>,
    source: Arc<SequenceSource>,
    manager: Arc<PoolManager<RecordingFactory>>,
}

fn harness() -> Harness {
    let clock = Arc::new(ManualClock::new());
    let source = Arc::new(SequenceSource::default());
    let credentials = Arc::new(CredentialProvider::with_clock(
        source.clone(),
        DEFAULT_REFRESH_INTERVAL,
        clock.clone(),
    ));
    let manager = Arc::new(PoolManager::new(RecordingFactory::default(), credentials));
    Harness {
        clock,
        source,
        manager,
    }
}

#[tokio::test]
async fn test_pool_survives_until_interval_passes() {
    let h = harness();

    assert_eq!(h.manager.state_name().await, "unconnected");
    let first = h.manager.pool().await.unwrap();
    assert_eq!(first.as_str(), "pool[token-1]");

    h.clock.advance(Duration::from_secs(900));
    let same = h.manager.pool().await.unwrap();
    assert!(Arc::ptr_eq(&first, &same));
    assert_eq!(h.manager.rebuild_count(), 1);

    h.clock.advance(Duration::from_secs(1));
    let rotated = h.manager.pool().await.unwrap();
    assert_eq!(rotated.as_str(), "pool[token-2]");
    assert_eq!(h.manager.rebuild_count(), 2);
    assert_eq!(
        *h.manager.factory().retired.lock().unwrap(),
        vec!["pool[token-1]".to_string()]
    );
}

#[tokio::test]
async fn test_concurrent_callers_after_expiry_share_one_rebuild() {
    let h = harness();
    h.manager.pool().await.unwrap();
    h.clock.advance(Duration::from_secs(901));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let manager = h.manager.clone();
            tokio::spawn(async move { manager.pool().await.unwrap() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().as_str(), "pool[token-2]");
    }
    assert_eq!(h.source.fetched.load(Ordering::SeqCst), 2);
    assert_eq!(h.manager.rebuild_count(), 2);
    assert_eq!(h.manager.factory().retired.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_identity_outage_is_retriable_and_recovers() {
    let h = harness();
    h.manager.pool().await.unwrap();
    h.clock.advance(Duration::from_secs(901));
    h.source.failing.store(true, Ordering::SeqCst);

    let err = h.manager.pool().await.unwrap_err();
    assert!(matches!(err, PoolError::Credential(_)));
    let err = GalleryError::from(err);
    assert_eq!(err.kind(), "credential");
    assert!(err.is_retriable());

    // the old pool is kept until a new token exists
    assert_eq!(h.manager.state_name().await, "connected");
    assert!(h.manager.factory().retired.lock().unwrap().is_empty());

    h.source.failing.store(false, Ordering::SeqCst);
    assert_eq!(h.manager.pool().await.unwrap().as_str(), "pool[token-2]");
}

#[tokio::test]
async fn test_invalidate_forces_rotation() {
    let h = harness();
    h.manager.pool().await.unwrap();

    h.manager.credentials().invalidate().await;
    assert_eq!(h.manager.credentials().current_generation().await, None);

    assert_eq!(h.manager.pool().await.unwrap().as_str(), "pool[token-2]");
    assert_eq!(h.manager.credentials().current_generation().await, Some(2));
}

#[tokio::test]
async fn test_close_then_reuse() {
    let h = harness();
    h.manager.pool().await.unwrap();

    h.manager.close().await;
    assert_eq!(h.manager.state_name().await, "unconnected");
    assert_eq!(
        *h.manager.factory().closed.lock().unwrap(),
        vec!["pool[token-1]".to_string()]
    );

    // same credential, fresh pool
    assert_eq!(h.manager.pool().await.unwrap().as_str(), "pool[token-1]");
    assert_eq!(h.manager.rebuild_count(), 2);
}
