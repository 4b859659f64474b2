//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries so that
//! dead entries do not accumulate between reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps expired entries out of `store`.
///
/// The task sleeps for `interval` between passes and takes the write lock
/// only for the duration of a single pass. It exits as soon as `true` is sent
/// on `shutdown_rx`, or when the sending half is dropped.
///
/// # Arguments
/// * `store` - shared reference to the cache store
/// * `interval` - time between sweep passes
/// * `shutdown_rx` - stop signal owned by the cache
///
/// # Panics
/// Must be called from within a tokio runtime.
pub fn spawn_sweep_task<V>(
    store: Arc<RwLock<CacheStore<V>>>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting cache expiry sweep");

        loop {
            tokio::select! {
                biased;

                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Cache expiry sweep stopped");
                        return;
                    }
                    continue;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            let (removed, remaining) = {
                let mut guard = store.write().await;
                let removed = guard.cleanup_expired();
                (removed, guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "Expiry sweep removed expired entries");
            } else {
                debug!(remaining, "Expiry sweep found no expired entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_store() -> Arc<RwLock<CacheStore<String>>> {
        Arc::new(RwLock::new(CacheStore::new()))
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let store = shared_store();
        store.write().await.set(
            "expire_soon".to_string(),
            "value".to_string(),
            Duration::from_millis(50),
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweep_task(store.clone(), Duration::from_millis(25), shutdown_rx);

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.read().await.len(), 0, "Expired entry should have been swept");

        tokio_test::assert_ok!(shutdown_tx.send(true));
        tokio_test::assert_ok!(handle.await);
    }

    #[tokio::test]
    async fn test_sweep_preserves_valid_entries() {
        let store = shared_store();
        store.write().await.set(
            "long_lived".to_string(),
            "value".to_string(),
            Duration::from_secs(3600),
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweep_task(store.clone(), Duration::from_millis(20), shutdown_rx);

        tokio::time::sleep(Duration::from_millis(100)).await;

        let guard = store.read().await;
        assert_eq!(guard.len(), 1);
        assert_eq!(guard.get("long_lived"), Some("value".to_string()));
        drop(guard);

        tokio_test::assert_ok!(shutdown_tx.send(true));
        tokio_test::assert_ok!(handle.await);
    }

    #[tokio::test]
    async fn test_sweep_exits_on_shutdown_signal() {
        let store = shared_store();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweep_task(store, Duration::from_secs(60), shutdown_rx);

        tokio_test::assert_ok!(shutdown_tx.send(true));

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweep should exit promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn test_sweep_exits_when_sender_dropped() {
        let store = shared_store();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweep_task(store, Duration::from_secs(60), shutdown_rx);

        drop(shutdown_tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweep should exit once its owner is gone")
            .unwrap();
    }
}
