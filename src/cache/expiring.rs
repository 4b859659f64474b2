//! Expiring Cache Module
//!
//! Concurrent-safe wrapper around [`CacheStore`] with an explicitly managed
//! background expiry sweep.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::{Cache, CacheStore};
use crate::tasks::spawn_sweep_task;

/// Smallest interval the sweep will run at, so a zero TTL does not spin.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a running sweep task.
#[derive(Debug)]
struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

// == Expiring Cache ==
/// Shared, time-bounded cache.
///
/// Reads take the shared side of a single `RwLock`; writes and sweep passes
/// take the exclusive side. Entries are treated as absent once expired, even
/// before the sweep removes them.
///
/// The sweep is not started by the constructor. Call [`start`](Self::start)
/// from within a tokio runtime and [`stop`](Self::stop) during shutdown.
/// Dropping the cache also ends the sweep, since the task exits when its stop
/// channel closes.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    /// Lifetime stamped onto every entry; the store itself keeps none
    ttl: Duration,
    sweeper: Mutex<Option<Sweeper>>,
}

impl<V> ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache. Every entry lives for `ttl` after its last set.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new())),
            ttl,
            sweeper: Mutex::new(None),
        }
    }

    // == Get ==
    /// Returns the value for `key` if a non-expired entry exists.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.read().await.get(key)
    }

    // == Set ==
    /// Inserts or replaces the entry for `key`, expiring `ttl` from now.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.store.write().await.set(key.into(), value, self.ttl);
    }

    // == Size ==
    /// Returns the number of entries held.
    ///
    /// Expired entries count until the sweep removes them.
    pub async fn size(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns the interval between sweep passes: half the TTL.
    pub fn sweep_interval(&self) -> Duration {
        (self.ttl / 2).max(MIN_SWEEP_INTERVAL)
    }

    // == Start ==
    /// Spawns the background sweep on the current tokio runtime.
    ///
    /// Returns `false` without spawning if a sweep is already running.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn start(&self) -> bool {
        let mut sweeper = self.sweeper.lock().unwrap_or_else(PoisonError::into_inner);
        if sweeper.is_some() {
            warn!("Cache expiry sweep already running; ignoring start");
            return false;
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweep_task(self.store.clone(), self.sweep_interval(), shutdown_rx);
        *sweeper = Some(Sweeper {
            shutdown_tx,
            handle,
        });
        true
    }

    // == Stop ==
    /// Signals the background sweep to exit.
    ///
    /// Does not wait for the task; an in-flight pass finishes on its own and
    /// no further passes run. `get`/`set` keep working afterwards, but expired
    /// entries are no longer purged automatically.
    ///
    /// Stopping twice is a caller bug. The second call is guarded: it logs a
    /// warning and returns `false` instead of signalling again.
    pub fn stop(&self) -> bool {
        let taken = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match taken {
            Some(Sweeper {
                shutdown_tx,
                handle,
            }) => {
                // The receiver may already be gone if the task was aborted.
                let _ = shutdown_tx.send(true);
                drop(handle);
                info!("Cache expiry sweep signalled to stop");
                true
            }
            None => {
                warn!("Cache expiry sweep is not running; ignoring stop");
                false
            }
        }
    }

    /// Returns true while a sweep task is owned by this cache.
    pub fn is_running(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[async_trait]
impl<V> Cache<V> for ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        ExpiringCache::get(self, key).await
    }

    async fn set(&self, key: String, value: V) {
        ExpiringCache::set(self, key, value).await
    }
}
