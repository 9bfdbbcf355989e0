//! # Trailing Debouncer
//!
//! One restartable timer per key. Every call replaces the pending task for
//! that key; the task runs once the key has been quiet for the window.
//!
//! ```text
//! key "entry-a":  v─via  v─via r  v─via roma 1 ─────── 800ms ───► run
//!                 └abort┘ └abort─┘
//! key "entry-b":  v─corso ──────── 800ms ───► run
//! ```
//!
//! Only the timer is cancellable. Once the task has started (e.g. a
//! network request is in flight) a newer call no longer aborts it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

struct Pending {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Keyed trailing debouncer.
#[derive(Clone)]
pub struct Debouncer {
    window: Duration,
    pending: Arc<Mutex<HashMap<String, Pending>>>,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Debouncer {
            window,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// (Re)starts the timer for `key`; `task` runs when it fires.
    pub async fn schedule<F>(&self, key: &str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut map = self.pending.lock().await;

        // Under the map lock, so insertion order follows generation order.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst);
        let window = self.window;
        let pending = Arc::clone(&self.pending);
        let owned_key = key.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;

            // Past the window: leave the map so a newer call cannot abort
            // the running task.
            {
                let mut map = pending.lock().await;
                if map
                    .get(&owned_key)
                    .is_some_and(|p| p.generation == generation)
                {
                    map.remove(&owned_key);
                }
            }

            task.await;
        });

        if let Some(previous) = map.insert(key.to_string(), Pending { generation, handle }) {
            previous.handle.abort();
            debug!(key, "Debounce timer restarted");
        }
    }

    /// Drops the pending timer for `key`, if any.
    pub async fn cancel(&self, key: &str) -> bool {
        match self.pending.lock().await.remove(key) {
            Some(previous) => {
                previous.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Drops every pending timer.
    pub async fn cancel_all(&self) {
        let mut map = self.pending.lock().await;
        for (_, previous) in map.drain() {
            previous.handle.abort();
        }
    }

    /// True while a timer for `key` is waiting to fire.
    pub async fn is_pending(&self, key: &str) -> bool {
        self.pending.lock().await.contains_key(key)
    }
}
