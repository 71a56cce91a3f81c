// src/services/key_status.rs
use log::{error, info};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};

use crate::models::KeyStats;
use crate::services::vendor_api::VendorApi;

pub const POLL_INTERVAL_SECS: u64 = 30;

/// Latest known key-status widget state.
#[derive(Debug, Clone, Default)]
pub struct KeyStatusSnapshot {
    /// False until the first fetch attempt finishes, so the widget can show
    /// a loading state instead of "unavailable" at startup.
    pub attempted: bool,
    /// Last successfully fetched stats. A failed poll leaves the previous
    /// value in place; the widget is "unavailable" only when nothing has
    /// ever been fetched.
    pub stats: Option<KeyStats>,
}

/// Advisory key-rotation metrics, refreshed on a fixed interval and on
/// demand when the management panel opens. Failures are non-fatal and only
/// logged; there is no retry or backoff.
pub struct KeyStatusMonitor {
    api: VendorApi,
    snapshot: RwLock<KeyStatusSnapshot>,
}

impl KeyStatusMonitor {
    pub fn new(api: VendorApi) -> Self {
        KeyStatusMonitor {
            api,
            snapshot: RwLock::new(KeyStatusSnapshot::default()),
        }
    }

    pub async fn snapshot(&self) -> KeyStatusSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn refresh(&self) {
        let outcome = self.api.fetch_key_status().await;
        let mut snapshot = self.snapshot.write().await;
        snapshot.attempted = true;
        match outcome {
            Ok(stats) => snapshot.stats = Some(stats),
            Err(e) => error!("Failed to fetch key status: {}", e),
        }
    }
}

/// Handle to the background poll task. The composition root must call `stop`
/// at shutdown; dropping the handle alone leaves the task running.
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the 30-second status poll. The first tick fires immediately, which
/// doubles as the initial fetch.
pub fn spawn_poller(monitor: Arc<KeyStatusMonitor>) -> PollerHandle {
    let (shutdown, mut rx) = watch::channel(false);
    let task = tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(POLL_INTERVAL_SECS));
        loop {
            tokio::select! {
                _ = ticker.tick() => monitor.refresh().await,
                _ = rx.changed() => {
                    info!("Key status poller stopped");
                    break;
                }
            }
        }
    });
    PollerHandle { shutdown, task }
}
