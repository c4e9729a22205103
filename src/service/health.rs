//! Background reachability monitor for the validation API.
//!
//! Polls `GET /health` once immediately and then on a fixed interval,
//! publishing the latest [`HealthSnapshot`]. The polling task ends when
//! [`HealthMonitor::shutdown`] is called or the monitor is dropped.

use crate::api::ApiClient;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Indicator state shown next to the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Checking,
    Online,
    Offline,
}

impl ApiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Checking => "Checking...",
            ApiStatus::Online => "API Online",
            ApiStatus::Offline => "API Offline",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthSnapshot {
    pub status: ApiStatus,
    pub last_checked: Option<DateTime<Utc>>,
    /// Version reported by the API on the last successful check.
    pub version: Option<String>,
    /// Failure message from the last unsuccessful check.
    pub last_error: Option<String>,
}

impl Default for HealthSnapshot {
    fn default() -> Self {
        Self {
            status: ApiStatus::Checking,
            last_checked: None,
            version: None,
            last_error: None,
        }
    }
}

/// Runs a single health check and converts the outcome into a snapshot.
pub async fn check_once(client: &ApiClient) -> HealthSnapshot {
    let now = Utc::now();
    match client.health_check().await {
        Ok(health) => {
            tracing::debug!(target: "health", "API online (status={}, version={})", health.status, health.version);
            HealthSnapshot {
                status: ApiStatus::Online,
                last_checked: Some(now),
                version: Some(health.version),
                last_error: None,
            }
        }
        Err(e) => {
            tracing::debug!(target: "health", "API offline: {}", e);
            HealthSnapshot {
                status: ApiStatus::Offline,
                last_checked: Some(now),
                version: None,
                last_error: Some(e.to_string()),
            }
        }
    }
}

/// Handle to the polling task.
pub struct HealthMonitor {
    state: Arc<RwLock<HealthSnapshot>>,
    updates: watch::Receiver<HealthSnapshot>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    /// Starts polling on the current tokio runtime.
    pub fn spawn(client: ApiClient, interval: Duration) -> Self {
        let state = Arc::new(RwLock::new(HealthSnapshot::default()));
        let (tx, updates) = watch::channel(HealthSnapshot::default());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(target: "health", "Health monitor started ({:?} interval)", interval);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {}
                }

                let snapshot = tokio::select! {
                    _ = &mut shutdown_rx => break,
                    snapshot = check_once(&client) => snapshot,
                };

                let previous = task_state.read().status;
                if previous != snapshot.status {
                    tracing::info!(target: "health", "API status changed: {} -> {}", previous, snapshot.status);
                }
                *task_state.write() = snapshot.clone();
                // receivers may all be gone; the shared state is still updated
                let _ = tx.send(snapshot);
            }

            tracing::info!(target: "health", "Health monitor stopped");
        });

        Self {
            state,
            updates,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> HealthSnapshot {
        self.state.read().clone()
    }

    /// A receiver that is notified after every completed check.
    pub fn subscribe(&self) -> watch::Receiver<HealthSnapshot> {
        self.updates.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops polling and waits for the task to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(target: "health", "Health monitor task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        // Dropping the sender wakes the task, which then exits on its own.
        self.shutdown.take();
    }
}
