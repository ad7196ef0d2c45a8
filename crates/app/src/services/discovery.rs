//! Discovery service — periodic inventory scans against one bridge.
//!
//! [`DiscoveryService`] owns the scan loop for a single bridge: it snapshots
//! the bridge's [`DeviceDirectory`], converts the snapshot into discovery
//! events, publishes them to the [`DiscoveryRegistry`], and retires keys
//! that disappeared since the previous completed cycle. One scan runs at a
//! time per service — [`scan_now`](DiscoveryService::scan_now) and the
//! background worker share a mutex.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use klfhub_domain::device::{Actuator, Scene};
use klfhub_domain::discovery::{DiscoveryKey, scan_snapshot};
use klfhub_domain::error::HubError;
use klfhub_domain::id::{ActuatorId, BridgeId, SceneId};

use crate::ports::{DeviceDirectory, DiscoveryRegistry};

type InventorySnapshot = (BTreeMap<SceneId, Scene>, BTreeMap<ActuatorId, Actuator>);

/// Scan pacing and budget.
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Delay between two background scan cycles.
    pub interval: Duration,
    /// Wall-clock budget for taking a directory snapshot.
    pub budget: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            budget: Duration::from_secs(300),
        }
    }
}

/// Outcome of a single scan cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Number of discovery events published this cycle.
    pub discovered: usize,
    /// Number of stale keys retired this cycle.
    pub retired: usize,
    /// Whether the cycle was abandoned because the snapshot exceeded its
    /// budget.
    pub timed_out: bool,
}

impl ScanSummary {
    fn timed_out() -> Self {
        Self {
            timed_out: true,
            ..Self::default()
        }
    }
}

/// Keys seen by the previous completed cycle; a timed-out cycle leaves this
/// untouched so it retires nothing.
#[derive(Default)]
struct ScanState {
    last_seen: HashSet<DiscoveryKey>,
}

/// Scan logic shared between `scan_now` and the background worker.
struct ScanEngine<D, R> {
    bridge: BridgeId,
    directory: D,
    registry: R,
    budget: Duration,
    state: Arc<Mutex<ScanState>>,
}

impl<D: Clone, R: Clone> Clone for ScanEngine<D, R> {
    fn clone(&self) -> Self {
        Self {
            bridge: self.bridge,
            directory: self.directory.clone(),
            registry: self.registry.clone(),
            budget: self.budget,
            state: Arc::clone(&self.state),
        }
    }
}

impl<D, R> ScanEngine<D, R>
where
    D: DeviceDirectory + Send + Sync,
    R: DiscoveryRegistry + Send + Sync,
{
    /// Snapshot both inventories within the scan budget.
    async fn snapshot(&self) -> Result<InventorySnapshot, HubError> {
        tokio::time::timeout(self.budget, async {
            let scenes = self.directory.scenes().await?;
            let actuators = self.directory.actuators().await?;
            Ok((scenes, actuators))
        })
        .await
        .map_err(|_elapsed| HubError::ScanTimeout {
            budget: self.budget,
        })?
    }

    async fn scan(&self) -> Result<ScanSummary, HubError> {
        let mut state = self.state.lock().await;

        let (scenes, actuators) = match self.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(HubError::ScanTimeout { budget }) => {
                tracing::warn!(
                    bridge = %self.bridge,
                    budget_secs = budget.as_secs(),
                    "directory snapshot exceeded scan budget, treating as empty cycle"
                );
                return Ok(ScanSummary::timed_out());
            }
            Err(err) => return Err(err),
        };

        let events = scan_snapshot(self.bridge, &scenes, &actuators);
        let discovered = events.len();
        let mut seen = HashSet::with_capacity(events.len());

        for event in events {
            tracing::trace!(bridge = %self.bridge, label = event.label(), "publishing discovery");
            seen.insert(event.key());
            self.registry.publish(event).await?;
        }

        let stale: Vec<DiscoveryKey> = state.last_seen.difference(&seen).cloned().collect();
        for key in &stale {
            tracing::debug!(%key, "retiring stale discovery");
            self.registry.retire(key).await?;
        }

        let retired = stale.len();
        state.last_seen = seen;

        Ok(ScanSummary {
            discovered,
            retired,
            timed_out: false,
        })
    }
}

struct Worker {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Discovery subsystem scoped to a single bridge.
///
/// Constructed with an explicit bridge reference — there is no shared or
/// global default. `start`/`stop` are explicit and idempotent; dropping the
/// service stops the worker, so a dismantled bridge handler can never scan
/// again.
pub struct DiscoveryService<D, R> {
    engine: ScanEngine<D, R>,
    interval: Duration,
    worker: Option<Worker>,
}

impl<D, R> DiscoveryService<D, R> {
    /// The bridge this service scans.
    #[must_use]
    pub fn bridge(&self) -> BridgeId {
        self.engine.bridge
    }

    /// Whether the background worker is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

impl<D, R> DiscoveryService<D, R>
where
    D: DeviceDirectory + Clone + Send + Sync + 'static,
    R: DiscoveryRegistry + Clone + Send + Sync + 'static,
{
    /// Create a service for the given bridge, directory, and registry.
    pub fn new(bridge: BridgeId, directory: D, registry: R, config: ScanConfig) -> Self {
        Self {
            engine: ScanEngine {
                bridge,
                directory,
                registry,
                budget: config.budget,
                state: Arc::new(Mutex::new(ScanState::default())),
            },
            interval: config.interval,
            worker: None,
        }
    }

    /// Run one scan cycle immediately.
    ///
    /// Serialized against the background worker: only one scan runs at a
    /// time per service. A snapshot that exceeds the budget is reported via
    /// [`ScanSummary::timed_out`] and retried on the next scheduled cycle;
    /// it retires nothing.
    ///
    /// # Errors
    ///
    /// Returns a directory or registry error — never a timeout.
    #[tracing::instrument(skip(self), fields(bridge = %self.engine.bridge))]
    pub async fn scan_now(&self) -> Result<ScanSummary, HubError> {
        self.engine.scan().await
    }

    /// Start the background worker (no-op when already running).
    ///
    /// The worker runs an immediate first cycle, then rescans every
    /// configured interval until [`stop`](Self::stop) is called.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }

        let (shutdown, mut signal) = watch::channel(false);
        let engine = self.engine.clone();
        let interval = self.interval;

        let task = tokio::spawn(async move {
            loop {
                if let Err(err) = engine.scan().await {
                    tracing::warn!(
                        %err,
                        bridge = %engine.bridge,
                        "discovery scan failed, retrying next interval"
                    );
                }
                tokio::select! {
                    _ = signal.changed() => break,
                    () = tokio::time::sleep(interval) => {}
                }
            }
        });

        tracing::debug!(bridge = %self.engine.bridge, "discovery worker started");
        self.worker = Some(Worker { shutdown, task });
    }

    /// Stop the background worker (no-op when not running).
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.shutdown.send(true);
            worker.task.abort();
            tracing::debug!(bridge = %self.engine.bridge, "discovery worker stopped");
        }
    }
}

impl<D, R> Drop for DiscoveryService<D, R> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.shutdown.send(true);
            worker.task.abort();
        }
    }
}
