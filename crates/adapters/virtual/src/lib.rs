//! # klfhub-adapter-virtual
//!
//! Simulated KLF200 inventory for demos and tests.
//!
//! ## Demo inventory
//!
//! | Kind | Id | Display name |
//! |------|----|--------------|
//! | Scene | `1` | `Good Morning` |
//! | Scene | `2` | `Leaving Home` |
//! | Scene | `3` | `All Shutters Down` |
//! | Actuator | `0` | `56:23:3E:26:0C:1B:00:10` |
//! | Actuator | `1` | `53:09:40:5A:0C:2A:05:64` |
//!
//! ## Dependency rule
//!
//! Depends on `klfhub-app` (port traits) and `klfhub-domain` only.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use klfhub_app::ports::DeviceDirectory;
use klfhub_domain::device::{Actuator, Scene};
use klfhub_domain::error::HubError;
use klfhub_domain::id::{ActuatorId, SceneId};

/// Cloneable in-memory [`DeviceDirectory`] that simulates a KLF200 bridge.
///
/// All clones share one inventory, so a demo or test can mutate the
/// inventory while a discovery service holds its own clone. Snapshots are
/// copies — mutating the directory after a snapshot was taken does not
/// change the snapshot.
#[derive(Clone, Default)]
pub struct VirtualDirectory {
    inner: Arc<Mutex<Inventory>>,
}

#[derive(Default)]
struct Inventory {
    scenes: BTreeMap<SceneId, Scene>,
    actuators: BTreeMap<ActuatorId, Actuator>,
}

impl VirtualDirectory {
    /// Empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory seeded with a typical set of scenes and actuators.
    #[must_use]
    pub fn with_demo_inventory() -> Self {
        let directory = Self::new();
        directory.put_scene(Scene::new("1", "Good Morning"));
        directory.put_scene(Scene::new("2", "Leaving Home"));
        directory.put_scene(Scene::new("3", "All Shutters Down"));
        directory.put_actuator(Actuator::new("0", "56:23:3E:26:0C:1B:00:10"));
        directory.put_actuator(Actuator::new("1", "53:09:40:5A:0C:2A:05:64"));
        directory
    }

    /// Insert or replace a scene.
    pub fn put_scene(&self, scene: Scene) {
        self.lock().scenes.insert(scene.id.clone(), scene);
    }

    /// Remove a scene; returns whether it was present.
    pub fn remove_scene(&self, id: &SceneId) -> bool {
        self.lock().scenes.remove(id).is_some()
    }

    /// Insert or replace an actuator.
    pub fn put_actuator(&self, actuator: Actuator) {
        self.lock().actuators.insert(actuator.id.clone(), actuator);
    }

    /// Remove an actuator; returns whether it was present.
    pub fn remove_actuator(&self, id: &ActuatorId) -> bool {
        self.lock().actuators.remove(id).is_some()
    }

    /// Number of scenes currently in the inventory.
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.lock().scenes.len()
    }

    /// Number of actuators currently in the inventory.
    #[must_use]
    pub fn actuator_count(&self) -> usize {
        self.lock().actuators.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceDirectory for VirtualDirectory {
    fn scenes(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<SceneId, Scene>, HubError>> + Send {
        let snapshot = self.lock().scenes.clone();
        async move { Ok(snapshot) }
    }

    fn actuators(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<ActuatorId, Actuator>, HubError>> + Send {
        let snapshot = self.lock().actuators.clone();
        async move { Ok(snapshot) }
    }
}
