//! Device directory port — the bridge-reported inventory.

use std::collections::BTreeMap;
use std::future::Future;

use klfhub_domain::device::{Actuator, Scene};
use klfhub_domain::error::HubError;
use klfhub_domain::id::{ActuatorId, SceneId};

/// Read-only access to the inventory a bridge currently knows about.
///
/// Both methods return **point-in-time snapshots**: the caller takes no
/// ownership of bridge state and never mutates it through this port.
/// `BTreeMap` keeps the iteration order of a given snapshot stable, which in
/// turn keeps the emitted discovery sequence stable.
pub trait DeviceDirectory {
    /// Snapshot of the scenes currently stored on the bridge.
    fn scenes(&self)
    -> impl Future<Output = Result<BTreeMap<SceneId, Scene>, HubError>> + Send;

    /// Snapshot of the actuators currently managed by the bridge.
    fn actuators(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<ActuatorId, Actuator>, HubError>> + Send;
}

impl<T: DeviceDirectory + Send + Sync> DeviceDirectory for std::sync::Arc<T> {
    fn scenes(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<SceneId, Scene>, HubError>> + Send {
        (**self).scenes()
    }

    fn actuators(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<ActuatorId, Actuator>, HubError>> + Send {
        (**self).actuators()
    }
}
