//! Discovery events — the records emitted when scanning a bridge inventory.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::DeviceKind;
use crate::constants::{BINDING_ID, PROPERTY_ACTUATOR_NAME, PROPERTY_SCENE_NAME};
use crate::device::{Actuator, Scene};
use crate::id::{ActuatorId, BridgeId, SceneId};
use crate::label::sanitize;

/// The single property carried by a [`Discovery`].
///
/// Exactly one property is set per event: the raw scene name for scenes, the
/// product unique index for actuators. The enum makes both "exactly one" and
/// "key matches category" unrepresentable to violate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceProperty {
    SceneName(String),
    ActuatorName(String),
}

impl DeviceProperty {
    /// The wire-contract property key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::SceneName(_) => PROPERTY_SCENE_NAME,
            Self::ActuatorName(_) => PROPERTY_ACTUATOR_NAME,
        }
    }

    /// The raw display name the property carries.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::SceneName(name) | Self::ActuatorName(name) => name,
        }
    }

    /// The device kind this property implies.
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        match self {
            Self::SceneName(_) => DeviceKind::Scene,
            Self::ActuatorName(_) => DeviceKind::Actuator,
        }
    }
}

/// A discovered-device record, ready to publish to a discovery registry.
///
/// The label is always `sanitize(raw name)`; the two constructors are the
/// only way to build a value, so the derivation cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    bridge: BridgeId,
    label: String,
    property: DeviceProperty,
}

impl Discovery {
    /// Build the discovery record for a scene.
    #[must_use]
    pub fn scene(bridge: BridgeId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            bridge,
            label: sanitize(&name),
            property: DeviceProperty::SceneName(name),
        }
    }

    /// Build the discovery record for an actuator.
    #[must_use]
    pub fn actuator(bridge: BridgeId, unique_index: impl Into<String>) -> Self {
        let unique_index = unique_index.into();
        Self {
            bridge,
            label: sanitize(&unique_index),
            property: DeviceProperty::ActuatorName(unique_index),
        }
    }

    /// The bridge that owns the discovered device.
    #[must_use]
    pub fn bridge(&self) -> BridgeId {
        self.bridge
    }

    /// The sanitized display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The single property carried by this record.
    #[must_use]
    pub fn property(&self) -> &DeviceProperty {
        &self.property
    }

    /// The device kind of this record.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.property.kind()
    }

    /// The bridge-scoped registry key for this record.
    #[must_use]
    pub fn key(&self) -> DiscoveryKey {
        DiscoveryKey {
            bridge: self.bridge,
            kind: self.kind(),
            label: self.label.clone(),
        }
    }
}

/// Bridge-scoped deduplication key.
///
/// Includes the owning bridge, so two bridges reporting identical raw names
/// produce distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiscoveryKey {
    pub bridge: BridgeId,
    pub kind: DeviceKind,
    pub label: String,
}

impl fmt::Display for DiscoveryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{BINDING_ID}:{}:{}:{}", self.kind, self.bridge, self.label)
    }
}

/// Convert a point-in-time inventory snapshot into discovery events.
///
/// Emits one event per entry — scenes first in snapshot order, then
/// actuators in snapshot order. The transform is pure and bounded by the
/// snapshot sizes; it never mutates bridge state.
#[must_use]
pub fn scan_snapshot(
    bridge: BridgeId,
    scenes: &BTreeMap<SceneId, Scene>,
    actuators: &BTreeMap<ActuatorId, Actuator>,
) -> Vec<Discovery> {
    let mut events = Vec::with_capacity(scenes.len() + actuators.len());
    for scene in scenes.values() {
        events.push(Discovery::scene(bridge, scene.name.clone()));
    }
    for actuator in actuators.values() {
        events.push(Discovery::actuator(bridge, actuator.unique_index.clone()));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenes(entries: &[(&str, &str)]) -> BTreeMap<SceneId, Scene> {
        entries
            .iter()
            .map(|(id, name)| (SceneId::from(*id), Scene::new(*id, *name)))
            .collect()
    }

    fn actuators(entries: &[(&str, &str)]) -> BTreeMap<ActuatorId, Actuator> {
        entries
            .iter()
            .map(|(id, index)| (ActuatorId::from(*id), Actuator::new(*id, *index)))
            .collect()
    }

    #[test]
    fn should_emit_single_scene_event_with_sanitized_label() {
        let bridge = BridgeId::new();
        let events = scan_snapshot(bridge, &scenes(&[("s1", "Morning Light!")]), &BTreeMap::new());

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.kind(), DeviceKind::Scene);
        assert_eq!(event.label(), "Morning_Light_");
        assert_eq!(event.property().key(), "sceneName");
        assert_eq!(event.property().value(), "Morning Light!");
    }

    #[test]
    fn should_emit_one_event_per_snapshot_entry() {
        let bridge = BridgeId::new();
        let events = scan_snapshot(
            bridge,
            &scenes(&[("1", "Good Morning"), ("2", "Leaving Home")]),
            &actuators(&[("0", "56:23:3E:26:0C:1B:00:10")]),
        );
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn should_emit_scenes_before_actuators_in_snapshot_order() {
        let bridge = BridgeId::new();
        let events = scan_snapshot(
            bridge,
            &scenes(&[("2", "B"), ("1", "A")]),
            &actuators(&[("0", "X")]),
        );

        let labels: Vec<_> = events.iter().map(Discovery::label).collect();
        assert_eq!(labels, ["A", "B", "X"]);
    }

    #[test]
    fn should_set_actuator_property_from_unique_index() {
        let bridge = BridgeId::new();
        let events = scan_snapshot(
            bridge,
            &BTreeMap::new(),
            &actuators(&[("0", "56:23:3E:26:0C:1B:00:10")]),
        );

        let event = &events[0];
        assert_eq!(event.property().key(), "actuatorName");
        assert_eq!(event.property().value(), "56:23:3E:26:0C:1B:00:10");
        assert_eq!(event.label(), "56_23_3E_26_0C_1B_00_10");
    }

    #[test]
    fn should_scope_keys_by_bridge() {
        let first = Discovery::scene(BridgeId::new(), "Morning Light!");
        let second = Discovery::scene(BridgeId::new(), "Morning Light!");

        assert_eq!(first.label(), second.label());
        assert_ne!(first.key(), second.key());
    }

    #[test]
    fn should_tolerate_label_collisions_between_distinct_raw_names() {
        let bridge = BridgeId::new();
        let a = Discovery::scene(bridge, "Night?");
        let b = Discovery::scene(bridge, "Night!");

        assert_eq!(a.key(), b.key());
        assert_ne!(a.property().value(), b.property().value());
    }

    #[test]
    fn should_display_key_with_binding_prefix() {
        let discovery = Discovery::scene(BridgeId::new(), "Good Morning");
        let key = discovery.key();
        let text = key.to_string();

        assert!(text.starts_with("velux:scene:"));
        assert!(text.ends_with(":Good_Morning"));
    }

    #[test]
    fn should_roundtrip_discovery_through_serde_json() {
        let discovery = Discovery::actuator(BridgeId::new(), "V42/0/12");
        let json = serde_json::to_string(&discovery).unwrap();
        let parsed: Discovery = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, discovery);
    }
}
