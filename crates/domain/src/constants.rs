//! Binding-wide constants: category tags, channel ids, and discovery
//! property keys.

/// Binding identifier, the first segment of every discovery key.
pub const BINDING_ID: &str = "velux";

/// Category tag of the supported gateway device.
pub const BRIDGE_TYPE: &str = "klf200";
/// Category tag of a scene stored on the bridge.
pub const THING_SCENE: &str = "scene";
/// Category tag of an actuator managed by the bridge.
pub const THING_ACTUATOR: &str = "actuator";

/// Category tags constructible as bridge handlers.
pub const SUPPORTED_BRIDGE_TYPES: [&str; 1] = [BRIDGE_TYPE];
/// Category tags of things attached to a bridge.
pub const SUPPORTED_THING_TYPES: [&str; 2] = [THING_SCENE, THING_ACTUATOR];

// Bridge channel ids
pub const CHANNEL_BRIDGE_STATUS: &str = "status";
pub const CHANNEL_BRIDGE_RELOAD: &str = "reload";
pub const CHANNEL_BRIDGE_TIMESTAMP: &str = "timestamp";
pub const CHANNEL_BRIDGE_DO_DETECTION: &str = "doDetection";
pub const CHANNEL_BRIDGE_FIRMWARE: &str = "firmware";
pub const CHANNEL_BRIDGE_IP_ADDRESS: &str = "ipAddress";
pub const CHANNEL_BRIDGE_PRODUCTS: &str = "products";
pub const CHANNEL_BRIDGE_SCENES: &str = "scenes";

// Scene channel ids
pub const CHANNEL_SCENE_ACTION: &str = "action";
pub const CHANNEL_SCENE_SILENT_MODE: &str = "silentMode";

// Actuator channel ids
pub const CHANNEL_ACTUATOR_SERIAL: &str = "serial";

/// Discovery property key carrying the raw scene name.
pub const PROPERTY_SCENE_NAME: &str = "sceneName";
/// Discovery property key carrying the actuator's product unique index.
pub const PROPERTY_ACTUATOR_NAME: &str = "actuatorName";

/// All channel ids, per owning category.
pub const BRIDGE_CHANNELS: [&str; 8] = [
    CHANNEL_BRIDGE_STATUS,
    CHANNEL_BRIDGE_RELOAD,
    CHANNEL_BRIDGE_TIMESTAMP,
    CHANNEL_BRIDGE_DO_DETECTION,
    CHANNEL_BRIDGE_FIRMWARE,
    CHANNEL_BRIDGE_IP_ADDRESS,
    CHANNEL_BRIDGE_PRODUCTS,
    CHANNEL_BRIDGE_SCENES,
];
pub const SCENE_CHANNELS: [&str; 2] = [CHANNEL_SCENE_ACTION, CHANNEL_SCENE_SILENT_MODE];
pub const ACTUATOR_CHANNELS: [&str; 1] = [CHANNEL_ACTUATOR_SERIAL];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn should_not_overlap_bridge_and_thing_tags() {
        for tag in SUPPORTED_THING_TYPES {
            assert!(!SUPPORTED_BRIDGE_TYPES.contains(&tag));
        }
    }

    #[test]
    fn should_keep_channel_ids_unique_per_category() {
        let bridge: HashSet<_> = BRIDGE_CHANNELS.iter().collect();
        assert_eq!(bridge.len(), BRIDGE_CHANNELS.len());

        let scene: HashSet<_> = SCENE_CHANNELS.iter().collect();
        assert_eq!(scene.len(), SCENE_CHANNELS.len());
    }
}
