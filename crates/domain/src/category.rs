//! Device and handler categories.
//!
//! [`HandlerCategory`] is the closed set of categories the handler factory
//! dispatches on; [`DeviceKind`] is the subset a discovery event may carry
//! (a bridge is never discovered through its own inventory).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BRIDGE_TYPE, THING_ACTUATOR, THING_SCENE};

/// Category of a device surfaced by an inventory scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// A named multi-actuator action sequence stored on the bridge.
    Scene,
    /// An individually controllable device managed by the bridge.
    Actuator,
}

impl DeviceKind {
    /// The category tag for this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Scene => THING_SCENE,
            Self::Actuator => THING_ACTUATOR,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Category driving handler-factory dispatch.
///
/// Every category maps to exactly one constructor; tags outside this set are
/// rejected with an explicit error, never silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerCategory {
    /// The gateway device itself.
    Bridge,
    /// A scene stored on a bridge.
    Scene,
    /// An actuator managed by a bridge.
    Actuator,
}

impl HandlerCategory {
    /// The category tag for this category.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bridge => BRIDGE_TYPE,
            Self::Scene => THING_SCENE,
            Self::Actuator => THING_ACTUATOR,
        }
    }

    /// Parse a category tag; `None` when the tag is outside every supported
    /// set.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            BRIDGE_TYPE => Some(Self::Bridge),
            THING_SCENE => Some(Self::Scene),
            THING_ACTUATOR => Some(Self::Actuator),
            _ => None,
        }
    }
}

impl fmt::Display for HandlerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<DeviceKind> for HandlerCategory {
    fn from(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::Scene => Self::Scene,
            DeviceKind::Actuator => Self::Actuator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SUPPORTED_BRIDGE_TYPES, SUPPORTED_THING_TYPES};

    #[test]
    fn should_roundtrip_every_category_through_its_tag() {
        for category in [
            HandlerCategory::Bridge,
            HandlerCategory::Scene,
            HandlerCategory::Actuator,
        ] {
            assert_eq!(HandlerCategory::from_tag(category.tag()), Some(category));
        }
    }

    #[test]
    fn should_parse_every_supported_tag() {
        for tag in SUPPORTED_BRIDGE_TYPES.iter().chain(&SUPPORTED_THING_TYPES) {
            assert!(HandlerCategory::from_tag(tag).is_some());
        }
    }

    #[test]
    fn should_reject_unknown_tag() {
        assert_eq!(HandlerCategory::from_tag("heating"), None);
        assert_eq!(HandlerCategory::from_tag(""), None);
    }

    #[test]
    fn should_convert_device_kind_into_handler_category() {
        assert_eq!(
            HandlerCategory::from(DeviceKind::Scene),
            HandlerCategory::Scene
        );
        assert_eq!(
            HandlerCategory::from(DeviceKind::Actuator),
            HandlerCategory::Actuator
        );
    }

    #[test]
    fn should_display_as_tag() {
        assert_eq!(DeviceKind::Scene.to_string(), "scene");
        assert_eq!(HandlerCategory::Bridge.to_string(), "klf200");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let json = serde_json::to_string(&HandlerCategory::Actuator).unwrap();
        assert_eq!(json, "\"actuator\"");
        let parsed: HandlerCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, HandlerCategory::Actuator);
    }
}
