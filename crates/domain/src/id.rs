//! Typed identifier newtypes.
//!
//! Bridge and handler identities are random UUIDs minted by this core.
//! Scene and actuator identifiers are opaque strings reported by the bridge,
//! stable across scans; they are `Ord` so inventory snapshots can live in
//! `BTreeMap`s with deterministic iteration order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_uuid_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Mint a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

macro_rules! define_bridge_reported_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier as reported by the bridge.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Access the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

define_uuid_id!(
    /// Identity of the bridge that owns a discovered device; scopes
    /// [`DiscoveryKey`](crate::discovery::DiscoveryKey)s so two bridges
    /// never collide.
    BridgeId
);

define_uuid_id!(
    /// Identity of a handler created by the factory; keys its registration
    /// record.
    HandlerId
);

define_bridge_reported_id!(
    /// Bridge-assigned identifier of a [`Scene`](crate::device::Scene).
    SceneId
);

define_bridge_reported_id!(
    /// Bridge-assigned identifier of an [`Actuator`](crate::device::Actuator).
    ActuatorId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = BridgeId::new();
        let b = BridgeId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = HandlerId::new();
        let text = id.to_string();
        let parsed: HandlerId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let id = BridgeId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: BridgeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_return_error_when_parsing_invalid_uuid() {
        let result = BridgeId::from_str("not-a-uuid");
        assert!(result.is_err());
    }

    #[test]
    fn should_keep_raw_scene_id_verbatim() {
        let id = SceneId::new("V42/0/12");
        assert_eq!(id.as_str(), "V42/0/12");
        assert_eq!(id.to_string(), "V42/0/12");
    }

    #[test]
    fn should_serialize_bridge_reported_id_as_plain_string() {
        let id = ActuatorId::from("0");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0\"");
    }

    #[test]
    fn should_order_bridge_reported_ids_lexicographically() {
        let a = SceneId::from("1");
        let b = SceneId::from("2");
        assert!(a < b);
    }
}
