//! Bridge handler — owns the connection configuration and the discovery
//! subsystem for one KLF200 bridge.

use serde::Deserialize;

use klfhub_domain::category::HandlerCategory;
use klfhub_domain::id::{BridgeId, HandlerId};

use crate::ports::{DeviceDirectory, DiscoveryRegistry};
use crate::services::discovery::{DiscoveryService, ScanConfig};

/// Connection parameters for a KLF200 bridge.
///
/// Deserialized from the opaque configuration value handed to the handler
/// factory; every field falls back to the vendor default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Display name for this bridge.
    pub name: String,
    /// Hostname or IP address of the bridge.
    pub host: String,
    /// TCP port of the bridge API.
    pub port: u16,
    /// API password (the vendor ships a well-known default).
    pub password: String,
    /// Per-request timeout in milliseconds.
    pub timeout_msecs: u64,
    /// Number of retries per request.
    pub retries: u8,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            name: "KLF200".to_string(),
            host: "192.168.1.1".to_string(),
            port: 80,
            password: "velux123".to_string(),
            timeout_msecs: 2000,
            retries: 3,
        }
    }
}

/// Handler for one KLF200 bridge.
///
/// The attached [`DiscoveryService`] is constructed with this handler's
/// bridge identity and lives exactly as long as the handler's registration:
/// the factory starts it on creation and stops it on removal.
pub struct BridgeHandler<D, R> {
    id: HandlerId,
    bridge: BridgeId,
    config: BridgeConfig,
    discovery: DiscoveryService<D, R>,
}

impl<D, R> BridgeHandler<D, R> {
    /// Identity of this handler (keys its factory registration).
    #[must_use]
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Identity of the bridge this handler manages.
    #[must_use]
    pub fn bridge_id(&self) -> BridgeId {
        self.bridge
    }

    /// Connection parameters for the bridge.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The discovery subsystem attached to this handler.
    #[must_use]
    pub fn discovery(&self) -> &DiscoveryService<D, R> {
        &self.discovery
    }
}

impl<D, R> BridgeHandler<D, R>
where
    D: DeviceDirectory + Clone + Send + Sync + 'static,
    R: DiscoveryRegistry + Clone + Send + Sync + 'static,
{
    pub(crate) fn new(config: BridgeConfig, directory: D, registry: R, scan: ScanConfig) -> Self {
        let bridge = BridgeId::new();
        Self {
            id: HandlerId::new(),
            bridge,
            config,
            discovery: DiscoveryService::new(bridge, directory, registry, scan),
        }
    }

    pub(crate) fn start_discovery(&mut self) {
        self.discovery.start();
    }

    pub(crate) fn stop_discovery(&mut self) {
        self.discovery.stop();
    }
}

/// A handler constructed by the
/// [`HandlerFactory`](crate::services::factory::HandlerFactory).
///
/// Scene and actuator handlers are pending; the enum keeps factory dispatch
/// exhaustive when they land.
#[non_exhaustive]
pub enum Handler<D, R> {
    /// Handler for the gateway itself.
    Bridge(BridgeHandler<D, R>),
}

impl<D, R> Handler<D, R> {
    /// Identity of the underlying handler.
    #[must_use]
    pub fn id(&self) -> HandlerId {
        match self {
            Self::Bridge(handler) => handler.id(),
        }
    }

    /// Category of the underlying handler.
    #[must_use]
    pub fn category(&self) -> HandlerCategory {
        match self {
            Self::Bridge(_) => HandlerCategory::Bridge,
        }
    }

    /// The bridge handler, when this is one.
    #[must_use]
    pub fn as_bridge(&self) -> Option<&BridgeHandler<D, R>> {
        match self {
            Self::Bridge(handler) => Some(handler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fall_back_to_vendor_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.host, "192.168.1.1");
        assert_eq!(config.port, 80);
        assert_eq!(config.password, "velux123");
        assert_eq!(config.timeout_msecs, 2000);
        assert_eq!(config.retries, 3);
    }

    #[test]
    fn should_deserialize_partial_config_with_defaults() {
        let config: BridgeConfig =
            serde_json::from_value(serde_json::json!({"host": "10.0.0.7", "port": 51200}))
                .unwrap();
        assert_eq!(config.host, "10.0.0.7");
        assert_eq!(config.port, 51200);
        assert_eq!(config.password, "velux123");
    }

    #[test]
    fn should_reject_malformed_config_value() {
        let result: Result<BridgeConfig, _> =
            serde_json::from_value(serde_json::json!({"port": "eighty"}));
        assert!(result.is_err());
    }
}
