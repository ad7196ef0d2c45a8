//! Handler factory — constructs and dismantles thing handlers by category.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use klfhub_domain::category::HandlerCategory;
use klfhub_domain::error::HubError;
use klfhub_domain::id::HandlerId;

use crate::ports::{DeviceDirectory, DiscoveryRegistry};
use crate::services::discovery::ScanConfig;
use crate::services::handler::{BridgeConfig, BridgeHandler, Handler};

/// Creates typed handlers from category tags and opaque configuration.
///
/// Creating a bridge handler attaches and starts a discovery service; its
/// registration, keyed by handler identity, is tracked here and written
/// exactly once per handler. Create/remove are called from the owner's
/// single lifecycle thread; the plain mutex only guards the registration
/// set.
pub struct HandlerFactory<R> {
    registry: R,
    scan: ScanConfig,
    registrations: Mutex<HashSet<HandlerId>>,
}

impl<R> HandlerFactory<R>
where
    R: DiscoveryRegistry + Clone + Send + Sync + 'static,
{
    /// Create a factory publishing discoveries to `registry`.
    pub fn new(registry: R, scan: ScanConfig) -> Self {
        Self {
            registry,
            scan,
            registrations: Mutex::new(HashSet::new()),
        }
    }

    /// Whether `tag` names a category this factory knows about.
    ///
    /// Scene and actuator tags are supported at the type level even though
    /// their construction is still pending.
    #[must_use]
    pub fn supports(&self, tag: &str) -> bool {
        HandlerCategory::from_tag(tag).is_some()
    }

    /// Construct a handler for the given category tag.
    ///
    /// For a bridge, `config` is deserialized as [`BridgeConfig`] and the
    /// created handler gets a running discovery service scoped to it.
    ///
    /// # Errors
    ///
    /// - [`HubError::UnsupportedCategory`] when `tag` is outside every
    ///   supported set;
    /// - [`HubError::NotImplemented`] for scene and actuator handlers;
    /// - [`HubError::Configuration`] when `config` does not deserialize.
    #[tracing::instrument(skip(self, config, directory))]
    pub fn create_handler<D>(
        &self,
        tag: &str,
        config: serde_json::Value,
        directory: D,
    ) -> Result<Handler<D, R>, HubError>
    where
        D: DeviceDirectory + Clone + Send + Sync + 'static,
    {
        let category = HandlerCategory::from_tag(tag)
            .ok_or_else(|| HubError::UnsupportedCategory(tag.to_string()))?;

        match category {
            HandlerCategory::Bridge => {
                let config: BridgeConfig = serde_json::from_value(config)?;
                let mut handler =
                    BridgeHandler::new(config, directory, self.registry.clone(), self.scan);
                handler.start_discovery();
                self.lock_registrations().insert(handler.id());
                tracing::debug!(
                    handler = %handler.id(),
                    bridge = %handler.bridge_id(),
                    "bridge handler created, discovery attached"
                );
                Ok(Handler::Bridge(handler))
            }
            HandlerCategory::Scene | HandlerCategory::Actuator => {
                Err(HubError::NotImplemented(category))
            }
        }
    }

    /// Dismantle a handler previously created by this factory.
    ///
    /// For a bridge handler this stops the attached discovery service, so it
    /// cannot act on a stale bridge reference afterwards. Removing a handler
    /// twice, or one that was never registered, is a no-op.
    #[tracing::instrument(skip(self, handler))]
    pub fn remove_handler<D>(&self, handler: &mut Handler<D, R>)
    where
        D: DeviceDirectory + Clone + Send + Sync + 'static,
    {
        match handler {
            Handler::Bridge(bridge) => {
                if self.lock_registrations().remove(&bridge.id()) {
                    bridge.stop_discovery();
                    tracing::debug!(handler = %bridge.id(), "discovery deregistered");
                } else {
                    tracing::trace!(handler = %bridge.id(), "handler already removed");
                }
            }
        }
    }

    fn lock_registrations(&self) -> MutexGuard<'_, HashSet<HandlerId>> {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
