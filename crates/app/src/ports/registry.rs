//! Discovery registry port — sink for discovered-device records.

use std::future::Future;

use klfhub_domain::discovery::{Discovery, DiscoveryKey};
use klfhub_domain::error::HubError;

/// Notice broadcast to registry subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryNotice {
    /// A device was seen for the first time.
    Discovered(Discovery),
    /// A previously discovered device is no longer present.
    Retired(DiscoveryKey),
}

/// Receives discovered-device records and a distinct "removed" signal.
///
/// The registry owns deduplication by [`DiscoveryKey`] across scan cycles:
/// re-publishing a known key must not announce it a second time, and
/// retiring an unknown key is a no-op.
pub trait DiscoveryRegistry {
    /// Publish a discovered device.
    fn publish(&self, discovery: Discovery) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Signal that a previously published key is no longer present.
    fn retire(&self, key: &DiscoveryKey) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<T: DiscoveryRegistry + Send + Sync> DiscoveryRegistry for std::sync::Arc<T> {
    fn publish(&self, discovery: Discovery) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).publish(discovery)
    }

    fn retire(&self, key: &DiscoveryKey) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).retire(key)
    }
}
