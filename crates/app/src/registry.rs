//! In-process discovery registry backed by a tokio broadcast channel.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use klfhub_domain::discovery::{Discovery, DiscoveryKey};
use klfhub_domain::error::HubError;

use crate::ports::{DiscoveryRegistry, RegistryNotice};

/// A discovery record retained by the registry.
#[derive(Debug, Clone)]
pub struct DiscoveredRecord {
    pub discovery: Discovery,
    /// When the key was first published.
    pub first_seen: DateTime<Utc>,
    /// When the key was most recently published.
    pub last_seen: DateTime<Utc>,
}

/// In-process [`DiscoveryRegistry`] with broadcast notices.
///
/// Records are deduplicated by [`DiscoveryKey`]: publishing a known key
/// refreshes its `last_seen` timestamp (and the stored record) without
/// announcing it a second time. Publishing succeeds even when there are no
/// active subscribers — the notice is simply dropped.
pub struct InProcessRegistry {
    records: Mutex<HashMap<DiscoveryKey, DiscoveredRecord>>,
    sender: broadcast::Sender<RegistryNotice>,
}

impl InProcessRegistry {
    /// Create a registry with the given notice-channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            records: Mutex::new(HashMap::new()),
            sender,
        }
    }

    /// Subscribe to registry notices.
    ///
    /// Returns a receiver that will get all notices emitted *after* the
    /// subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryNotice> {
        self.sender.subscribe()
    }

    /// Current records, ordered by key for deterministic inspection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DiscoveredRecord> {
        let mut records: Vec<_> = self.lock().values().cloned().collect();
        records.sort_by_key(|record| record.discovery.key());
        records
    }

    /// Whether the given key is currently registered.
    #[must_use]
    pub fn contains(&self, key: &DiscoveryKey) -> bool {
        self.lock().contains_key(key)
    }

    /// Number of registered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<DiscoveryKey, DiscoveredRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiscoveryRegistry for InProcessRegistry {
    fn publish(&self, discovery: Discovery) -> impl Future<Output = Result<(), HubError>> + Send {
        let now = Utc::now();
        let key = discovery.key();

        let announced = {
            let mut records = self.lock();
            match records.entry(key) {
                Entry::Occupied(mut occupied) => {
                    let record = occupied.get_mut();
                    record.discovery = discovery.clone();
                    record.last_seen = now;
                    false
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(DiscoveredRecord {
                        discovery: discovery.clone(),
                        first_seen: now,
                        last_seen: now,
                    });
                    true
                }
            }
        };

        if announced {
            let _ = self.sender.send(RegistryNotice::Discovered(discovery));
        }

        async { Ok(()) }
    }

    fn retire(&self, key: &DiscoveryKey) -> impl Future<Output = Result<(), HubError>> + Send {
        let removed = self.lock().remove(key).is_some();
        if removed {
            let _ = self.sender.send(RegistryNotice::Retired(key.clone()));
        }

        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klfhub_domain::id::BridgeId;

    #[tokio::test]
    async fn should_register_and_announce_new_discovery() {
        let registry = InProcessRegistry::new(16);
        let mut notices = registry.subscribe();

        let discovery = Discovery::scene(BridgeId::new(), "Good Morning");
        registry.publish(discovery.clone()).await.unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&discovery.key()));
        assert_eq!(
            notices.recv().await.unwrap(),
            RegistryNotice::Discovered(discovery)
        );
    }

    #[tokio::test]
    async fn should_deduplicate_republished_key_without_second_notice() {
        let registry = InProcessRegistry::new(16);
        let mut notices = registry.subscribe();

        let discovery = Discovery::scene(BridgeId::new(), "Good Morning");
        registry.publish(discovery.clone()).await.unwrap();
        registry.publish(discovery.clone()).await.unwrap();

        assert_eq!(registry.len(), 1);
        assert!(notices.recv().await.is_ok());
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_refresh_last_seen_but_keep_first_seen() {
        let registry = InProcessRegistry::new(16);
        let discovery = Discovery::actuator(BridgeId::new(), "V42/0/12");

        registry.publish(discovery.clone()).await.unwrap();
        let before = registry.snapshot()[0].clone();

        registry.publish(discovery).await.unwrap();
        let after = registry.snapshot()[0].clone();

        assert_eq!(after.first_seen, before.first_seen);
        assert!(after.last_seen >= before.last_seen);
    }

    #[tokio::test]
    async fn should_retire_known_key_with_notice() {
        let registry = InProcessRegistry::new(16);
        let discovery = Discovery::scene(BridgeId::new(), "Leaving Home");
        registry.publish(discovery.clone()).await.unwrap();

        let mut notices = registry.subscribe();
        registry.retire(&discovery.key()).await.unwrap();

        assert!(registry.is_empty());
        assert_eq!(
            notices.recv().await.unwrap(),
            RegistryNotice::Retired(discovery.key())
        );
    }

    #[tokio::test]
    async fn should_ignore_retire_of_unknown_key() {
        let registry = InProcessRegistry::new(16);
        let mut notices = registry.subscribe();

        let key = Discovery::scene(BridgeId::new(), "Ghost").key();
        registry.retire(&key).await.unwrap();
        registry.retire(&key).await.unwrap();

        assert!(registry.is_empty());
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let registry = InProcessRegistry::new(16);
        let discovery = Discovery::scene(BridgeId::new(), "Good Night");
        assert!(registry.publish(discovery).await.is_ok());
    }

    #[tokio::test]
    async fn should_keep_records_from_distinct_bridges_apart() {
        let registry = InProcessRegistry::new(16);

        registry
            .publish(Discovery::scene(BridgeId::new(), "Good Morning"))
            .await
            .unwrap();
        registry
            .publish(Discovery::scene(BridgeId::new(), "Good Morning"))
            .await
            .unwrap();

        assert_eq!(registry.len(), 2);
    }
}
