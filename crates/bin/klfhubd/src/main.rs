//! # klfhubd — klfhub daemon
//!
//! Composition root that wires the discovery stack together.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file + env overrides)
//! - Initialize tracing
//! - Construct the in-process discovery registry
//! - Construct the handler factory and the bridge handler backed by the
//!   virtual directory
//! - Log registry notices as they arrive
//! - Handle graceful shutdown (ctrl-c) and dismantle the handler
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio_stream::StreamExt as _;
use tokio_stream::wrappers::BroadcastStream;

use klfhub_adapter_virtual::VirtualDirectory;
use klfhub_app::ports::RegistryNotice;
use klfhub_app::registry::InProcessRegistry;
use klfhub_app::services::factory::HandlerFactory;
use klfhub_domain::constants::BRIDGE_TYPE;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let registry = Arc::new(InProcessRegistry::new(256));
    tokio::spawn(log_notices(BroadcastStream::new(registry.subscribe())));

    let directory = if config.directory.seed_demo {
        VirtualDirectory::with_demo_inventory()
    } else {
        VirtualDirectory::new()
    };

    let factory = HandlerFactory::new(Arc::clone(&registry), config.scan_config());
    let mut handler = factory.create_handler(BRIDGE_TYPE, config.bridge_value(), directory)?;

    tracing::info!(bridge = %config.bridge.name, "klfhubd running, press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    factory.remove_handler(&mut handler);
    tracing::info!(registered = registry.len(), "klfhubd stopped");

    Ok(())
}

/// Forward registry notices to the log until the registry is dropped.
async fn log_notices(mut notices: BroadcastStream<RegistryNotice>) {
    while let Some(notice) = notices.next().await {
        match notice {
            Ok(RegistryNotice::Discovered(discovery)) => {
                tracing::info!(
                    key = %discovery.key(),
                    kind = %discovery.kind(),
                    name = discovery.property().value(),
                    "device discovered"
                );
            }
            Ok(RegistryNotice::Retired(key)) => {
                tracing::info!(%key, "device retired");
            }
            Err(err) => {
                tracing::warn!(%err, "registry notice stream lagged");
            }
        }
    }
}
