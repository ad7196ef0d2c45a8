//! # klfhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports):
//!   - `DeviceDirectory` — bridge-reported inventory snapshots
//!   - `DiscoveryRegistry` — sink for discovered-device records
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DiscoveryService` — periodic and on-demand inventory scans
//!   - `HandlerFactory` — create/remove typed handlers by category tag
//! - Provide **in-process infrastructure** (discovery registry) that doesn't
//!   need IO
//!
//! ## Dependency rule
//! Depends on `klfhub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod ports;
pub mod registry;
pub mod services;
