//! # klfhub-domain
//!
//! Pure domain model for the klfhub KLF200 discovery core.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define the binding-wide **constants** (category tags, channel ids,
//!   discovery property keys)
//! - Define **inventory records** (scenes, actuators) as reported by a bridge
//! - Define **discovery events** and their bridge-scoped keys
//! - Contain the **label sanitization** rule and the pure snapshot-to-events
//!   scan transform
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod category;
pub mod constants;
pub mod device;
pub mod discovery;
pub mod error;
pub mod id;
pub mod label;
