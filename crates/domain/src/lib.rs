//! # thermopanel-domain
//!
//! Pure domain model for the thermopanel thermostat UI.
//!
//! ## Responsibilities
//! - Foundational types: the typed device identifier and error conventions
//! - Define the **host vocabulary** (service, variable, action, and
//!   parameter names the host controller understands)
//! - Define the static **menu option tables** driving the panel selectors
//! - Define the **persisted string formats** the host stores opaquely on
//!   behalf of the panel (sensor list, schedule window)
//! - Device descriptors and the room-grouped display ordering used by the
//!   configuration menus
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod device;
pub mod menu;
pub mod schedule;
pub mod sensors;
pub mod vocab;
