//! # thermopanel-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the `HostClient` **port** every adapter must implement: the
//!   host controller contract (state reads, inventory, action dispatch,
//!   persisted configuration variables)
//! - Build the **view models** the HTTP adapter serializes: status widget,
//!   control panel, configuration panel
//! - Run the **debounced setpoint protocol** — the one stateful piece of
//!   this system — with explicit per-control state
//!
//! ## Dependency rule
//! Depends on `thermopanel-domain` only (plus `tokio` for the single-shot
//! debounce timers). Never imports adapter crates. Adapters depend on
//! *this* crate, not the reverse.

pub mod debounce;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
