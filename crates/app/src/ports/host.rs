//! Host controller port.
//!
//! The host automation controller owns all real work: device state,
//! configuration persistence, and command execution. This trait is the
//! panel's only window into it. Adapters implement it against a live
//! controller or an in-memory simulation; the panel never touches a host
//! API object directly.

use std::future::Future;

use thermopanel_domain::device::DeviceDescriptor;
use thermopanel_domain::error::PanelError;
use thermopanel_domain::id::DeviceId;

/// Name/value pairs carried by an action call.
pub type ActionParams = [(String, String)];

/// Capability interface onto the host automation controller.
///
/// Reads return `Ok(None)` for values the host does not have — absence is
/// normal degraded state, not an error. `Err` is reserved for transport
/// failures ([`PanelError::Host`]).
pub trait HostClient: Send + Sync {
    /// Read a live status value for a (device, service, variable) triple.
    fn get_status(
        &self,
        device: DeviceId,
        service: &str,
        variable: &str,
    ) -> impl Future<Output = Result<Option<String>, PanelError>> + Send;

    /// Full device inventory, for building selection menus.
    fn list_devices(
        &self,
    ) -> impl Future<Output = Result<Vec<DeviceDescriptor>, PanelError>> + Send;

    /// Dispatch a command; fire-and-forget, no result is consumed.
    fn run_action(
        &self,
        device: DeviceId,
        service: &str,
        action: &str,
        params: &ActionParams,
    ) -> impl Future<Output = Result<(), PanelError>> + Send;

    /// Read a persisted configuration variable.
    fn get_device_state(
        &self,
        device: DeviceId,
        service: &str,
        variable: &str,
    ) -> impl Future<Output = Result<Option<String>, PanelError>> + Send;

    /// Write a persisted configuration variable.
    fn set_device_state_persistent(
        &self,
        device: DeviceId,
        service: &str,
        variable: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), PanelError>> + Send;

    /// Dispatch a command through the host's job queue.
    ///
    /// Used once, on panel close, to re-push the current mode target so the
    /// host re-evaluates device logic.
    fn perform_action(
        &self,
        device: DeviceId,
        service: &str,
        action: &str,
        params: &ActionParams,
    ) -> impl Future<Output = Result<(), PanelError>> + Send;
}
