//! In-memory host fake shared by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use thermopanel_domain::device::DeviceDescriptor;
use thermopanel_domain::error::PanelError;
use thermopanel_domain::id::DeviceId;

use crate::ports::HostClient;
use crate::ports::host::ActionParams;

/// One dispatched action, as the fake host recorded it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAction {
    pub device: DeviceId,
    pub service: String,
    pub action: String,
    pub params: Vec<(String, String)>,
    /// True when dispatched through `perform_action` (the job queue).
    pub queued: bool,
}

type VariableKey = (DeviceId, String, String);

/// Scriptable in-memory [`HostClient`].
///
/// Status and persisted variables share one map (the fake host does not
/// model the distinction); every read and dispatch is recorded so tests
/// can assert on exactly what the services asked for.
#[derive(Default)]
pub struct FakeHost {
    devices: Mutex<Vec<DeviceDescriptor>>,
    variables: Mutex<HashMap<VariableKey, String>>,
    actions: Mutex<Vec<RecordedAction>>,
    status_reads: Mutex<Vec<String>>,
}

impl FakeHost {
    pub fn with_devices(devices: Vec<DeviceDescriptor>) -> Self {
        Self {
            devices: Mutex::new(devices),
            ..Self::default()
        }
    }

    /// Preload a (device, service, variable) value.
    pub fn set(&self, device: DeviceId, service: &str, variable: &str, value: &str) {
        self.variables.lock().unwrap().insert(
            (device, service.to_string(), variable.to_string()),
            value.to_string(),
        );
    }

    pub fn get(&self, device: DeviceId, service: &str, variable: &str) -> Option<String> {
        self.variables
            .lock()
            .unwrap()
            .get(&(device, service.to_string(), variable.to_string()))
            .cloned()
    }

    pub fn actions(&self) -> Vec<RecordedAction> {
        self.actions.lock().unwrap().clone()
    }

    /// Variable names passed to `get_status` so far.
    pub fn status_reads(&self) -> Vec<String> {
        self.status_reads.lock().unwrap().clone()
    }
}

impl HostClient for FakeHost {
    async fn get_status(
        &self,
        device: DeviceId,
        service: &str,
        variable: &str,
    ) -> Result<Option<String>, PanelError> {
        self.status_reads
            .lock()
            .unwrap()
            .push(variable.to_string());
        Ok(self.get(device, service, variable))
    }

    async fn list_devices(&self) -> Result<Vec<DeviceDescriptor>, PanelError> {
        Ok(self.devices.lock().unwrap().clone())
    }

    async fn run_action(
        &self,
        device: DeviceId,
        service: &str,
        action: &str,
        params: &ActionParams,
    ) -> Result<(), PanelError> {
        self.actions.lock().unwrap().push(RecordedAction {
            device,
            service: service.to_string(),
            action: action.to_string(),
            params: params.to_vec(),
            queued: false,
        });
        Ok(())
    }

    async fn get_device_state(
        &self,
        device: DeviceId,
        service: &str,
        variable: &str,
    ) -> Result<Option<String>, PanelError> {
        Ok(self.get(device, service, variable))
    }

    async fn set_device_state_persistent(
        &self,
        device: DeviceId,
        service: &str,
        variable: &str,
        value: &str,
    ) -> Result<(), PanelError> {
        self.set(device, service, variable, value);
        Ok(())
    }

    async fn perform_action(
        &self,
        device: DeviceId,
        service: &str,
        action: &str,
        params: &ActionParams,
    ) -> Result<(), PanelError> {
        self.actions.lock().unwrap().push(RecordedAction {
            device,
            service: service.to_string(),
            action: action.to_string(),
            params: params.to_vec(),
            queued: true,
        });
        Ok(())
    }
}
