//! # thermopanel-adapter-host-virtual
//!
//! Virtual/demo host controller that implements the [`HostClient`] port
//! entirely in memory, for testing and demonstration purposes.
//!
//! ## Provided devices (`with_demo_devices`)
//!
//! | Device | Id | Behaviour |
//! |--------|----|-----------|
//! | Virtual Thermostat | 1 | Full thermostat state, responds to mode/fan/energy/setpoint actions |
//! | Bedroom / Hall / Attic Sensors | 12, 45, 7 | Expose `CurrentTemperature` |
//! | Heater Plug / AC Relay / Fan Switch | 30, 31, 32 | Expose `SwitchPower1` status |
//!
//! Every dispatched action is recorded and inspectable, so tests can
//! assert on exactly what was sent and whether it went through the job
//! queue.
//!
//! ## Dependency rule
//!
//! Depends on `thermopanel-app` (port trait) and `thermopanel-domain` only.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thermopanel_app::ports::HostClient;
use thermopanel_app::ports::host::ActionParams;
use thermopanel_domain::device::DeviceDescriptor;
use thermopanel_domain::error::{HostError, PanelError};
use thermopanel_domain::id::DeviceId;
use thermopanel_domain::vocab::{
    FAN_MODE_SERVICE, OPERATING_MODE_SERVICE, SWITCH_POWER_SERVICE, SetpointKind,
    TEMPERATURE_SENSOR_SERVICE, THERMOSTAT_SERVICE, fan_mode, operating_mode, probes, setpoint,
    thermostat,
};

/// One action as the virtual host received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCall {
    pub device: DeviceId,
    pub service: String,
    pub action: String,
    pub params: Vec<(String, String)>,
    /// True when dispatched through `perform_action` (the job queue).
    pub queued: bool,
}

type VariableKey = (DeviceId, String, String);

#[derive(Default)]
struct Inner {
    devices: Vec<DeviceDescriptor>,
    variables: HashMap<VariableKey, String>,
    actions: Vec<ActionCall>,
}

/// In-memory host controller.
#[derive(Default)]
pub struct VirtualHost {
    inner: Mutex<Inner>,
}

impl VirtualHost {
    /// An empty host with no devices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A host seeded with a thermostat, three temperature sensors, and
    /// three switches spread over a couple of rooms.
    #[must_use]
    pub fn with_demo_devices() -> Self {
        let host = Self::new();
        host.add_device(DeviceDescriptor::new(
            DeviceId::new(1),
            "Virtual Thermostat",
            Some("Hall".to_string()),
        ));

        let thermostat_id = DeviceId::new(1);
        for (variable, value) in [
            (thermostat::DISPLAY_TEMPERATURE, "21.5"),
            (thermostat::DISPLAY_STATUS, "Idle"),
            (thermostat::FAILURE, "0"),
            (thermostat::TEMPERATURE_UNITS, "C"),
        ] {
            host.set_variable(thermostat_id, THERMOSTAT_SERVICE, variable, value);
        }
        host.set_variable(
            thermostat_id,
            OPERATING_MODE_SERVICE,
            operating_mode::MODE_TARGET,
            "Off",
        );
        host.set_variable(
            thermostat_id,
            OPERATING_MODE_SERVICE,
            operating_mode::ENERGY_MODE_TARGET,
            "Normal",
        );
        host.set_variable(thermostat_id, FAN_MODE_SERVICE, fan_mode::MODE, "Auto");
        host.set_variable(
            thermostat_id,
            SetpointKind::Heat.service(),
            setpoint::CURRENT_SETPOINT,
            "21",
        );
        host.set_variable(
            thermostat_id,
            SetpointKind::Cool.service(),
            setpoint::CURRENT_SETPOINT,
            "25.5",
        );

        for (id, name, room, reading) in [
            (12, "Bedroom Sensor", Some("Bedroom"), "20.8"),
            (45, "Hall Sensor", Some("Hall"), "21.5"),
            (7, "Attic Sensor", None, "17.2"),
        ] {
            let device = DeviceId::new(id);
            host.add_device(DeviceDescriptor::new(
                device,
                name,
                room.map(str::to_string),
            ));
            host.set_variable(
                device,
                TEMPERATURE_SENSOR_SERVICE,
                probes::CURRENT_TEMPERATURE,
                reading,
            );
        }

        for (id, name, room) in [
            (30, "Heater Plug", Some("Hall")),
            (31, "AC Relay", Some("Hall")),
            (32, "Fan Switch", None),
        ] {
            let device = DeviceId::new(id);
            host.add_device(DeviceDescriptor::new(
                device,
                name,
                room.map(str::to_string),
            ));
            host.set_variable(device, SWITCH_POWER_SERVICE, probes::STATUS, "0");
        }

        host
    }

    /// Register a device in the inventory.
    pub fn add_device(&self, descriptor: DeviceDescriptor) {
        self.lock().devices.push(descriptor);
    }

    /// Set a (device, service, variable) value directly.
    pub fn set_variable(&self, device: DeviceId, service: &str, variable: &str, value: &str) {
        self.lock().variables.insert(
            (device, service.to_string(), variable.to_string()),
            value.to_string(),
        );
    }

    /// Read a (device, service, variable) value directly.
    #[must_use]
    pub fn variable(&self, device: DeviceId, service: &str, variable: &str) -> Option<String> {
        self.lock()
            .variables
            .get(&(device, service.to_string(), variable.to_string()))
            .cloned()
    }

    /// Every action dispatched so far, in order.
    #[must_use]
    pub fn recorded_actions(&self) -> Vec<ActionCall> {
        self.lock().actions.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply the state change a real host would make for a known action.
    fn apply_action(
        inner: &mut Inner,
        device: DeviceId,
        service: &str,
        action: &str,
        params: &ActionParams,
    ) -> Result<(), PanelError> {
        let param = |name: &str| {
            params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| HostError::new(format!("missing parameter {name}")))
        };

        let (variable, value): (&str, String) = match (service, action) {
            (OPERATING_MODE_SERVICE, operating_mode::SET_MODE_TARGET) => (
                operating_mode::MODE_TARGET,
                param(operating_mode::NEW_TARGET_MODE)?,
            ),
            (OPERATING_MODE_SERVICE, operating_mode::SET_ENERGY_MODE_TARGET) => (
                operating_mode::ENERGY_MODE_TARGET,
                param(operating_mode::NEW_MODE_TARGET)?,
            ),
            (FAN_MODE_SERVICE, fan_mode::SET_MODE) => {
                (fan_mode::MODE, param(fan_mode::NEW_MODE)?)
            }
            (svc, setpoint::SET_CURRENT_SETPOINT)
                if svc == SetpointKind::Heat.service() || svc == SetpointKind::Cool.service() =>
            {
                (
                    setpoint::CURRENT_SETPOINT,
                    param(setpoint::NEW_CURRENT_SETPOINT)?,
                )
            }
            _ => {
                return Err(HostError::new(format!("unknown action {service}#{action}")).into());
            }
        };

        inner.variables.insert(
            (device, service.to_string(), variable.to_string()),
            value,
        );
        Ok(())
    }

    fn record_and_apply(
        &self,
        device: DeviceId,
        service: &str,
        action: &str,
        params: &ActionParams,
        queued: bool,
    ) -> Result<(), PanelError> {
        let mut inner = self.lock();
        inner.actions.push(ActionCall {
            device,
            service: service.to_string(),
            action: action.to_string(),
            params: params.to_vec(),
            queued,
        });
        Self::apply_action(&mut inner, device, service, action, params)
    }
}

impl HostClient for VirtualHost {
    async fn get_status(
        &self,
        device: DeviceId,
        service: &str,
        variable: &str,
    ) -> Result<Option<String>, PanelError> {
        Ok(self.variable(device, service, variable))
    }

    async fn list_devices(&self) -> Result<Vec<DeviceDescriptor>, PanelError> {
        Ok(self.lock().devices.clone())
    }

    async fn run_action(
        &self,
        device: DeviceId,
        service: &str,
        action: &str,
        params: &ActionParams,
    ) -> Result<(), PanelError> {
        self.record_and_apply(device, service, action, params, false)
    }

    async fn get_device_state(
        &self,
        device: DeviceId,
        service: &str,
        variable: &str,
    ) -> Result<Option<String>, PanelError> {
        Ok(self.variable(device, service, variable))
    }

    async fn set_device_state_persistent(
        &self,
        device: DeviceId,
        service: &str,
        variable: &str,
        value: &str,
    ) -> Result<(), PanelError> {
        self.set_variable(device, service, variable, value);
        Ok(())
    }

    async fn perform_action(
        &self,
        device: DeviceId,
        service: &str,
        action: &str,
        params: &ActionParams,
    ) -> Result<(), PanelError> {
        self.record_and_apply(device, service, action, params, true)
    }
}
