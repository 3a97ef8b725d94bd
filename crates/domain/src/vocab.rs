//! Host controller vocabulary.
//!
//! The host names every device capability with a service id, every command
//! with an action name, and every state or parameter with a variable name.
//! These strings are the wire format between the panel and the host — they
//! must match the host's vocabulary verbatim or commands silently go
//! nowhere.

/// The virtual thermostat's own service.
pub const THERMOSTAT_SERVICE: &str = "urn:toggledbits-com:serviceId:AutoVirtualThermostat1";
/// Operating mode (and energy mode) service.
pub const OPERATING_MODE_SERVICE: &str = "urn:upnp-org:serviceId:HVAC_UserOperatingMode1";
/// Fan operating mode service.
pub const FAN_MODE_SERVICE: &str = "urn:upnp-org:serviceId:HVAC_FanOperatingMode1";
/// Heating setpoint service.
pub const HEAT_SETPOINT_SERVICE: &str = "urn:upnp-org:serviceId:TemperatureSetpoint1_Heat";
/// Cooling setpoint service.
pub const COOL_SETPOINT_SERVICE: &str = "urn:upnp-org:serviceId:TemperatureSetpoint1_Cool";
/// Generic temperature sensor service (capability probe for sensor menus).
pub const TEMPERATURE_SENSOR_SERVICE: &str = "urn:upnp-org:serviceId:TemperatureSensor1";
/// Binary switch service (capability probe for heater/cooler/fan menus).
pub const SWITCH_POWER_SERVICE: &str = "urn:upnp-org:serviceId:SwitchPower1";

/// Variables on [`THERMOSTAT_SERVICE`].
pub mod thermostat {
    /// Formatted ambient temperature for display.
    pub const DISPLAY_TEMPERATURE: &str = "DisplayTemperature";
    /// Operating status for display (`Idle`, `Heating`, `Cooling`, …).
    pub const DISPLAY_STATUS: &str = "DisplayStatus";
    /// Elapsed time in the current heating/cooling cycle, preformatted.
    pub const CYCLE_TIME: &str = "CycleTime";
    /// `"0"` when healthy; anything else marks the device inoperative.
    pub const FAILURE: &str = "Failure";
    /// Comma-joined list of temperature sensor device ids.
    pub const TEMP_SENSORS: &str = "TempSensors";
    /// Active schedule window, `"<startMinutes>-<endMinutes>"` or empty.
    pub const SCHEDULE: &str = "Schedule";
    /// Linked heating switch device id, empty when unset.
    pub const HEATING_DEVICE: &str = "HeatingDevice";
    /// Linked cooling switch device id, empty when unset.
    pub const COOLING_DEVICE: &str = "CoolingDevice";
    /// Linked fan switch device id, empty when unset.
    pub const FAN_DEVICE: &str = "FanDevice";
    /// Display unit, `"C"` or `"F"`.
    pub const TEMPERATURE_UNITS: &str = "TemperatureUnits";
}

/// Variables, actions, and parameters on [`OPERATING_MODE_SERVICE`].
pub mod operating_mode {
    pub const MODE_TARGET: &str = "ModeTarget";
    pub const MODE_STATUS: &str = "ModeStatus";
    pub const SET_MODE_TARGET: &str = "SetModeTarget";
    pub const NEW_TARGET_MODE: &str = "NewTargetMode";

    pub const ENERGY_MODE_TARGET: &str = "EnergyModeTarget";
    pub const SET_ENERGY_MODE_TARGET: &str = "SetEnergyModeTarget";
    pub const NEW_MODE_TARGET: &str = "NewModeTarget";
}

/// Variables, actions, and parameters on [`FAN_MODE_SERVICE`].
pub mod fan_mode {
    pub const MODE: &str = "Mode";
    pub const SET_MODE: &str = "SetMode";
    pub const NEW_MODE: &str = "NewMode";
}

/// Variables, actions, and parameters on the setpoint services.
pub mod setpoint {
    pub const CURRENT_SETPOINT: &str = "CurrentSetpoint";
    pub const SET_CURRENT_SETPOINT: &str = "SetCurrentSetpoint";
    pub const NEW_CURRENT_SETPOINT: &str = "NewCurrentSetpoint";
}

/// Variables on the capability-probe services.
pub mod probes {
    /// On [`super::TEMPERATURE_SENSOR_SERVICE`].
    pub const CURRENT_TEMPERATURE: &str = "CurrentTemperature";
    /// On [`super::SWITCH_POWER_SERVICE`].
    pub const STATUS: &str = "Status";
}

/// Which setpoint a control adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetpointKind {
    Heat,
    Cool,
}

impl SetpointKind {
    /// The host service carrying this setpoint.
    #[must_use]
    pub fn service(self) -> &'static str {
        match self {
            Self::Heat => HEAT_SETPOINT_SERVICE,
            Self::Cool => COOL_SETPOINT_SERVICE,
        }
    }
}

impl std::fmt::Display for SetpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heat => f.write_str("heat"),
            Self::Cool => f.write_str("cool"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_setpoint_kind_to_host_service() {
        assert_eq!(
            SetpointKind::Heat.service(),
            "urn:upnp-org:serviceId:TemperatureSetpoint1_Heat"
        );
        assert_eq!(
            SetpointKind::Cool.service(),
            "urn:upnp-org:serviceId:TemperatureSetpoint1_Cool"
        );
    }

    #[test]
    fn should_roundtrip_setpoint_kind_through_serde() {
        let json = serde_json::to_string(&SetpointKind::Cool).unwrap();
        assert_eq!(json, "\"cool\"");
        let parsed: SetpointKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SetpointKind::Cool);
    }
}
