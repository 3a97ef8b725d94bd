//! Static menu option tables for the panel selectors.
//!
//! Each selector (operating mode, fan mode, energy mode) is driven by a
//! fixed table mapping a display label to the host action that applies it.
//! The tables double as the allow-list for posted commands: a command tuple
//! that matches no table entry is rejected before it reaches the host.

use crate::error::ValidationError;
use crate::vocab::{FAN_MODE_SERVICE, OPERATING_MODE_SERVICE, fan_mode, operating_mode};

/// One entry in a selector menu.
///
/// Defined once per selector, never mutated. `value` is the host's wire
/// value; `service`/`action`/`param` name the host call that applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption {
    /// Text shown to the user.
    pub label: &'static str,
    /// Wire value understood by the host.
    pub value: &'static str,
    /// Target service id.
    pub service: &'static str,
    /// Target action name.
    pub action: &'static str,
    /// Parameter name carrying the value.
    pub param: &'static str,
}

/// Operating mode selector entries.
pub const OPERATING_MODE_OPTIONS: &[MenuOption] = &[
    MenuOption {
        label: "Off",
        value: "Off",
        service: OPERATING_MODE_SERVICE,
        action: operating_mode::SET_MODE_TARGET,
        param: operating_mode::NEW_TARGET_MODE,
    },
    MenuOption {
        label: "Heat",
        value: "HeatOn",
        service: OPERATING_MODE_SERVICE,
        action: operating_mode::SET_MODE_TARGET,
        param: operating_mode::NEW_TARGET_MODE,
    },
    MenuOption {
        label: "Cool",
        value: "CoolOn",
        service: OPERATING_MODE_SERVICE,
        action: operating_mode::SET_MODE_TARGET,
        param: operating_mode::NEW_TARGET_MODE,
    },
    MenuOption {
        label: "Auto",
        value: "AutoChangeOver",
        service: OPERATING_MODE_SERVICE,
        action: operating_mode::SET_MODE_TARGET,
        param: operating_mode::NEW_TARGET_MODE,
    },
];

/// Fan mode selector entries.
pub const FAN_MODE_OPTIONS: &[MenuOption] = &[
    MenuOption {
        label: "Auto",
        value: "Auto",
        service: FAN_MODE_SERVICE,
        action: fan_mode::SET_MODE,
        param: fan_mode::NEW_MODE,
    },
    MenuOption {
        label: "On",
        value: "ContinuousOn",
        service: FAN_MODE_SERVICE,
        action: fan_mode::SET_MODE,
        param: fan_mode::NEW_MODE,
    },
    MenuOption {
        label: "Cycle",
        value: "PeriodicOn",
        service: FAN_MODE_SERVICE,
        action: fan_mode::SET_MODE,
        param: fan_mode::NEW_MODE,
    },
];

/// Energy mode selector entries.
pub const ENERGY_MODE_OPTIONS: &[MenuOption] = &[
    MenuOption {
        label: "Normal",
        value: "Normal",
        service: OPERATING_MODE_SERVICE,
        action: operating_mode::SET_ENERGY_MODE_TARGET,
        param: operating_mode::NEW_MODE_TARGET,
    },
    MenuOption {
        label: "Eco",
        value: "EnergySavingsMode",
        service: OPERATING_MODE_SERVICE,
        action: operating_mode::SET_ENERGY_MODE_TARGET,
        param: operating_mode::NEW_MODE_TARGET,
    },
];

/// Every selector table, for whole-vocabulary lookups.
const ALL_TABLES: &[&[MenuOption]] = &[
    OPERATING_MODE_OPTIONS,
    FAN_MODE_OPTIONS,
    ENERGY_MODE_OPTIONS,
];

/// Resolve a posted `(service, action, value)` tuple against the tables.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownCommand`] when the tuple matches no
/// entry — unknown commands are never forwarded to the host.
pub fn resolve_command(
    service: &str,
    action: &str,
    value: &str,
) -> Result<&'static MenuOption, ValidationError> {
    ALL_TABLES
        .iter()
        .flat_map(|table| table.iter())
        .find(|opt| opt.service == service && opt.action == action && opt.value == value)
        .ok_or_else(|| ValidationError::UnknownCommand {
            service: service.to_string(),
            action: action.to_string(),
            value: value.to_string(),
        })
}
