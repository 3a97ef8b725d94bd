//! Configuration panel — sensor selection, linked devices, schedule.
//!
//! All configuration lives in host-persisted variables on the thermostat's
//! own service; this service owns the string formats and the menus, the
//! host owns the storage.

use std::sync::Arc;

use thermopanel_domain::device::{DeviceDescriptor, RoomGroup};
use thermopanel_domain::error::{NotFoundError, PanelError};
use thermopanel_domain::id::DeviceId;
use thermopanel_domain::schedule::Schedule;
use thermopanel_domain::sensors::SensorList;
use thermopanel_domain::vocab::{
    OPERATING_MODE_SERVICE, SWITCH_POWER_SERVICE, TEMPERATURE_SENSOR_SERVICE, THERMOSTAT_SERVICE,
    operating_mode, probes, thermostat,
};

use crate::ports::HostClient;

/// Which linked helper device a menu configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Heating,
    Cooling,
    Fan,
}

impl LinkKind {
    /// The persisted variable holding this link.
    #[must_use]
    pub fn variable(self) -> &'static str {
        match self {
            Self::Heating => thermostat::HEATING_DEVICE,
            Self::Cooling => thermostat::COOLING_DEVICE,
            Self::Fan => thermostat::FAN_DEVICE,
        }
    }

    /// Form field name.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::Heating => "heating",
            Self::Cooling => "cooling",
            Self::Fan => "fan",
        }
    }
}

/// One choice in a device menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOptionView {
    /// Device id as text (the form value).
    pub value: String,
    /// `"#<id> <name>"`.
    pub label: String,
    pub selected: bool,
}

/// Choices of one room, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOptionsView {
    pub room: String,
    pub options: Vec<DeviceOptionView>,
}

/// A room-grouped device menu bound to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMenuView {
    pub field: String,
    pub rooms: Vec<RoomOptionsView>,
}

/// Schedule form fields, empty strings when no schedule is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleView {
    pub start_hour: String,
    pub start_minute: String,
    pub end_hour: String,
    pub end_minute: String,
}

impl From<Schedule> for ScheduleView {
    fn from(schedule: Schedule) -> Self {
        Self {
            start_hour: schedule.start.hour().to_string(),
            start_minute: schedule.start.minute().to_string(),
            end_hour: schedule.end.hour().to_string(),
            end_minute: schedule.end.minute().to_string(),
        }
    }
}

/// View model for the configuration panel fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigView {
    pub device: DeviceId,
    pub device_name: String,
    /// One menu per selected sensor plus a trailing empty row for adding
    /// another, fields `sensor1..sensorN`.
    pub sensor_rows: Vec<DeviceMenuView>,
    pub heating: DeviceMenuView,
    pub cooling: DeviceMenuView,
    pub fan: DeviceMenuView,
    pub schedule: ScheduleView,
}

/// Builds [`ConfigView`]s and persists configuration through the host.
pub struct ConfigService<H> {
    host: Arc<H>,
}

impl<H: HostClient> ConfigService<H> {
    /// Create a new service persisting through the given host client.
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    /// Build the configuration view from host inventory and persisted
    /// variables. Malformed persisted strings degrade to empty selections
    /// (with a warning) — a corrupt variable must not take the panel down.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotFound`] when the device is not in the host
    /// inventory, or [`PanelError::Host`] on transport failure.
    pub async fn view(&self, device: DeviceId) -> Result<ConfigView, PanelError> {
        let inventory = self.host.list_devices().await?;
        let device_name = inventory
            .iter()
            .find(|descriptor| descriptor.id == device)
            .map(|descriptor| descriptor.name.clone())
            .ok_or_else(|| NotFoundError {
                entity: "Device",
                id: device.to_string(),
            })?;

        let sensors = self.load_sensors(device).await?;
        let sensor_groups =
            RoomGroup::group(&self.probe_sensors(device, &inventory).await?, device);
        let switch_groups =
            RoomGroup::group(&self.probe_switches(device, &inventory).await?, device);

        let mut sensor_rows: Vec<DeviceMenuView> = sensors
            .ids()
            .iter()
            .enumerate()
            .map(|(ix, selected)| menu(format!("sensor{}", ix + 1), &sensor_groups, Some(*selected)))
            .collect();
        sensor_rows.push(menu(
            format!("sensor{}", sensors.ids().len() + 1),
            &sensor_groups,
            None,
        ));

        let heating = self.load_link(device, LinkKind::Heating).await?;
        let cooling = self.load_link(device, LinkKind::Cooling).await?;
        let fan = self.load_link(device, LinkKind::Fan).await?;

        let schedule = self
            .load_schedule(device)
            .await?
            .map(ScheduleView::from)
            .unwrap_or_default();

        Ok(ConfigView {
            device,
            device_name,
            sensor_rows,
            heating: menu(LinkKind::Heating.field().to_string(), &switch_groups, heating),
            cooling: menu(LinkKind::Cooling.field().to_string(), &switch_groups, cooling),
            fan: menu(LinkKind::Fan.field().to_string(), &switch_groups, fan),
            schedule,
        })
    }

    /// Persist the selected sensor list, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Host`] on transport failure.
    pub async fn save_sensors(
        &self,
        device: DeviceId,
        sensors: &SensorList,
    ) -> Result<(), PanelError> {
        self.host
            .set_device_state_persistent(
                device,
                THERMOSTAT_SERVICE,
                thermostat::TEMP_SENSORS,
                &sensors.encode(),
            )
            .await
    }

    /// Persist one linked helper device; `None` clears the link.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Host`] on transport failure.
    pub async fn save_link(
        &self,
        device: DeviceId,
        kind: LinkKind,
        target: Option<DeviceId>,
    ) -> Result<(), PanelError> {
        let value = target.map(|id| id.to_string()).unwrap_or_default();
        self.host
            .set_device_state_persistent(device, THERMOSTAT_SERVICE, kind.variable(), &value)
            .await
    }

    /// Persist the schedule window; `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Host`] on transport failure.
    pub async fn save_schedule(
        &self,
        device: DeviceId,
        schedule: Option<Schedule>,
    ) -> Result<(), PanelError> {
        self.host
            .set_device_state_persistent(
                device,
                THERMOSTAT_SERVICE,
                thermostat::SCHEDULE,
                &Schedule::encode_opt(schedule.as_ref()),
            )
            .await
    }

    /// Panel-close hook: re-push the current mode target through the
    /// host's job queue so the host re-evaluates device logic against the
    /// changed configuration. Skipped when no mode target is set.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Host`] on transport failure.
    pub async fn close(&self, device: DeviceId) -> Result<(), PanelError> {
        let mode = self
            .host
            .get_device_state(device, OPERATING_MODE_SERVICE, operating_mode::MODE_TARGET)
            .await?
            .filter(|mode| !mode.is_empty());

        let Some(mode) = mode else {
            tracing::debug!(device = %device, "panel close: no mode target to re-push");
            return Ok(());
        };

        self.host
            .perform_action(
                device,
                OPERATING_MODE_SERVICE,
                operating_mode::SET_MODE_TARGET,
                &[(operating_mode::NEW_TARGET_MODE.to_string(), mode)],
            )
            .await
    }

    async fn load_sensors(&self, device: DeviceId) -> Result<SensorList, PanelError> {
        let raw = self
            .host
            .get_device_state(device, THERMOSTAT_SERVICE, thermostat::TEMP_SENSORS)
            .await?
            .unwrap_or_default();
        match SensorList::decode(&raw) {
            Ok(sensors) => Ok(sensors),
            Err(err) => {
                tracing::warn!(device = %device, error = %err, "ignoring malformed sensor list");
                Ok(SensorList::default())
            }
        }
    }

    async fn load_link(
        &self,
        device: DeviceId,
        kind: LinkKind,
    ) -> Result<Option<DeviceId>, PanelError> {
        let raw = self
            .host
            .get_device_state(device, THERMOSTAT_SERVICE, kind.variable())
            .await?
            .unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        match raw.parse() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                tracing::warn!(device = %device, value = raw, "ignoring malformed device link");
                Ok(None)
            }
        }
    }

    async fn load_schedule(&self, device: DeviceId) -> Result<Option<Schedule>, PanelError> {
        let raw = self
            .host
            .get_device_state(device, THERMOSTAT_SERVICE, thermostat::SCHEDULE)
            .await?
            .unwrap_or_default();
        match Schedule::decode(&raw) {
            Ok(schedule) => Ok(schedule),
            Err(err) => {
                tracing::warn!(device = %device, error = %err, "ignoring malformed schedule");
                Ok(None)
            }
        }
    }

    /// Devices exposing a current temperature (sensor menu candidates).
    async fn probe_sensors(
        &self,
        device: DeviceId,
        inventory: &[DeviceDescriptor],
    ) -> Result<Vec<DeviceDescriptor>, PanelError> {
        let mut candidates = Vec::new();
        for candidate in inventory {
            if candidate.id == device {
                continue;
            }
            let reading = self
                .host
                .get_device_state(
                    candidate.id,
                    TEMPERATURE_SENSOR_SERVICE,
                    probes::CURRENT_TEMPERATURE,
                )
                .await?;
            if reading.is_some() {
                candidates.push(candidate.clone());
            }
        }
        Ok(candidates)
    }

    /// Devices exposing a switch status (heater/cooler/fan candidates).
    async fn probe_switches(
        &self,
        device: DeviceId,
        inventory: &[DeviceDescriptor],
    ) -> Result<Vec<DeviceDescriptor>, PanelError> {
        let mut candidates = Vec::new();
        for candidate in inventory {
            if candidate.id == device {
                continue;
            }
            let status = self
                .host
                .get_device_state(candidate.id, SWITCH_POWER_SERVICE, probes::STATUS)
                .await?;
            if status.is_some() {
                candidates.push(candidate.clone());
            }
        }
        Ok(candidates)
    }
}

fn menu(field: String, groups: &[RoomGroup], selected: Option<DeviceId>) -> DeviceMenuView {
    DeviceMenuView {
        field,
        rooms: groups
            .iter()
            .map(|group| RoomOptionsView {
                room: group.name.clone(),
                options: group
                    .devices
                    .iter()
                    .map(|descriptor| DeviceOptionView {
                        value: descriptor.id.to_string(),
                        label: descriptor.friendly_name(),
                        selected: selected == Some(descriptor.id),
                    })
                    .collect(),
            })
            .collect(),
    }
}
