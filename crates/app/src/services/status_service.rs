//! Status widget — the dashboard summary for one thermostat.

use std::sync::Arc;

use thermopanel_domain::error::PanelError;
use thermopanel_domain::id::DeviceId;
use thermopanel_domain::vocab::{THERMOSTAT_SERVICE, thermostat};

use crate::ports::HostClient;

/// Shown when the host has no temperature reading yet.
pub const TEMPERATURE_PLACEHOLDER: &str = "--.-";
/// Shown when the host has no operating status yet.
pub const STATUS_PLACEHOLDER: &str = "--";

/// View model for the status widget fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    /// Preformatted ambient temperature, e.g. `"21.5"`.
    pub temperature: String,
    /// Operating status line, e.g. `"Heating 12m"`.
    pub status: String,
}

/// Builds [`StatusView`]s from live host state.
///
/// A pure function of host state at call time: no caching, no stored
/// state; repeated calls with unchanged host state produce identical
/// output.
pub struct StatusService<H> {
    host: Arc<H>,
}

impl<H: HostClient> StatusService<H> {
    /// Create a new service reading through the given host client.
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    /// Summarize the device's current temperature and operating status.
    ///
    /// While actively `Heating` or `Cooling` the status line carries the
    /// host's cycle-time reading; in any other status the cycle time is
    /// never queried. Missing host values degrade to placeholder text.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Host`] when the host transport fails.
    pub async fn summarize(&self, device: DeviceId) -> Result<StatusView, PanelError> {
        let temperature = self
            .host
            .get_status(device, THERMOSTAT_SERVICE, thermostat::DISPLAY_TEMPERATURE)
            .await?
            .unwrap_or_else(|| TEMPERATURE_PLACEHOLDER.to_string());

        let mut status = self
            .host
            .get_status(device, THERMOSTAT_SERVICE, thermostat::DISPLAY_STATUS)
            .await?
            .unwrap_or_else(|| STATUS_PLACEHOLDER.to_string());

        if status == "Cooling" || status == "Heating" {
            let cycle = self
                .host
                .get_status(device, THERMOSTAT_SERVICE, thermostat::CYCLE_TIME)
                .await?
                .unwrap_or_default();
            status = format!("{status} {cycle}");
        }

        Ok(StatusView {
            temperature,
            status,
        })
    }
}
