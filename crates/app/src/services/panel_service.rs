//! Interactive control panel — view model and command dispatch.
//!
//! The panel shows the thermostat's current readings, three selector lists
//! (operating mode, fan mode, energy mode) and the four setpoint buttons.
//! Selector changes dispatch to the host immediately; setpoint steps go
//! through the [`SetpointDebouncer`].

use std::sync::Arc;

use thermopanel_domain::error::{NotFoundError, PanelError, ValidationError};
use thermopanel_domain::id::DeviceId;
use thermopanel_domain::menu::{
    ENERGY_MODE_OPTIONS, FAN_MODE_OPTIONS, MenuOption, OPERATING_MODE_OPTIONS, resolve_command,
};
use thermopanel_domain::vocab::{
    FAN_MODE_SERVICE, OPERATING_MODE_SERVICE, SetpointKind, THERMOSTAT_SERVICE, fan_mode,
    operating_mode, setpoint, thermostat,
};

use crate::debounce::SetpointDebouncer;
use crate::ports::HostClient;
use crate::services::status_service::{StatusService, TEMPERATURE_PLACEHOLDER};

/// One selectable entry, with the current host state marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: &'static str,
    pub value: &'static str,
    pub selected: bool,
}

/// One selector list and the host call its choices map to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorView {
    /// Form field name (`"mode"`, `"fan"`, `"energy"`).
    pub name: &'static str,
    pub service: &'static str,
    pub action: &'static str,
    pub param: &'static str,
    pub options: Vec<OptionView>,
}

/// One setpoint with its adjust-control wiring.
#[derive(Debug, Clone, PartialEq)]
pub struct SetpointView {
    pub kind: SetpointKind,
    pub service: &'static str,
    pub action: &'static str,
    pub param: &'static str,
    /// Currently displayed value; reflects a pending adjustment when one
    /// is in flight.
    pub value: String,
    /// Signed step the up button applies (`data-incr`), e.g. `"0.5"`.
    pub step_up: String,
    /// Signed step the down button applies, e.g. `"-0.5"`.
    pub step_down: String,
}

/// View model for the control panel fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub device: DeviceId,
    pub device_name: String,
    pub temperature: String,
    pub status: String,
    /// Error visual state for the temperature and status regions.
    pub failed: bool,
    /// Display unit, `"C"` or `"F"`.
    pub unit: String,
    pub heat: SetpointView,
    pub cool: SetpointView,
    pub mode: SelectorView,
    pub fan: SelectorView,
    pub energy: SelectorView,
}

/// Builds [`PanelView`]s and routes panel interactions to the host.
pub struct PanelService<H> {
    host: Arc<H>,
    status: StatusService<H>,
    debouncer: SetpointDebouncer<H>,
    setpoint_step: f64,
}

impl<H: HostClient + 'static> PanelService<H> {
    /// Create a panel service.
    ///
    /// `setpoint_step` is the fixed increment (in display units) the
    /// adjustment buttons apply per click.
    pub fn new(host: Arc<H>, debouncer: SetpointDebouncer<H>, setpoint_step: f64) -> Self {
        Self {
            status: StatusService::new(Arc::clone(&host)),
            host,
            debouncer,
            setpoint_step,
        }
    }

    /// Build the panel view from live host state.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotFound`] when the device is not in the host
    /// inventory, or [`PanelError::Host`] on transport failure.
    pub async fn view(&self, device: DeviceId) -> Result<PanelView, PanelError> {
        let device_name = self
            .host
            .list_devices()
            .await?
            .into_iter()
            .find(|descriptor| descriptor.id == device)
            .map(|descriptor| descriptor.name)
            .ok_or_else(|| NotFoundError {
                entity: "Device",
                id: device.to_string(),
            })?;

        let summary = self.status.summarize(device).await?;

        let failure = self
            .host
            .get_status(device, THERMOSTAT_SERVICE, thermostat::FAILURE)
            .await?;
        let failed = failure.as_deref().is_some_and(|flag| flag != "0");
        let status = if failed {
            format!("{} (sensor failure)", summary.status)
        } else {
            summary.status
        };

        let unit = self
            .host
            .get_status(device, THERMOSTAT_SERVICE, thermostat::TEMPERATURE_UNITS)
            .await?
            .unwrap_or_else(|| "C".to_string());

        let mode_current = self
            .host
            .get_status(device, OPERATING_MODE_SERVICE, operating_mode::MODE_TARGET)
            .await?;
        let fan_current = self
            .host
            .get_status(device, FAN_MODE_SERVICE, fan_mode::MODE)
            .await?;
        let energy_current = self
            .host
            .get_status(
                device,
                OPERATING_MODE_SERVICE,
                operating_mode::ENERGY_MODE_TARGET,
            )
            .await?;

        Ok(PanelView {
            device,
            device_name,
            temperature: summary.temperature,
            status,
            failed,
            unit,
            heat: self.setpoint_view(device, SetpointKind::Heat).await?,
            cool: self.setpoint_view(device, SetpointKind::Cool).await?,
            mode: selector("mode", OPERATING_MODE_OPTIONS, mode_current.as_deref()),
            fan: selector("fan", FAN_MODE_OPTIONS, fan_current.as_deref()),
            energy: selector("energy", ENERGY_MODE_OPTIONS, energy_current.as_deref()),
        })
    }

    async fn setpoint_view(
        &self,
        device: DeviceId,
        kind: SetpointKind,
    ) -> Result<SetpointView, PanelError> {
        // A pending adjustment wins over the host value: the display must
        // reflect intent before the host round-trip completes.
        let value = match self.debouncer.pending_value(device, kind) {
            Some(pending) => pending.to_string(),
            None => self
                .host
                .get_status(device, kind.service(), setpoint::CURRENT_SETPOINT)
                .await?
                .unwrap_or_else(|| TEMPERATURE_PLACEHOLDER.to_string()),
        };

        Ok(SetpointView {
            kind,
            service: kind.service(),
            action: setpoint::SET_CURRENT_SETPOINT,
            param: setpoint::NEW_CURRENT_SETPOINT,
            value,
            step_up: self.setpoint_step.to_string(),
            step_down: (-self.setpoint_step).to_string(),
        })
    }

    /// Apply a selector change: validate the posted command tuple against
    /// the menu tables and dispatch it immediately (selector changes are
    /// not debounced).
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] when the tuple matches no menu
    /// entry, or [`PanelError::Host`] on transport failure.
    pub async fn select(
        &self,
        device: DeviceId,
        service: &str,
        action: &str,
        param: &str,
        value: &str,
    ) -> Result<(), PanelError> {
        let option: &MenuOption = resolve_command(service, action, value)?;
        if option.param != param {
            return Err(ValidationError::UnknownCommand {
                service: service.to_string(),
                action: action.to_string(),
                value: value.to_string(),
            }
            .into());
        }

        tracing::debug!(device = %device, action, value, "selector dispatch");
        self.host
            .run_action(
                device,
                option.service,
                option.action,
                &[(option.param.to_string(), value.to_string())],
            )
            .await
    }

    /// Apply one setpoint button click.
    ///
    /// Parses the displayed value the client posted back; unparsable text
    /// fails closed (no dispatch). The accepted step must be the
    /// configured increment in either direction. Returns the new
    /// optimistically displayed value.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] for unparsable display text or a
    /// step that is not the configured increment.
    pub fn adjust_setpoint(
        &self,
        device: DeviceId,
        kind: SetpointKind,
        displayed: &str,
        step: &str,
    ) -> Result<f64, PanelError> {
        let Ok(displayed) = displayed.trim().parse::<f64>() else {
            tracing::warn!(
                device = %device,
                setpoint = %kind,
                text = displayed,
                "displayed setpoint did not parse; adjustment dropped"
            );
            return Err(ValidationError::Setpoint {
                text: displayed.to_string(),
            }
            .into());
        };

        let step = step
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|step| step.abs() == self.setpoint_step)
            .ok_or_else(|| ValidationError::UnsupportedStep {
                text: step.to_string(),
            })?;

        Ok(self.debouncer.adjust(device, kind, displayed, step))
    }
}

fn selector(
    name: &'static str,
    table: &'static [MenuOption],
    current: Option<&str>,
) -> SelectorView {
    let first = table
        .first()
        .map(|opt| (opt.service, opt.action, opt.param))
        .unwrap_or_default();
    SelectorView {
        name,
        service: first.0,
        action: first.1,
        param: first.2,
        options: table
            .iter()
            .map(|opt| OptionView {
                label: opt.label,
                value: opt.value,
                selected: current == Some(opt.value),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use thermopanel_domain::device::DeviceDescriptor;

    use crate::test_support::FakeHost;

    const DEVICE: DeviceId = DeviceId::new(1);
    const DELAY: Duration = Duration::from_millis(1500);

    fn thermostat_host() -> Arc<FakeHost> {
        Arc::new(FakeHost::with_devices(vec![DeviceDescriptor::new(
            DEVICE,
            "Hallway Thermostat",
            None,
        )]))
    }

    fn service(host: &Arc<FakeHost>) -> PanelService<FakeHost> {
        let debouncer = SetpointDebouncer::new(Arc::clone(host), DELAY);
        PanelService::new(Arc::clone(host), debouncer, 0.5)
    }

    #[tokio::test]
    async fn should_mark_current_mode_selected() {
        let host = thermostat_host();
        host.set(
            DEVICE,
            OPERATING_MODE_SERVICE,
            operating_mode::MODE_TARGET,
            "HeatOn",
        );

        let view = service(&host).view(DEVICE).await.unwrap();

        let selected: Vec<&str> = view
            .mode
            .options
            .iter()
            .filter(|opt| opt.selected)
            .map(|opt| opt.value)
            .collect();
        assert_eq!(selected, vec!["HeatOn"]);
    }

    #[tokio::test]
    async fn should_leave_no_option_selected_when_host_state_is_unknown() {
        let host = thermostat_host();

        let view = service(&host).view(DEVICE).await.unwrap();

        assert!(view.fan.options.iter().all(|opt| !opt.selected));
    }

    #[tokio::test]
    async fn should_flag_error_state_when_failure_is_nonzero() {
        let host = thermostat_host();
        host.set(DEVICE, THERMOSTAT_SERVICE, thermostat::DISPLAY_STATUS, "Idle");
        host.set(DEVICE, THERMOSTAT_SERVICE, thermostat::FAILURE, "1");

        let view = service(&host).view(DEVICE).await.unwrap();

        assert!(view.failed);
        assert!(view.status.contains("sensor failure"));
    }

    #[tokio::test]
    async fn should_not_flag_error_state_when_failure_is_zero() {
        let host = thermostat_host();
        host.set(DEVICE, THERMOSTAT_SERVICE, thermostat::FAILURE, "0");

        let view = service(&host).view(DEVICE).await.unwrap();

        assert!(!view.failed);
        assert!(!view.status.contains("sensor failure"));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_device() {
        let host = thermostat_host();

        let result = service(&host).view(DeviceId::new(99)).await;

        assert!(matches!(result, Err(PanelError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_render_setpoints_from_host_state() {
        let host = thermostat_host();
        host.set(
            DEVICE,
            SetpointKind::Heat.service(),
            setpoint::CURRENT_SETPOINT,
            "21",
        );
        host.set(
            DEVICE,
            SetpointKind::Cool.service(),
            setpoint::CURRENT_SETPOINT,
            "25.5",
        );

        let view = service(&host).view(DEVICE).await.unwrap();

        assert_eq!(view.heat.value, "21");
        assert_eq!(view.cool.value, "25.5");
        assert_eq!(view.heat.param, "NewCurrentSetpoint");
    }

    #[tokio::test(start_paused = true)]
    async fn should_overlay_pending_adjustment_on_setpoint_display() {
        let host = thermostat_host();
        host.set(
            DEVICE,
            SetpointKind::Heat.service(),
            setpoint::CURRENT_SETPOINT,
            "21",
        );
        let service = service(&host);

        service
            .adjust_setpoint(DEVICE, SetpointKind::Heat, "21", "0.5")
            .unwrap();

        let view = service.view(DEVICE).await.unwrap();
        assert_eq!(view.heat.value, "21.5");

        // After the deferred dispatch the host value is authoritative again.
        tokio::time::sleep(Duration::from_millis(1600)).await;
        let view = service.view(DEVICE).await.unwrap();
        assert_eq!(view.heat.value, "21");
    }

    #[tokio::test]
    async fn should_dispatch_selector_change_immediately() {
        let host = thermostat_host();

        service(&host)
            .select(
                DEVICE,
                OPERATING_MODE_SERVICE,
                operating_mode::SET_MODE_TARGET,
                operating_mode::NEW_TARGET_MODE,
                "CoolOn",
            )
            .await
            .unwrap();

        let actions = host.actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "SetModeTarget");
        assert_eq!(
            actions[0].params,
            vec![("NewTargetMode".to_string(), "CoolOn".to_string())]
        );
    }

    #[tokio::test]
    async fn should_reject_selector_command_not_in_menu_tables() {
        let host = thermostat_host();

        let result = service(&host)
            .select(
                DEVICE,
                OPERATING_MODE_SERVICE,
                "SetModeTarget",
                "NewTargetMode",
                "Incinerate",
            )
            .await;

        assert!(matches!(result, Err(PanelError::Validation(_))));
        assert!(host.actions().is_empty());
    }

    #[tokio::test]
    async fn should_reject_selector_command_with_wrong_param_name() {
        let host = thermostat_host();

        let result = service(&host)
            .select(
                DEVICE,
                OPERATING_MODE_SERVICE,
                "SetModeTarget",
                "NewMode",
                "HeatOn",
            )
            .await;

        assert!(matches!(result, Err(PanelError::Validation(_))));
        assert!(host.actions().is_empty());
    }

    #[tokio::test]
    async fn should_fail_closed_on_unparsable_displayed_setpoint() {
        let host = thermostat_host();

        let result = service(&host).adjust_setpoint(DEVICE, SetpointKind::Heat, "--.-", "0.5");

        assert!(matches!(
            result,
            Err(PanelError::Validation(ValidationError::Setpoint { .. }))
        ));
        assert!(host.actions().is_empty());
    }

    #[tokio::test]
    async fn should_reject_step_other_than_configured_increment() {
        let host = thermostat_host();

        let result = service(&host).adjust_setpoint(DEVICE, SetpointKind::Heat, "21", "5");

        assert!(matches!(
            result,
            Err(PanelError::Validation(
                ValidationError::UnsupportedStep { .. }
            ))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn should_accumulate_clicks_through_posted_display_value() {
        let host = thermostat_host();
        let service = service(&host);

        let v1 = service
            .adjust_setpoint(DEVICE, SetpointKind::Cool, "25", "-0.5")
            .unwrap();
        let v2 = service
            .adjust_setpoint(DEVICE, SetpointKind::Cool, &v1.to_string(), "-0.5")
            .unwrap();
        assert_eq!(v2, 24.0);

        tokio::time::sleep(Duration::from_millis(1600)).await;

        let actions = host.actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].params[0].1, "24");
    }
}
