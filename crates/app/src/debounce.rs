//! Debounced setpoint adjustment.
//!
//! Rapid clicks on a setpoint button must coalesce into a single host
//! command carrying the final accumulated value, dispatched once the
//! clicks stop. Each control (device × setpoint × direction) owns exactly
//! one timer slot: arming a new adjustment cancels and replaces any timer
//! already pending on that control, so at most one deferred command is in
//! flight per control at any time.
//!
//! The protocol per control:
//!
//! ```text
//! Idle --click--> Pending --click--> Pending (timer replaced)
//!                    |
//!                 expiry: dispatch SetCurrentSetpoint(final value), clear slot
//! ```
//!
//! A monotonically increasing generation stamps every armed timer; the
//! expiry path dispatches only if its generation still owns the slot, so a
//! replaced timer can never send stale state even if its abort races the
//! wake-up.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thermopanel_domain::id::DeviceId;
use thermopanel_domain::vocab::{SetpointKind, setpoint};

use crate::ports::HostClient;

/// Direction of a setpoint step, derived from the step's sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    fn of_step(step: f64) -> Self {
        if step < 0.0 { Self::Down } else { Self::Up }
    }
}

/// Identity of one adjustment control.
///
/// The up and down buttons of the same setpoint are distinct controls and
/// debounce independently, exactly like the original per-element timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlKey {
    pub device: DeviceId,
    pub setpoint: SetpointKind,
    pub direction: StepDirection,
}

struct Slot {
    value: f64,
    generation: u64,
    timer: tokio::task::AbortHandle,
}

#[derive(Default)]
struct DebounceState {
    next_generation: u64,
    slots: HashMap<ControlKey, Slot>,
}

/// Per-control debouncer dispatching `SetCurrentSetpoint` to the host.
pub struct SetpointDebouncer<H> {
    host: Arc<H>,
    delay: Duration,
    state: Arc<Mutex<DebounceState>>,
}

impl<H: HostClient + 'static> SetpointDebouncer<H> {
    /// Create a debouncer dispatching through `host` after `delay` of
    /// quiet time per control.
    #[must_use]
    pub fn new(host: Arc<H>, delay: Duration) -> Self {
        Self {
            host,
            delay,
            state: Arc::new(Mutex::new(DebounceState::default())),
        }
    }

    /// Record one click: accumulate `displayed + step`, re-arm the
    /// control's timer, and return the new value for optimistic display.
    ///
    /// Must be called from within a tokio runtime (the deferred dispatch is
    /// a spawned task).
    pub fn adjust(&self, device: DeviceId, kind: SetpointKind, displayed: f64, step: f64) -> f64 {
        let key = ControlKey {
            device,
            setpoint: kind,
            direction: StepDirection::of_step(step),
        };
        let new_value = displayed + step;

        let mut state = lock(&self.state);
        state.next_generation += 1;
        let generation = state.next_generation;

        if let Some(previous) = state.slots.remove(&key) {
            previous.timer.abort();
        }

        let timer = tokio::spawn(dispatch_after(
            Arc::clone(&self.host),
            Arc::clone(&self.state),
            key,
            generation,
            new_value,
            self.delay,
        ))
        .abort_handle();

        state.slots.insert(
            key,
            Slot {
                value: new_value,
                generation,
                timer,
            },
        );

        tracing::debug!(
            device = %device,
            setpoint = %kind,
            value = new_value,
            "setpoint adjustment pending"
        );
        new_value
    }

    /// The value the user most recently accumulated for `kind` on
    /// `device`, across that setpoint's two direction slots, if a dispatch
    /// is still pending. This is the "currently displayed" value a
    /// re-render must show.
    #[must_use]
    pub fn pending_value(&self, device: DeviceId, kind: SetpointKind) -> Option<f64> {
        let state = lock(&self.state);
        state
            .slots
            .iter()
            .filter(|(key, _)| key.device == device && key.setpoint == kind)
            .max_by_key(|(_, slot)| slot.generation)
            .map(|(_, slot)| slot.value)
    }
}

async fn dispatch_after<H: HostClient>(
    host: Arc<H>,
    state: Arc<Mutex<DebounceState>>,
    key: ControlKey,
    generation: u64,
    value: f64,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;

    {
        let mut state = lock(&state);
        match state.slots.get(&key) {
            Some(slot) if slot.generation == generation => {
                state.slots.remove(&key);
            }
            // Superseded: a newer timer owns this control now.
            _ => return,
        }
    }

    let params = [(
        setpoint::NEW_CURRENT_SETPOINT.to_string(),
        value.to_string(),
    )];
    match host
        .run_action(
            key.device,
            key.setpoint.service(),
            setpoint::SET_CURRENT_SETPOINT,
            &params,
        )
        .await
    {
        Ok(()) => tracing::debug!(
            device = %key.device,
            setpoint = %key.setpoint,
            value,
            "setpoint dispatched"
        ),
        Err(err) => tracing::warn!(
            device = %key.device,
            setpoint = %key.setpoint,
            error = %err,
            "deferred setpoint dispatch failed"
        ),
    }
}

fn lock(state: &Mutex<DebounceState>) -> std::sync::MutexGuard<'_, DebounceState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    use thermopanel_domain::device::DeviceDescriptor;
    use thermopanel_domain::error::PanelError;

    const DELAY: Duration = Duration::from_millis(1500);
    const AFTER: Duration = Duration::from_millis(1600);

    #[derive(Debug, Clone, PartialEq)]
    struct RecordedAction {
        device: DeviceId,
        service: String,
        action: String,
        params: Vec<(String, String)>,
    }

    #[derive(Default)]
    struct RecordingHost {
        actions: Mutex<Vec<RecordedAction>>,
    }

    impl RecordingHost {
        fn actions(&self) -> Vec<RecordedAction> {
            self.actions.lock().unwrap().clone()
        }
    }

    impl HostClient for RecordingHost {
        async fn get_status(
            &self,
            _device: DeviceId,
            _service: &str,
            _variable: &str,
        ) -> Result<Option<String>, PanelError> {
            Ok(None)
        }

        async fn list_devices(&self) -> Result<Vec<DeviceDescriptor>, PanelError> {
            Ok(vec![])
        }

        async fn run_action(
            &self,
            device: DeviceId,
            service: &str,
            action: &str,
            params: &crate::ports::host::ActionParams,
        ) -> Result<(), PanelError> {
            self.actions.lock().unwrap().push(RecordedAction {
                device,
                service: service.to_string(),
                action: action.to_string(),
                params: params.to_vec(),
            });
            Ok(())
        }

        async fn get_device_state(
            &self,
            _device: DeviceId,
            _service: &str,
            _variable: &str,
        ) -> Result<Option<String>, PanelError> {
            Ok(None)
        }

        async fn set_device_state_persistent(
            &self,
            _device: DeviceId,
            _service: &str,
            _variable: &str,
            _value: &str,
        ) -> Result<(), PanelError> {
            Ok(())
        }

        async fn perform_action(
            &self,
            _device: DeviceId,
            _service: &str,
            _action: &str,
            _params: &crate::ports::host::ActionParams,
        ) -> Result<(), PanelError> {
            Ok(())
        }
    }

    fn debouncer() -> (Arc<RecordingHost>, SetpointDebouncer<RecordingHost>) {
        let host = Arc::new(RecordingHost::default());
        let debouncer = SetpointDebouncer::new(Arc::clone(&host), DELAY);
        (host, debouncer)
    }

    #[tokio::test(start_paused = true)]
    async fn should_coalesce_rapid_clicks_into_single_dispatch() {
        let (host, debouncer) = debouncer();
        let device = DeviceId::new(1);

        let v1 = debouncer.adjust(device, SetpointKind::Heat, 21.0, 0.5);
        let v2 = debouncer.adjust(device, SetpointKind::Heat, v1, 0.5);
        let v3 = debouncer.adjust(device, SetpointKind::Heat, v2, 0.5);
        assert_eq!(v3, 22.5);

        tokio::time::sleep(AFTER).await;

        let actions = host.actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].device, device);
        assert_eq!(
            actions[0].service,
            "urn:upnp-org:serviceId:TemperatureSetpoint1_Heat"
        );
        assert_eq!(actions[0].action, "SetCurrentSetpoint");
        assert_eq!(
            actions[0].params,
            vec![("NewCurrentSetpoint".to_string(), "22.5".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_dispatch_each_click_when_spaced_beyond_delay() {
        let (host, debouncer) = debouncer();
        let device = DeviceId::new(1);

        let v1 = debouncer.adjust(device, SetpointKind::Cool, 24.0, -0.5);
        tokio::time::sleep(AFTER).await;
        debouncer.adjust(device, SetpointKind::Cool, v1, -0.5);
        tokio::time::sleep(AFTER).await;

        let actions = host.actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].params[0].1, "23.5");
        assert_eq!(actions[1].params[0].1, "23");
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_independent_timers_per_control() {
        let (host, debouncer) = debouncer();
        let device = DeviceId::new(1);

        // Up and down on the same setpoint are distinct controls, as are
        // the two setpoints; none of these cancel each other.
        debouncer.adjust(device, SetpointKind::Heat, 21.0, 0.5);
        debouncer.adjust(device, SetpointKind::Heat, 21.5, -0.5);
        debouncer.adjust(device, SetpointKind::Cool, 25.0, 0.5);

        tokio::time::sleep(AFTER).await;

        assert_eq!(host.actions().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_dispatch_before_delay_elapses() {
        let (host, debouncer) = debouncer();
        debouncer.adjust(DeviceId::new(1), SetpointKind::Heat, 21.0, 0.5);

        tokio::time::sleep(Duration::from_millis(1400)).await;

        assert!(host.actions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_expose_pending_value_until_dispatch() {
        let (_host, debouncer) = debouncer();
        let device = DeviceId::new(1);

        assert_eq!(debouncer.pending_value(device, SetpointKind::Heat), None);

        debouncer.adjust(device, SetpointKind::Heat, 21.0, 0.5);
        assert_eq!(
            debouncer.pending_value(device, SetpointKind::Heat),
            Some(21.5)
        );
        assert_eq!(debouncer.pending_value(device, SetpointKind::Cool), None);

        tokio::time::sleep(AFTER).await;
        assert_eq!(debouncer.pending_value(device, SetpointKind::Heat), None);
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_latest_pending_value_across_directions() {
        let (_host, debouncer) = debouncer();
        let device = DeviceId::new(1);

        debouncer.adjust(device, SetpointKind::Heat, 21.0, 0.5);
        debouncer.adjust(device, SetpointKind::Heat, 21.5, -0.5);

        // The down slot was updated last; its value is what the display
        // currently shows.
        assert_eq!(
            debouncer.pending_value(device, SetpointKind::Heat),
            Some(21.0)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_scope_slots_per_device() {
        let (host, debouncer) = debouncer();

        debouncer.adjust(DeviceId::new(1), SetpointKind::Heat, 21.0, 0.5);
        debouncer.adjust(DeviceId::new(2), SetpointKind::Heat, 18.0, 0.5);

        tokio::time::sleep(AFTER).await;

        let actions = host.actions();
        assert_eq!(actions.len(), 2);
        assert_ne!(actions[0].device, actions[1].device);
    }

    #[test]
    fn should_derive_direction_from_step_sign() {
        assert_eq!(StepDirection::of_step(0.5), StepDirection::Up);
        assert_eq!(StepDirection::of_step(-0.5), StepDirection::Down);
    }
}
