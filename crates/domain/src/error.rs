//! Common error types used across the workspace.
//!
//! Each layer defines typed errors and converts into [`PanelError`] via
//! `#[from]`. Adapters map the variants onto their own surface (HTTP status
//! codes, log records).

/// Top-level error for every fallible panel operation.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// Input failed a domain invariant before reaching the host.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced device or configuration entry does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// The host controller could not be reached or rejected the call.
    #[error("host error: {0}")]
    Host(#[from] HostError),
}

/// Domain invariant violations. These never reach the host.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Displayed setpoint text did not parse as a number. The adjustment is
    /// dropped rather than dispatched (fail closed).
    #[error("displayed setpoint {text:?} is not a number")]
    Setpoint { text: String },

    /// A posted step was not the configured increment (in either
    /// direction) or was not numeric at all.
    #[error("unsupported setpoint step {text:?}")]
    UnsupportedStep { text: String },

    /// A posted command tuple did not match any known menu option.
    #[error("unknown command {service}#{action} value {value:?}")]
    UnknownCommand {
        service: String,
        action: String,
        value: String,
    },

    /// Schedule hours run 0..=23.
    #[error("hour {0} out of range")]
    HourOutOfRange(u16),

    /// Schedule minutes run 0..=59.
    #[error("minute {0} out of range")]
    MinuteOutOfRange(u16),

    /// A persisted schedule string did not match `"<start>-<end>"`.
    #[error("malformed schedule {0:?}")]
    MalformedSchedule(String),

    /// A persisted sensor list contained a non-numeric device id.
    #[error("malformed device id {0:?} in sensor list")]
    MalformedDeviceId(String),
}

/// A lookup that came back empty.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of thing being looked up (`"Device"`, …).
    pub entity: &'static str,
    /// Identifier as text, for the log line.
    pub id: String,
}

/// Failure reported by the host controller transport.
#[derive(Debug, thiserror::Error)]
#[error("host request failed: {reason}")]
pub struct HostError {
    pub reason: String,
}

impl HostError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_setpoint_validation_message() {
        let err = PanelError::from(ValidationError::Setpoint {
            text: "--.-".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "validation error: displayed setpoint \"--.-\" is not a number"
        );
    }

    #[test]
    fn should_render_not_found_message() {
        let err = PanelError::from(NotFoundError {
            entity: "Device",
            id: "42".to_string(),
        });
        assert_eq!(err.to_string(), "Device 42 not found");
    }

    #[test]
    fn should_wrap_host_error() {
        let err = PanelError::from(HostError::new("connection refused"));
        assert!(matches!(err, PanelError::Host(_)));
    }
}
