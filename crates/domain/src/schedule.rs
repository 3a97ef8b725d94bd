//! Schedule window codec.
//!
//! The host stores the panel's schedule opaquely as a single string:
//! `"<startMinutes>-<endMinutes>"` where each side is `hour * 60 + minute`,
//! or the empty string for "no schedule". Only this crate knows the format.

use std::fmt;

use crate::error::ValidationError;

/// A wall-clock time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeOfDay {
    hour: u16,
    minute: u16,
}

impl TimeOfDay {
    /// Build from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `hour > 23` or `minute > 59`.
    pub fn new(hour: u16, minute: u16) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ValidationError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    /// Build from minutes past midnight.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `minutes` exceeds 23:59.
    pub fn from_minutes(minutes: u16) -> Result<Self, ValidationError> {
        Self::new(minutes / 60, minutes % 60)
    }

    /// Minutes past midnight.
    #[must_use]
    pub fn total_minutes(self) -> u16 {
        self.hour * 60 + self.minute
    }

    #[must_use]
    pub fn hour(self) -> u16 {
        self.hour
    }

    #[must_use]
    pub fn minute(self) -> u16 {
        self.minute
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A daily activation window.
///
/// The window may wrap midnight (`end < start`); the host interprets the
/// minutes, the panel only round-trips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Schedule {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Schedule {
    /// Encode into the persisted `"<start>-<end>"` form.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}-{}", self.start.total_minutes(), self.end.total_minutes())
    }

    /// Encode an optional schedule; `None` persists as the empty string.
    #[must_use]
    pub fn encode_opt(schedule: Option<&Self>) -> String {
        schedule.map(Self::encode).unwrap_or_default()
    }

    /// Decode the persisted form. Empty (or whitespace-only) text means no
    /// schedule.
    ///
    /// # Errors
    ///
    /// Returns a validation error for anything that is neither empty nor two
    /// in-range minute counts joined by `-`.
    pub fn decode(text: &str) -> Result<Option<Self>, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let malformed = || ValidationError::MalformedSchedule(text.to_string());
        let (start, end) = text.split_once('-').ok_or_else(malformed)?;
        let start: u16 = start.parse().map_err(|_| malformed())?;
        let end: u16 = end.parse().map_err(|_| malformed())?;
        Ok(Some(Self {
            start: TimeOfDay::from_minutes(start)?,
            end: TimeOfDay::from_minutes(end)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(sh: u16, sm: u16, eh: u16, em: u16) -> Schedule {
        Schedule {
            start: TimeOfDay::new(sh, sm).unwrap(),
            end: TimeOfDay::new(eh, em).unwrap(),
        }
    }

    #[test]
    fn should_encode_830_to_1700_as_510_1020() {
        assert_eq!(schedule(8, 30, 17, 0).encode(), "510-1020");
    }

    #[test]
    fn should_decode_510_1020_back_to_830_and_1700() {
        let decoded = Schedule::decode("510-1020").unwrap().unwrap();
        assert_eq!(decoded.start.hour(), 8);
        assert_eq!(decoded.start.minute(), 30);
        assert_eq!(decoded.end.hour(), 17);
        assert_eq!(decoded.end.minute(), 0);
    }

    #[test]
    fn should_treat_empty_string_as_no_schedule() {
        assert_eq!(Schedule::decode("").unwrap(), None);
        assert_eq!(Schedule::decode("  ").unwrap(), None);
    }

    #[test]
    fn should_encode_none_as_empty_string() {
        assert_eq!(Schedule::encode_opt(None), "");
    }

    #[test]
    fn should_roundtrip_midnight_wrap() {
        let sched = schedule(22, 0, 6, 30);
        let decoded = Schedule::decode(&sched.encode()).unwrap().unwrap();
        assert_eq!(decoded, sched);
    }

    #[test]
    fn should_reject_malformed_text() {
        assert!(matches!(
            Schedule::decode("510"),
            Err(ValidationError::MalformedSchedule(_))
        ));
        assert!(matches!(
            Schedule::decode("abc-def"),
            Err(ValidationError::MalformedSchedule(_))
        ));
    }

    #[test]
    fn should_reject_out_of_range_minutes() {
        // 1440 is 24:00, one past the last representable minute.
        assert!(Schedule::decode("1440-10").is_err());
    }

    #[test]
    fn should_reject_out_of_range_time_components() {
        assert!(matches!(
            TimeOfDay::new(24, 0),
            Err(ValidationError::HourOutOfRange(24))
        ));
        assert!(matches!(
            TimeOfDay::new(0, 60),
            Err(ValidationError::MinuteOutOfRange(60))
        ));
    }

    #[test]
    fn should_format_time_with_leading_zeros() {
        assert_eq!(TimeOfDay::new(8, 5).unwrap().to_string(), "08:05");
    }
}
