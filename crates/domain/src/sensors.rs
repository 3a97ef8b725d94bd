//! Temperature sensor list codec.
//!
//! The host stores the selected sensors opaquely as a comma-joined list of
//! device ids (`"12,45,7"`). Order is the user's priority order and must be
//! preserved exactly.

use crate::error::ValidationError;
use crate::id::DeviceId;

/// Ordered list of temperature sensor devices feeding the thermostat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorList(Vec<DeviceId>);

impl SensorList {
    /// Build from an ordered id list.
    #[must_use]
    pub fn new(ids: Vec<DeviceId>) -> Self {
        Self(ids)
    }

    /// The ids in priority order.
    #[must_use]
    pub fn ids(&self) -> &[DeviceId] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode into the persisted comma-joined form.
    #[must_use]
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decode the persisted form. Empty segments (doubled or trailing
    /// commas, or a wholly empty string) are skipped.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a non-empty segment is not a device
    /// number.
    pub fn decode(text: &str) -> Result<Self, ValidationError> {
        let mut ids = Vec::new();
        for segment in text.split(',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let id = segment
                .parse()
                .map_err(|_| ValidationError::MalformedDeviceId(segment.to_string()))?;
            ids.push(id);
        }
        Ok(Self(ids))
    }
}

impl FromIterator<DeviceId> for SensorList {
    fn from_iter<T: IntoIterator<Item = DeviceId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[u32]) -> SensorList {
        ids.iter().copied().map(DeviceId::new).collect()
    }

    #[test]
    fn should_encode_ids_comma_joined_in_order() {
        assert_eq!(list(&[12, 45, 7]).encode(), "12,45,7");
    }

    #[test]
    fn should_decode_preserving_order() {
        let decoded = SensorList::decode("12,45,7").unwrap();
        assert_eq!(decoded, list(&[12, 45, 7]));
    }

    #[test]
    fn should_roundtrip() {
        let original = list(&[3, 1, 2]);
        assert_eq!(SensorList::decode(&original.encode()).unwrap(), original);
    }

    #[test]
    fn should_decode_empty_string_as_empty_list() {
        let decoded = SensorList::decode("").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn should_skip_empty_segments() {
        let decoded = SensorList::decode("12,,45,").unwrap();
        assert_eq!(decoded, list(&[12, 45]));
    }

    #[test]
    fn should_reject_non_numeric_segment() {
        assert!(matches!(
            SensorList::decode("12,bogus,7"),
            Err(ValidationError::MalformedDeviceId(_))
        ));
    }

    #[test]
    fn should_encode_empty_list_as_empty_string() {
        assert_eq!(SensorList::default().encode(), "");
    }
}
