//! Device descriptors and the room-grouped ordering used by selection menus.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// Label used for devices that belong to no room.
pub const NO_ROOM: &str = "No Room";

/// A device as reported by the host inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub id: DeviceId,
    pub name: String,
    /// Room name, `None` when the device is unassigned.
    pub room: Option<String>,
}

impl DeviceDescriptor {
    #[must_use]
    pub fn new(id: DeviceId, name: impl Into<String>, room: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            room,
        }
    }

    /// Menu display name, `"#<id> <name>"`.
    #[must_use]
    pub fn friendly_name(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

/// Devices of one room, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomGroup {
    pub name: String,
    pub devices: Vec<DeviceDescriptor>,
}

impl RoomGroup {
    /// Group `devices` by room for menu display.
    ///
    /// `exclude` drops the panel's own device (a thermostat must not feed
    /// itself). Devices sort case-insensitively by name with ties broken by
    /// id; rooms sort by name with the unassigned group last. Empty groups
    /// are not emitted.
    #[must_use]
    pub fn group(devices: &[DeviceDescriptor], exclude: DeviceId) -> Vec<Self> {
        let mut sorted: Vec<&DeviceDescriptor> =
            devices.iter().filter(|dev| dev.id != exclude).collect();
        sorted.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });

        let mut groups: Vec<RoomGroup> = Vec::new();
        for dev in sorted {
            let room = dev.room.as_deref().unwrap_or(NO_ROOM);
            match groups.iter_mut().find(|grp| grp.name == room) {
                Some(grp) => grp.devices.push(dev.clone()),
                None => groups.push(RoomGroup {
                    name: room.to_string(),
                    devices: vec![dev.clone()],
                }),
            }
        }
        groups.sort_by(|a, b| {
            let a_last = a.name == NO_ROOM;
            let b_last = b.name == NO_ROOM;
            a_last.cmp(&b_last).then_with(|| a.name.cmp(&b.name))
        });
        groups
    }
}
