//! Paired devices and their persisted form.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::DeviceType;

/// A device the host has paired with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedDevice {
    pub address: String,
    pub alias: String,
    pub device_type: DeviceType,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    /// Secondary firmware, e.g. the heart-rate sensor on some bands.
    #[serde(default)]
    pub firmware_version2: Option<String>,
    /// Address some platforms rotate between connections.
    #[serde(default)]
    pub volatile_address: Option<String>,
}

impl PairedDevice {
    pub fn new(address: impl Into<String>, alias: impl Into<String>, device_type: DeviceType) -> Self {
        Self {
            address: address.into(),
            alias: alias.into(),
            device_type,
            model: None,
            firmware_version: None,
            firmware_version2: None,
            volatile_address: None,
        }
    }
}

/// One attribute row of a stored device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAttributes {
    #[serde(default)]
    pub firmware_version1: Option<String>,
    #[serde(default)]
    pub firmware_version2: Option<String>,
    #[serde(default)]
    pub volatile_identifier: Option<String>,
    /// Unix timestamp of when the row was recorded.
    #[serde(default)]
    pub recorded_at: i64,
}

/// Stored form of a paired device.
///
/// Attribute rows are kept newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub identifier: String,
    pub name: String,
    pub type_key: i32,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub attributes: Vec<DeviceAttributes>,
}

fn default_active() -> bool {
    true
}

impl DeviceRecord {
    /// Build a record for a device, with one attribute row if any attribute
    /// is known.
    pub fn from_paired(device: &PairedDevice) -> Self {
        let mut attributes = Vec::new();
        if device.firmware_version.is_some()
            || device.firmware_version2.is_some()
            || device.volatile_address.is_some()
        {
            attributes.push(DeviceAttributes {
                firmware_version1: device.firmware_version.clone(),
                firmware_version2: device.firmware_version2.clone(),
                volatile_identifier: device.volatile_address.clone(),
                recorded_at: Utc::now().timestamp(),
            });
        }

        Self {
            identifier: device.address.clone(),
            name: device.alias.clone(),
            type_key: device.device_type.key(),
            model: device.model.clone(),
            active: true,
            attributes,
        }
    }

    pub fn device_type(&self) -> DeviceType {
        DeviceType::from_key(self.type_key)
    }
}
