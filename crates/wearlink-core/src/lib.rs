//! Core types for Wearlink.
//!
//! This crate holds the data model shared by the codec, storage and device
//! crates: device type keys, discovery candidates, paired-device records, the
//! capability model and the alarm entity with its repetition codec.

pub mod alarm;
pub mod candidate;
pub mod capability;
pub mod config;
pub mod device;
pub mod device_type;
pub mod error;

pub use alarm::{Alarm, Weekday};
pub use candidate::{bluetooth_uuid, CandidateDescriptor, MacAddress, RSSI_UNKNOWN};
pub use capability::{BondingStyle, Capabilities, SettingsPanel};
pub use config::HostConfig;
pub use device::{DeviceAttributes, DeviceRecord, PairedDevice};
pub use device_type::DeviceType;
pub use error::{Error, Result};

/// Re-exports commonly used types.
pub mod prelude {
    pub use crate::alarm::{Alarm, Weekday};
    pub use crate::candidate::{CandidateDescriptor, MacAddress};
    pub use crate::capability::{BondingStyle, Capabilities, SettingsPanel};
    pub use crate::config::HostConfig;
    pub use crate::device::{DeviceRecord, PairedDevice};
    pub use crate::device_type::DeviceType;
    pub use crate::error::{Error, Result};
}
