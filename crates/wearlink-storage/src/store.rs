//! The storage interface consumed by the device layer.

use wearlink_core::{Alarm, DeviceRecord};

use crate::Result;

/// Persistence of paired devices and alarms.
///
/// Implementations serialise access internally; callers never hold a lock
/// across calls.
pub trait DeviceStore: Send + Sync {
    /// Devices currently marked active.
    fn active_devices(&self) -> Result<Vec<DeviceRecord>>;

    fn load_device(&self, identifier: &str) -> Result<Option<DeviceRecord>>;

    /// Insert or replace a device record.
    fn save_device(&self, record: &DeviceRecord) -> Result<()>;

    /// Remove a device and its alarms. Returns whether the device existed.
    fn remove_device(&self, identifier: &str) -> Result<bool>;

    /// Insert or replace the alarm at its device position.
    fn save_alarm(&self, alarm: &Alarm) -> Result<()>;

    /// Alarms of a device, ordered by position.
    fn alarms_for_device(&self, address: &str) -> Result<Vec<Alarm>>;
}
