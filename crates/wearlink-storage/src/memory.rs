//! In-memory device store.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use wearlink_core::{Alarm, DeviceRecord};

use crate::{DeviceStore, Error, Result};

/// [`DeviceStore`] kept in memory.
#[derive(Default)]
pub struct MemoryDeviceStore {
    devices: RwLock<BTreeMap<String, DeviceRecord>>,
    alarms: RwLock<BTreeMap<(String, u8), Alarm>>,
}

impl MemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with records.
    pub fn with_devices(records: impl IntoIterator<Item = DeviceRecord>) -> Self {
        let store = Self::new();
        {
            let mut devices = store.devices.write();
            for record in records {
                devices.insert(record.identifier.clone(), record);
            }
        }
        store
    }
}

impl DeviceStore for MemoryDeviceStore {
    fn active_devices(&self) -> Result<Vec<DeviceRecord>> {
        Ok(self
            .devices
            .read()
            .values()
            .filter(|d| d.active)
            .cloned()
            .collect())
    }

    fn load_device(&self, identifier: &str) -> Result<Option<DeviceRecord>> {
        Ok(self.devices.read().get(identifier).cloned())
    }

    fn save_device(&self, record: &DeviceRecord) -> Result<()> {
        if record.identifier.is_empty() {
            return Err(Error::InvalidInput("device identifier is empty".to_string()));
        }
        self.devices
            .write()
            .insert(record.identifier.clone(), record.clone());
        Ok(())
    }

    fn remove_device(&self, identifier: &str) -> Result<bool> {
        let removed = self.devices.write().remove(identifier).is_some();
        self.alarms
            .write()
            .retain(|(address, _), _| address != identifier);
        Ok(removed)
    }

    fn save_alarm(&self, alarm: &Alarm) -> Result<()> {
        alarm.validate()?;
        self.alarms
            .write()
            .insert((alarm.device_address.clone(), alarm.position), alarm.clone());
        Ok(())
    }

    fn alarms_for_device(&self, address: &str) -> Result<Vec<Alarm>> {
        // Keys sort by (address, position).
        Ok(self
            .alarms
            .read()
            .iter()
            .filter(|((a, _), _)| a == address)
            .map(|(_, alarm)| alarm.clone())
            .collect())
    }
}
