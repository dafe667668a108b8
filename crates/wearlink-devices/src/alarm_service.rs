//! Alarm editing.
//!
//! Requested smart-wakeup and snooze settings are stored only as far as the
//! device's coordinator supports them, so a stored alarm never carries a
//! flag the device cannot honour.

use serde::Deserialize;
use tracing::debug;
use wearlink_core::alarm::encode_mask;
use wearlink_core::{Alarm, PairedDevice};
use wearlink_storage::DeviceStore;

use crate::coordinator::Coordinator;
use crate::error::{DeviceError, Result};
use crate::registry::CoordinatorRegistry;

/// Alarm settings as requested by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlarmEdit {
    pub position: u8,
    pub enabled: bool,
    pub smart_wakeup: bool,
    pub snooze: bool,
    /// Weekday mask, Monday in bit 0.
    pub repetition: u8,
    pub hour: u8,
    pub minute: u8,
}

impl AlarmEdit {
    pub fn new(position: u8, hour: u8, minute: u8) -> Self {
        Self {
            position,
            enabled: true,
            hour,
            minute,
            ..Self::default()
        }
    }

    /// Repeat on the flagged days, Monday first.
    pub fn repeat_on(mut self, days: [bool; 7]) -> Self {
        self.repetition = encode_mask(days);
        self
    }

    pub fn with_smart_wakeup(mut self, on: bool) -> Self {
        self.smart_wakeup = on;
        self
    }

    pub fn with_snooze(mut self, on: bool) -> Self {
        self.snooze = on;
        self
    }
}

/// Applies alarm edits for paired devices.
pub struct AlarmService<'a> {
    registry: &'a CoordinatorRegistry,
    store: &'a dyn DeviceStore,
}

impl<'a> AlarmService<'a> {
    pub fn new(registry: &'a CoordinatorRegistry, store: &'a dyn DeviceStore) -> Self {
        Self { registry, store }
    }

    /// Gate, validate and persist an edit. Returns the alarm as stored.
    pub fn update(&self, edit: &AlarmEdit, device: &PairedDevice) -> Result<Alarm> {
        let coordinator = self.registry.resolve_device(device);
        if *coordinator == Coordinator::Unknown {
            return Err(DeviceError::Unsupported(device.address.clone()));
        }

        let slots = coordinator.alarm_slot_count();
        if edit.position >= slots {
            return Err(DeviceError::AlarmSlot {
                position: edit.position,
                slots,
            });
        }

        let mut alarm = Alarm::new(&device.address, edit.position);
        alarm.enabled = edit.enabled;
        alarm.smart_wakeup = edit.smart_wakeup && coordinator.supports_smart_wakeup(device);
        alarm.snooze = edit.snooze && coordinator.supports_alarm_snoozing();
        alarm.repetition = edit.repetition & 0x7F;
        alarm.set_time(edit.hour, edit.minute)?;

        if alarm.smart_wakeup != edit.smart_wakeup || alarm.snooze != edit.snooze {
            debug!(
                address = %device.address,
                coordinator = %coordinator,
                "Dropped alarm flags the device does not support"
            );
        }

        self.store.save_alarm(&alarm)?;
        Ok(alarm)
    }

    /// Stored alarms of a device, ordered by position.
    pub fn alarms_for(&self, device: &PairedDevice) -> Result<Vec<Alarm>> {
        Ok(self.store.alarms_for_device(&device.address)?)
    }
}
