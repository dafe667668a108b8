//! Alarms and the weekday repetition mask.
//!
//! The mask packs seven weekday flags into one byte, Monday in bit 0 through
//! Sunday in bit 6. Bit 7 is never set.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Day of the week, in mask bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Mask bit of this day.
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Parse a short or long English day name.
    pub fn parse(s: &str) -> Option<Weekday> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|d| {
            let name = d.name();
            lower == name || (lower.len() >= 3 && name.starts_with(&lower))
        })
    }

    fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

/// Build a repetition mask from seven flags, Monday first.
pub fn encode_mask(days: [bool; 7]) -> u8 {
    days.iter()
        .zip(Weekday::ALL)
        .filter(|(on, _)| **on)
        .fold(0, |mask, (_, day)| mask | day.bit())
}

/// Whether `mask` repeats on `day`.
pub fn decode(mask: u8, day: Weekday) -> bool {
    mask & day.bit() != 0
}

/// Mask covering the given days.
pub fn mask_of(days: &[Weekday]) -> u8 {
    days.iter().fold(0, |mask, day| mask | day.bit())
}

/// An alarm slot on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    /// Address of the owning device.
    pub device_address: String,
    /// Slot index on the device.
    pub position: u8,
    pub enabled: bool,
    pub smart_wakeup: bool,
    pub snooze: bool,
    pub repetition: u8,
    pub hour: u8,
    pub minute: u8,
}

impl Alarm {
    /// A disabled, non-repeating alarm at 00:00.
    pub fn new(device_address: impl Into<String>, position: u8) -> Self {
        Self {
            device_address: device_address.into(),
            position,
            enabled: false,
            smart_wakeup: false,
            snooze: false,
            repetition: 0,
            hour: 0,
            minute: 0,
        }
    }

    /// Set the time, rejecting anything outside 00:00..=23:59.
    pub fn set_time(&mut self, hour: u8, minute: u8) -> Result<()> {
        validate_time(hour, minute)?;
        self.hour = hour;
        self.minute = minute;
        Ok(())
    }

    pub fn set_repetition(&mut self, days: [bool; 7]) {
        self.repetition = encode_mask(days);
    }

    pub fn repeats_on(&self, day: Weekday) -> bool {
        decode(self.repetition, day)
    }

    pub fn is_repetitive(&self) -> bool {
        self.repetition != 0
    }

    pub fn validate(&self) -> Result<()> {
        validate_time(self.hour, self.minute)
    }
}

fn validate_time(hour: u8, minute: u8) -> Result<()> {
    if hour > 23 || minute > 59 {
        return Err(Error::InvalidAlarmTime { hour, minute });
    }
    Ok(())
}
