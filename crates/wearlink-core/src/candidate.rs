//! Discovery candidates.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Signal strength reported when the scanner gave none.
pub const RSSI_UNKNOWN: i16 = 0;

/// Expand a 16-bit assigned number into a full Bluetooth base UUID.
pub const fn bluetooth_uuid(short: u16) -> Uuid {
    const BASE: u128 = 0x0000_0000_0000_1000_8000_0080_5f9b_34fb;
    Uuid::from_u128(BASE | ((short as u128) << 96))
}

/// A 48-bit Bluetooth device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Organisationally unique identifier, the first three octets.
    pub fn oui(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.split(':');
        for octet in octets.iter_mut() {
            let part = parts
                .next()
                .filter(|p| p.len() == 2)
                .ok_or_else(|| Error::MalformedAddress(s.to_string()))?;
            *octet = u8::from_str_radix(part, 16)
                .map_err(|_| Error::MalformedAddress(s.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(Error::MalformedAddress(s.to_string()));
        }
        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

/// What a scan reported about one nearby device.
///
/// The address is kept as given by the platform; only some coordinators need
/// it to be a MAC and they parse it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDescriptor {
    address: String,
    name: Option<String>,
    rssi: i16,
    services: BTreeSet<Uuid>,
}

impl CandidateDescriptor {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            rssi: RSSI_UNKNOWN,
            services: BTreeSet::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rssi(mut self, rssi: i16) -> Self {
        self.rssi = rssi;
        self
    }

    pub fn with_service(mut self, service: Uuid) -> Self {
        self.services.insert(service);
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rssi(&self) -> i16 {
        self.rssi
    }

    pub fn services(&self) -> &BTreeSet<Uuid> {
        &self.services
    }

    pub fn supports_service(&self, service: &Uuid) -> bool {
        self.services.contains(service)
    }

    /// Parse the address as a MAC.
    pub fn mac_address(&self) -> crate::Result<MacAddress> {
        self.address.parse()
    }
}
