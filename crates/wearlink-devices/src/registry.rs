//! Coordinator registry.
//!
//! Resolves scan candidates and paired devices to the coordinator of their
//! family. Coordinators are tried in a fixed order and the first match wins,
//! so a family whose predicate is a superset of another's (the generic Mi Band
//! check, the "Amazfit Bip" name prefix) sits after the narrower ones.
//!
//! The order is:
//!
//! 1. Mi Scale 2
//! 2. Amazfit Bip Lite, Bip S, then the generic Bip
//! 3. Amazfit Cor, Cor 2, GTR, GTS
//! 4. Mi Band 3, Mi Band 4, Mi Band 2 HRX, Mi Band 2
//! 5. Mi Band (any "MI" name or vendor prefix)
//! 6. Pebble, Fossil Q Hybrid, Bangle.js
//!
//! Nothing matching is not an error: the [`Coordinator::Unknown`] sentinel is
//! returned and it supports nothing.

use std::collections::HashSet;
use std::sync::OnceLock;

use tracing::{debug, error};
use wearlink_core::config::defaults;
use wearlink_core::{CandidateDescriptor, DeviceRecord, DeviceType, HostConfig, PairedDevice};
use wearlink_storage::DeviceStore;

use crate::coordinator::{Coordinator, HuamiModel};

static UNKNOWN: Coordinator = Coordinator::Unknown;

/// Ordered list of all known coordinators.
#[derive(Debug, Clone)]
pub struct CoordinatorRegistry {
    coordinators: Vec<Coordinator>,
}

impl Default for CoordinatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinatorRegistry {
    pub fn new() -> Self {
        let coordinators = vec![
            Coordinator::MiScale2,
            Coordinator::Huami(HuamiModel::AmazfitBipLite),
            Coordinator::Huami(HuamiModel::AmazfitBipS),
            Coordinator::Huami(HuamiModel::AmazfitBip),
            Coordinator::Huami(HuamiModel::AmazfitCor),
            Coordinator::Huami(HuamiModel::AmazfitCor2),
            Coordinator::Huami(HuamiModel::AmazfitGtr),
            Coordinator::Huami(HuamiModel::AmazfitGts),
            Coordinator::Huami(HuamiModel::MiBand3),
            Coordinator::Huami(HuamiModel::MiBand4),
            Coordinator::Huami(HuamiModel::MiBand2Hrx),
            Coordinator::Huami(HuamiModel::MiBand2),
            Coordinator::MiBand,
            Coordinator::Pebble,
            Coordinator::FossilQHybrid,
            Coordinator::BangleJs,
        ];
        debug!(count = coordinators.len(), "Built coordinator registry");
        Self { coordinators }
    }

    /// Process-wide registry, built on first use.
    pub fn global() -> &'static CoordinatorRegistry {
        static REGISTRY: OnceLock<CoordinatorRegistry> = OnceLock::new();
        REGISTRY.get_or_init(CoordinatorRegistry::new)
    }

    /// Coordinators in resolution order.
    pub fn coordinators(&self) -> &[Coordinator] {
        &self.coordinators
    }

    /// First coordinator recognising the candidate, or the sentinel.
    pub fn resolve_candidate(&self, candidate: &CandidateDescriptor) -> &Coordinator {
        self.coordinators
            .iter()
            .find(|c| c.recognizes(candidate))
            .unwrap_or(&UNKNOWN)
    }

    /// First coordinator supporting the paired device, or the sentinel.
    pub fn resolve_device(&self, device: &PairedDevice) -> &Coordinator {
        self.coordinators
            .iter()
            .find(|c| c.supports_device(device))
            .unwrap_or(&UNKNOWN)
    }

    pub fn supported_type(&self, candidate: &CandidateDescriptor) -> DeviceType {
        self.resolve_candidate(candidate).device_type()
    }

    pub fn is_supported(&self, device: &PairedDevice) -> bool {
        self.coordinators.iter().any(|c| c.supports_device(device))
    }

    /// Paired-device record for a candidate, if any family recognises it.
    pub fn to_supported_device(&self, candidate: &CandidateDescriptor) -> Option<PairedDevice> {
        self.coordinators
            .iter()
            .find(|c| c.recognizes(candidate))
            .map(|c| c.create_device(candidate))
    }

    /// Convert a stored record. The device may no longer be supported;
    /// callers check with [`is_supported`](Self::is_supported).
    pub fn to_paired_device(record: &DeviceRecord) -> PairedDevice {
        let mut device = PairedDevice::new(&record.identifier, &record.name, record.device_type());
        if let Some(attrs) = record.attributes.first() {
            device.model = record.model.clone();
            device.firmware_version = attrs.firmware_version1.clone();
            device.firmware_version2 = attrs.firmware_version2.clone();
            device.volatile_address = attrs.volatile_identifier.clone();
        }
        device
    }

    /// Devices the host can work with: supported active devices from the
    /// store, then the configured legacy entries. Each address appears once.
    pub fn available_devices(&self, store: &dyn DeviceStore, config: &HostConfig) -> Vec<PairedDevice> {
        let mut devices = self.stored_devices(store);

        if let Some(address) = config.miband_address.as_deref().filter(|a| !a.is_empty()) {
            devices.push(PairedDevice::new(address, defaults::MIBAND_ALIAS, DeviceType::MiBand));
        }
        if let Some(endpoint) = config.pebble_emulator_endpoint() {
            devices.push(PairedDevice::new(
                endpoint,
                defaults::PEBBLE_EMULATOR_ALIAS,
                DeviceType::Pebble,
            ));
        }

        let mut seen = HashSet::new();
        devices.retain(|d| seen.insert(d.address.clone()));
        devices
    }

    pub fn find_available_device(
        &self,
        address: &str,
        store: &dyn DeviceStore,
        config: &HostConfig,
    ) -> Option<PairedDevice> {
        self.available_devices(store, config)
            .into_iter()
            .find(|d| d.address == address)
    }

    fn stored_devices(&self, store: &dyn DeviceStore) -> Vec<PairedDevice> {
        match store.active_devices() {
            Ok(records) => records
                .iter()
                .map(Self::to_paired_device)
                .filter(|d| self.is_supported(d))
                .collect(),
            Err(e) => {
                error!(error = %e, "Error retrieving devices from database");
                Vec::new()
            }
        }
    }
}

/// Resolve a candidate with the process-wide registry.
pub fn resolve_candidate(candidate: &CandidateDescriptor) -> &'static Coordinator {
    CoordinatorRegistry::global().resolve_candidate(candidate)
}

/// Resolve a paired device with the process-wide registry.
pub fn resolve_device(device: &PairedDevice) -> &'static Coordinator {
    CoordinatorRegistry::global().resolve_device(device)
}
