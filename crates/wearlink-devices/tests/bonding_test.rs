//! Tests for bond removal through the platform capability

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wearlink_core::{DeviceType, PairedDevice};
use wearlink_devices::{BondManager, BondService, DeviceError, PlatformError};

struct FakeBondManager {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeBondManager {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
        })
    }
}

impl BondManager for FakeBondManager {
    fn remove_bond(&self, address: &str) -> Result<bool, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(PlatformError::Failed(format!("no remote device {address}")))
        } else {
            Ok(true)
        }
    }
}

fn device() -> PairedDevice {
    PairedDevice::new("AA:BB:CC:DD:EE:FF", "Pebble", DeviceType::Pebble)
}

#[test]
fn test_remove_bond_delegates() {
    let manager = FakeBondManager::new(false);
    let service = BondService::new(manager.clone());

    assert!(service.is_supported());
    assert!(service.remove_bond(&device()).unwrap());
    assert_eq!(manager.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_platform_failure_surfaces() {
    let service = BondService::new(FakeBondManager::new(true));

    match service.remove_bond(&device()) {
        Err(DeviceError::BondRemoval { address, source }) => {
            assert_eq!(address, "AA:BB:CC:DD:EE:FF");
            assert!(matches!(source, PlatformError::Failed(_)));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_missing_capability_is_unsupported() {
    let service = BondService::unsupported();
    assert!(!service.is_supported());

    let err = service.remove_bond(&device()).unwrap_err();
    assert!(matches!(
        err,
        DeviceError::BondRemoval {
            source: PlatformError::Unsupported,
            ..
        }
    ));
    assert!(err.to_string().contains("AA:BB:CC:DD:EE:FF"));
}
