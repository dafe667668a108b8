//! Tests for capability-gated alarm editing

use tempfile::TempDir;
use wearlink_core::alarm::decode;
use wearlink_core::{DeviceType, PairedDevice, Weekday};
use wearlink_devices::{AlarmEdit, AlarmService, CoordinatorRegistry, DeviceError};
use wearlink_storage::{MemoryDeviceStore, RedbDeviceStore};

fn bip() -> PairedDevice {
    PairedDevice::new("AA:BB:CC:00:00:01", "Bip", DeviceType::AmazfitBip)
}

fn miband() -> PairedDevice {
    PairedDevice::new("88:0F:10:00:00:01", "MI", DeviceType::MiBand)
}

fn hybrid() -> PairedDevice {
    PairedDevice::new("AA:BB:CC:00:00:02", "Hybrid HR", DeviceType::FossilQHybrid)
}

#[test]
fn test_smart_wakeup_gated_off_when_unsupported() {
    let registry = CoordinatorRegistry::new();
    let store = MemoryDeviceStore::new();
    let service = AlarmService::new(&registry, &store);

    let edit = AlarmEdit::new(0, 6, 45).with_smart_wakeup(true).with_snooze(true);
    let stored = service.update(&edit, &bip()).unwrap();

    assert!(!stored.smart_wakeup);
    assert!(!stored.snooze);
    assert_eq!((stored.hour, stored.minute), (6, 45));
    assert_eq!(service.alarms_for(&bip()).unwrap(), vec![stored]);
}

#[test]
fn test_supported_flags_are_kept() {
    let registry = CoordinatorRegistry::new();
    let store = MemoryDeviceStore::new();
    let service = AlarmService::new(&registry, &store);

    let edit = AlarmEdit::new(1, 7, 0).with_smart_wakeup(true).with_snooze(true);

    let band = service.update(&edit, &miband()).unwrap();
    assert!(band.smart_wakeup);
    assert!(!band.snooze);

    let watch = service.update(&edit, &hybrid()).unwrap();
    assert!(!watch.smart_wakeup);
    assert!(watch.snooze);
}

#[test]
fn test_repetition_persisted() {
    let registry = CoordinatorRegistry::new();
    let store = MemoryDeviceStore::new();
    let service = AlarmService::new(&registry, &store);

    let weekdays = [true, true, true, true, true, false, false];
    let edit = AlarmEdit::new(2, 6, 30).repeat_on(weekdays);
    service.update(&edit, &bip()).unwrap();

    let stored = &service.alarms_for(&bip()).unwrap()[0];
    for (day, expected) in Weekday::ALL.iter().zip(weekdays) {
        assert_eq!(decode(stored.repetition, *day), expected, "{day:?}");
    }
}

#[test]
fn test_invalid_time_rejected_and_not_stored() {
    let registry = CoordinatorRegistry::new();
    let store = MemoryDeviceStore::new();
    let service = AlarmService::new(&registry, &store);

    let result = service.update(&AlarmEdit::new(0, 24, 0), &bip());
    assert!(matches!(result, Err(DeviceError::Validation(_))));
    assert!(service.alarms_for(&bip()).unwrap().is_empty());
}

#[test]
fn test_slot_out_of_range() {
    let registry = CoordinatorRegistry::new();
    let store = MemoryDeviceStore::new();
    let service = AlarmService::new(&registry, &store);

    let result = service.update(&AlarmEdit::new(3, 8, 0), &miband());
    assert!(matches!(
        result,
        Err(DeviceError::AlarmSlot { position: 3, slots: 3 })
    ));
}

#[test]
fn test_unknown_device_rejected() {
    let registry = CoordinatorRegistry::new();
    let store = MemoryDeviceStore::new();
    let service = AlarmService::new(&registry, &store);

    let device = PairedDevice::new("00:11:22:33:44:55", "?", DeviceType::Unknown);
    let result = service.update(&AlarmEdit::new(0, 8, 0), &device);
    assert!(matches!(result, Err(DeviceError::Unsupported(_))));
}

#[test]
fn test_alarms_sorted_in_redb_store() {
    let dir = TempDir::new().unwrap();
    let store = RedbDeviceStore::open(dir.path().join("alarms.redb")).unwrap();
    let registry = CoordinatorRegistry::new();
    let service = AlarmService::new(&registry, &store);

    for position in [4, 0, 2] {
        service
            .update(&AlarmEdit::new(position, 9, position), &bip())
            .unwrap();
    }

    let positions: Vec<u8> = service
        .alarms_for(&bip())
        .unwrap()
        .iter()
        .map(|a| a.position)
        .collect();
    assert_eq!(positions, vec![0, 2, 4]);
}
