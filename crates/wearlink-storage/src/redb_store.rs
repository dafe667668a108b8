//! Device store using redb.
//!
//! Records are JSON rows. Every operation runs under a [`StoreLease`], which
//! admits one holder at a time and is released when dropped, whichever way
//! the operation ends.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use redb::{Database, ReadableTable, TableDefinition};
use tracing::{debug, trace};
use wearlink_core::{Alarm, DeviceRecord};

use crate::{DeviceStore, Error, Result};

// Devices table: key = device identifier, value = DeviceRecord (JSON)
const DEVICES_TABLE: TableDefinition<&str, &str> = TableDefinition::new("paired_devices");

// Alarms table: key = (device identifier, position), value = Alarm (JSON)
const ALARMS_TABLE: TableDefinition<(&str, u8), &str> = TableDefinition::new("alarms");

/// redb-backed [`DeviceStore`].
pub struct RedbDeviceStore {
    db: Database,
    path: PathBuf,
    access: Mutex<()>,
    leases: AtomicU64,
}

impl RedbDeviceStore {
    /// Open or create a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = if path_ref.exists() {
            Database::open(path_ref)?
        } else {
            Database::create(path_ref)?
        };

        let write_txn = db.begin_write()?;
        {
            let _devices = write_txn.open_table(DEVICES_TABLE)?;
            let _alarms = write_txn.open_table(ALARMS_TABLE)?;
        }
        write_txn.commit()?;

        debug!(path = %path_ref.display(), "Opened device store");
        Ok(Self {
            db,
            path: path_ref.to_path_buf(),
            access: Mutex::new(()),
            leases: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the store, waiting for the current holder to release it.
    pub fn acquire(&self) -> StoreLease<'_> {
        let guard = self.access.lock();
        self.lease(guard)
    }

    /// Acquire the store if nobody holds it.
    pub fn try_acquire(&self) -> Option<StoreLease<'_>> {
        self.access.try_lock().map(|guard| self.lease(guard))
    }

    /// Acquire the store, giving up after `timeout`.
    pub fn acquire_timeout(&self, timeout: Duration) -> Option<StoreLease<'_>> {
        self.access
            .try_lock_for(timeout)
            .map(|guard| self.lease(guard))
    }

    fn lease<'a>(&'a self, guard: MutexGuard<'a, ()>) -> StoreLease<'a> {
        let id = self.leases.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(lease = id, "Acquired device store lease");
        StoreLease {
            db: &self.db,
            _guard: guard,
            id,
        }
    }
}

/// Exclusive access to a [`RedbDeviceStore`].
pub struct StoreLease<'a> {
    db: &'a Database,
    _guard: MutexGuard<'a, ()>,
    id: u64,
}

impl StoreLease<'_> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// All stored devices, active or not.
    pub fn all_devices(&self) -> Result<Vec<DeviceRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DEVICES_TABLE)?;

        let mut devices = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            devices.push(serde_json::from_str::<DeviceRecord>(value.value())?);
        }
        Ok(devices)
    }

    pub fn active_devices(&self) -> Result<Vec<DeviceRecord>> {
        let mut devices = self.all_devices()?;
        devices.retain(|d| d.active);
        Ok(devices)
    }

    pub fn load_device(&self, identifier: &str) -> Result<Option<DeviceRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DEVICES_TABLE)?;

        match table.get(identifier)? {
            Some(value) => Ok(Some(serde_json::from_str(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn save_device(&self, record: &DeviceRecord) -> Result<()> {
        if record.identifier.is_empty() {
            return Err(Error::InvalidInput("device identifier is empty".to_string()));
        }

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DEVICES_TABLE)?;
            let json = serde_json::to_string(record)?;
            table.insert(record.identifier.as_str(), json.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Mark a device active or inactive without touching its alarms.
    pub fn set_active(&self, identifier: &str, active: bool) -> Result<()> {
        let mut record = self
            .load_device(identifier)?
            .ok_or_else(|| Error::NotFound(identifier.to_string()))?;
        record.active = active;
        self.save_device(&record)
    }

    pub fn remove_device(&self, identifier: &str) -> Result<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut devices = write_txn.open_table(DEVICES_TABLE)?;
            let removed = devices.remove(identifier)?.is_some();

            let mut alarms = write_txn.open_table(ALARMS_TABLE)?;
            let mut positions = Vec::new();
            for result in alarms.iter()? {
                let (key, _value) = result?;
                let (address, position) = key.value();
                if address == identifier {
                    positions.push(position);
                }
            }
            for position in positions {
                alarms.remove((identifier, position))?;
            }
            removed
        };
        write_txn.commit()?;
        Ok(removed)
    }

    pub fn save_alarm(&self, alarm: &Alarm) -> Result<()> {
        alarm.validate()?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ALARMS_TABLE)?;
            let json = serde_json::to_string(alarm)?;
            table.insert((alarm.device_address.as_str(), alarm.position), json.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn alarms_for_device(&self, address: &str) -> Result<Vec<Alarm>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ALARMS_TABLE)?;

        let mut alarms = Vec::new();
        for result in table.iter()? {
            let (key, value) = result?;
            if key.value().0 == address {
                alarms.push(serde_json::from_str::<Alarm>(value.value())?);
            }
        }
        alarms.sort_by_key(|a| a.position);
        Ok(alarms)
    }
}

impl Drop for StoreLease<'_> {
    fn drop(&mut self) {
        trace!(lease = self.id, "Released device store lease");
    }
}

impl DeviceStore for RedbDeviceStore {
    fn active_devices(&self) -> Result<Vec<DeviceRecord>> {
        self.acquire().active_devices()
    }

    fn load_device(&self, identifier: &str) -> Result<Option<DeviceRecord>> {
        self.acquire().load_device(identifier)
    }

    fn save_device(&self, record: &DeviceRecord) -> Result<()> {
        self.acquire().save_device(record)
    }

    fn remove_device(&self, identifier: &str) -> Result<bool> {
        self.acquire().remove_device(identifier)
    }

    fn save_alarm(&self, alarm: &Alarm) -> Result<()> {
        self.acquire().save_alarm(alarm)
    }

    fn alarms_for_device(&self, address: &str) -> Result<Vec<Alarm>> {
        self.acquire().alarms_for_device(address)
    }
}
