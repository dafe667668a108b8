//! Wearlink Storage Layer
//!
//! Persists paired devices and their alarms.
//!
//! ## Backends
//!
//! - **redb**: [`RedbDeviceStore`], JSON rows in an embedded database; all
//!   access goes through a scoped [`StoreLease`]
//! - **memory**: [`MemoryDeviceStore`], for tests and hosts without disk
//!
//! Both implement [`DeviceStore`], the interface the device layer consumes.

pub mod error;
pub mod memory;
pub mod redb_store;
pub mod store;

pub use error::{Error, Result};
pub use memory::MemoryDeviceStore;
pub use redb_store::{RedbDeviceStore, StoreLease};
pub use store::DeviceStore;
