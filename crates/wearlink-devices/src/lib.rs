//! Wearlink device layer.
//!
//! Maps scanned and paired devices to the coordinator of their family and
//! exposes what each family can do.
//!
//! ## Components
//!
//! - [`Coordinator`]: one device family; recognition, capabilities, install
//!   handling and codec selection
//! - [`CoordinatorRegistry`]: ordered resolution of candidates and devices
//! - [`BondService`]: OS bond removal through an optional [`BondManager`]
//! - [`AlarmService`]: capability-gated alarm editing

pub mod alarm_service;
pub mod bonding;
pub mod coordinator;
pub mod error;
pub mod install;
pub mod registry;

pub use alarm_service::{AlarmEdit, AlarmService};
pub use bonding::{BondManager, BondService};
pub use coordinator::{Coordinator, HuamiModel};
pub use error::{DeviceError, PlatformError, Result};
pub use install::{InstallHandler, InstallKind};
pub use registry::{resolve_candidate, resolve_device, CoordinatorRegistry};
