//! OS-level bond removal.
//!
//! Bonds live in the host's Bluetooth stack, so the operation is delegated
//! to an optional platform capability.

use std::sync::Arc;

use tracing::{info, warn};
use wearlink_core::PairedDevice;

use crate::error::{DeviceError, PlatformError, Result};

/// Host Bluetooth stack operations on bonds.
pub trait BondManager: Send + Sync {
    /// Remove the bond with `address`. Returns whether the stack reported
    /// success.
    fn remove_bond(&self, address: &str) -> std::result::Result<bool, PlatformError>;
}

/// Bond removal front end.
#[derive(Clone, Default)]
pub struct BondService {
    manager: Option<Arc<dyn BondManager>>,
}

impl BondService {
    pub fn new(manager: Arc<dyn BondManager>) -> Self {
        Self {
            manager: Some(manager),
        }
    }

    /// Service for hosts without bond management.
    pub fn unsupported() -> Self {
        Self { manager: None }
    }

    pub fn is_supported(&self) -> bool {
        self.manager.is_some()
    }

    /// Remove the OS bond with `device`.
    pub fn remove_bond(&self, device: &PairedDevice) -> Result<bool> {
        let manager = self.manager.as_ref().ok_or_else(|| DeviceError::BondRemoval {
            address: device.address.clone(),
            source: PlatformError::Unsupported,
        })?;

        match manager.remove_bond(&device.address) {
            Ok(removed) => {
                info!(address = %device.address, removed, "Bond removal finished");
                Ok(removed)
            }
            Err(source) => {
                warn!(address = %device.address, error = %source, "Bond removal failed");
                Err(DeviceError::BondRemoval {
                    address: device.address.clone(),
                    source,
                })
            }
        }
    }
}

impl std::fmt::Debug for BondService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BondService")
            .field("supported", &self.is_supported())
            .finish()
    }
}
