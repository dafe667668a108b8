//! Device layer errors.

use thiserror::Error;

/// Result type for device operations.
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Failure reported by the host's Bluetooth stack.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The host offers no way to do this.
    #[error("Unsupported on this platform")]
    Unsupported,

    /// The platform call itself failed.
    #[error("Platform call failed: {0}")]
    Failed(String),
}

/// Device layer error types.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Removing an OS bond failed.
    #[error("Error removing bond to device {address}: {source}")]
    BondRemoval {
        address: String,
        #[source]
        source: PlatformError,
    },

    /// No coordinator handles the device.
    #[error("Unsupported device: {0}")]
    Unsupported(String),

    /// Alarm slot outside the device's range.
    #[error("Alarm position {position} out of range, device has {slots} slots")]
    AlarmSlot { position: u8, slots: u8 },

    #[error(transparent)]
    Validation(#[from] wearlink_core::Error),

    #[error(transparent)]
    Storage(#[from] wearlink_storage::Error),

    #[error(transparent)]
    Encode(#[from] wearlink_protocol::EncodeError),
}
