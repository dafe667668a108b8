//! Binary codecs for wearable file transfers.
//!
//! - [`notification`]: the play-notification file of hybrid watches
//! - [`asset`]: named binary assets addressed by their CRC-32
//! - [`file`]: the file handle a payload is written to
//!
//! Chunking payloads into transport packets is left to the transport.

pub mod asset;
pub mod error;
pub mod file;
pub mod notification;
pub mod text;

pub use asset::AssetFile;
pub use error::{EncodeError, Result};
pub use file::{FileHandle, FilePut};
pub use notification::{NotificationFlags, NotificationRequest, NotificationType};
