//! Device file addressing.

use bytes::Bytes;
use wearlink_core::config::protocol::NOTIFICATION_FILE_HANDLE;

/// Handle of a file on the watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle(pub u16);

impl FileHandle {
    pub const NOTIFICATION_PLAY: FileHandle = FileHandle(NOTIFICATION_FILE_HANDLE);

    /// Major part, the file kind.
    pub fn major(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Minor part, the index within the kind.
    pub fn minor(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl std::fmt::Display for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// An encoded file and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePut {
    pub handle: FileHandle,
    pub data: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_handle_parts() {
        let handle = FileHandle::NOTIFICATION_PLAY;
        assert_eq!(handle.major(), 0x09);
        assert_eq!(handle.minor(), 0x00);
        assert_eq!(handle.to_le_bytes(), [0x00, 0x09]);
        assert_eq!(handle.to_string(), "0x0900");
    }
}
