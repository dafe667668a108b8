//! Play-notification payload of hybrid watches.
//!
//! Layout, all multi-byte fields little-endian:
//!
//! | offset | size | field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 2    | total length, counting itself           |
//! | 2      | 1    | header length (10)                      |
//! | 3      | 1    | notification type                       |
//! | 4      | 1    | flags                                   |
//! | 5      | 1    | uid width (4)                           |
//! | 6      | 1    | package CRC width (4)                   |
//! | 7      | 1    | title length                            |
//! | 8      | 1    | sender length                           |
//! | 9      | 1    | message length                          |
//! | 10     | 4    | message id (0)                          |
//! | 14     | 4    | package CRC-32                          |
//! | 18     | ...  | title, sender, message; NUL-terminated  |
//!
//! The message is cut to 490 encoded bytes. The cut can land inside a
//! multi-byte character and drops the terminating NUL.

use bitflags::bitflags;
use bytes::{BufMut, Bytes, BytesMut};
use tracing::warn;
use wearlink_core::config::protocol::{
    MAX_MESSAGE_BYTES, NOTIFICATION_HEADER_LEN, PACKAGE_CRC_LEN, UID_LEN,
};

use crate::file::{FileHandle, FilePut};
use crate::text::nul_terminated_bytes;
use crate::{EncodeError, Result};

/// Title sent when only the package CRC is known.
pub const PLACEHOLDER_TITLE: &str = "whatever";

/// Package name used for call notifications.
pub const GENERIC_PACKAGE: &str = "generic";

/// Kind of notification the watch should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    IncomingCall,
    Text,
    Notification,
    Email,
    Calendar,
    MissedCall,
    Dismiss,
    /// A type byte without a name here.
    Raw(u8),
}

impl NotificationType {
    pub fn code(self) -> u8 {
        match self {
            NotificationType::IncomingCall => 1,
            NotificationType::Text => 2,
            NotificationType::Notification => 3,
            NotificationType::Email => 4,
            NotificationType::Calendar => 5,
            NotificationType::MissedCall => 6,
            NotificationType::Dismiss => 7,
            NotificationType::Raw(code) => code,
        }
    }

    pub fn from_code(code: u8) -> Self {
        match code {
            1 => NotificationType::IncomingCall,
            2 => NotificationType::Text,
            3 => NotificationType::Notification,
            4 => NotificationType::Email,
            5 => NotificationType::Calendar,
            6 => NotificationType::MissedCall,
            7 => NotificationType::Dismiss,
            other => NotificationType::Raw(other),
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
    pub struct NotificationFlags: u8 {
        const SILENT = 0b0000_0001;
        const ALERT = 0b0000_0010;
        const MESSAGE_ACTIONS = 0b0000_0100;
        const CALL_ACTIONS = 0b0000_1000;
    }
}

/// A notification ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    kind: NotificationType,
    flags: NotificationFlags,
    package_crc: u32,
    title: String,
    sender: String,
    message: String,
}

impl NotificationRequest {
    /// Fully explicit request.
    pub fn new(
        kind: NotificationType,
        flags: NotificationFlags,
        package_crc: u32,
        title: impl Into<String>,
        sender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            flags,
            package_crc,
            title: title.into(),
            sender: sender.into(),
            message: message.into(),
        }
    }

    /// Request from an app package. The package name is the title and its
    /// CRC-32 identifies the app.
    pub fn for_package(
        kind: NotificationType,
        flags: NotificationFlags,
        package: &str,
        sender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(kind, flags, package_crc(package), package, sender, message)
    }

    /// Request carrying nothing but the package name.
    pub fn package_only(kind: NotificationType, flags: NotificationFlags, package: &str) -> Self {
        Self::for_package(kind, flags, package, package, package)
    }

    /// Request for an app known only by its CRC.
    pub fn with_package_crc(
        kind: NotificationType,
        flags: NotificationFlags,
        package_crc: u32,
        sender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(kind, flags, package_crc, PLACEHOLDER_TITLE, sender, message)
    }

    /// App text notification.
    pub fn text(package: &str, sender: impl Into<String>, message: impl Into<String>) -> Self {
        Self::for_package(
            NotificationType::Notification,
            NotificationFlags::ALERT,
            package,
            sender,
            message,
        )
    }

    /// Call state change. A ringing call offers the call actions, anything
    /// else dismisses the call notification.
    pub fn incoming_call(number: impl Into<String>, ringing: bool) -> Self {
        let (kind, flags) = if ringing {
            (NotificationType::IncomingCall, NotificationFlags::CALL_ACTIONS)
        } else {
            (NotificationType::Dismiss, NotificationFlags::ALERT)
        };
        Self::for_package(kind, flags, GENERIC_PACKAGE, number, "Incoming Call")
    }

    pub fn missed_call(number: impl Into<String>) -> Self {
        Self::for_package(
            NotificationType::MissedCall,
            NotificationFlags::ALERT,
            GENERIC_PACKAGE,
            number,
            "Missed Call",
        )
    }

    pub fn kind(&self) -> NotificationType {
        self.kind
    }

    pub fn flags(&self) -> NotificationFlags {
        self.flags
    }

    pub fn package_crc(&self) -> u32 {
        self.package_crc
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Encode the payload.
    pub fn encode(&self) -> Result<Bytes> {
        encode_notification(
            self.kind.code(),
            self.flags.bits(),
            self.package_crc,
            &self.title,
            &self.sender,
            &self.message,
        )
    }

    /// Encode the payload addressed to the notification file.
    pub fn to_file_put(&self) -> Result<FilePut> {
        Ok(FilePut {
            handle: FileHandle::NOTIFICATION_PLAY,
            data: self.encode()?,
        })
    }
}

/// CRC-32 identifying an app package.
pub fn package_crc(package: &str) -> u32 {
    crc32fast::hash(package.as_bytes())
}

/// Encode a play-notification payload from raw fields.
pub fn encode_notification(
    kind: u8,
    flags: u8,
    package_crc: u32,
    title: &str,
    sender: &str,
    message: &str,
) -> Result<Bytes> {
    let title = nul_terminated_bytes(title);
    let sender = nul_terminated_bytes(sender);
    let mut message = nul_terminated_bytes(message);
    message.truncate(MAX_MESSAGE_BYTES);

    let total = NOTIFICATION_HEADER_LEN as usize
        + UID_LEN as usize
        + PACKAGE_CRC_LEN as usize
        + title.len()
        + sender.len()
        + message.len();
    let total_len =
        u16::try_from(total).map_err(|_| EncodeError::PayloadTooLarge { len: total })?;

    let mut buf = BytesMut::with_capacity(total);
    buf.put_u16_le(total_len);
    buf.put_u8(NOTIFICATION_HEADER_LEN);
    buf.put_u8(kind);
    buf.put_u8(flags);
    buf.put_u8(UID_LEN);
    buf.put_u8(PACKAGE_CRC_LEN);
    buf.put_u8(length_byte("title", &title));
    buf.put_u8(length_byte("sender", &sender));
    buf.put_u8(length_byte("message", &message));
    buf.put_u32_le(0);
    buf.put_u32_le(package_crc);
    buf.put_slice(&title);
    buf.put_slice(&sender);
    buf.put_slice(&message);

    Ok(buf.freeze())
}

// The field is one byte wide; longer texts are sent anyway and the byte wraps.
fn length_byte(field: &str, bytes: &[u8]) -> u8 {
    if bytes.len() > u8::MAX as usize {
        warn!(
            field,
            len = bytes.len(),
            "Notification text exceeds 255 bytes, length byte will wrap"
        );
    }
    bytes.len() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_layout() {
        let payload = encode_notification(3, 2, 0xAABB_CCDD, "t", "s", "m").unwrap();
        let expected: Vec<u8> = vec![
            24, 0, // total
            10, 3, 2, 4, 4, // header, type, flags, uid width, crc width
            2, 2, 2, // text lengths
            0, 0, 0, 0, // message id
            0xDD, 0xCC, 0xBB, 0xAA, // crc
            b't', 0, b's', 0, b'm', 0,
        ];
        assert_eq!(&payload[..], &expected[..]);
    }

    #[test]
    fn test_type_codes_round_trip() {
        for code in 0..=255u8 {
            assert_eq!(NotificationType::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_message_cut_inside_character() {
        // 489 ASCII bytes then a two byte character straddling the limit.
        let message = format!("{}é", "a".repeat(489));
        let payload = encode_notification(3, 2, 0, "", "", &message).unwrap();
        assert_eq!(payload[9], (MAX_MESSAGE_BYTES % 256) as u8);
        // empty title and sender are one NUL each
        assert_eq!(payload.len() - 18 - 2, MAX_MESSAGE_BYTES);
        assert_eq!(*payload.last().unwrap(), 0xC3);
    }

    #[test]
    fn test_long_title_wraps_length_byte() {
        let title = "x".repeat(300);
        let payload = encode_notification(3, 2, 0, &title, "", "").unwrap();
        assert_eq!(payload[7], (301usize % 256) as u8);
        assert_eq!(payload.len(), 18 + 301 + 1 + 1);
    }

    #[test]
    fn test_long_message_wraps_like_other_fields() {
        let text = "y".repeat(299);
        let as_message = encode_notification(3, 2, 0, "", "", &text).unwrap();
        let as_title = encode_notification(3, 2, 0, &text, "", "").unwrap();
        assert_eq!(as_message[9], as_title[7]);
        assert_eq!(as_message[9], (300usize % 256) as u8);
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let sender = "x".repeat(70_000);
        let result = encode_notification(3, 2, 0, "", &sender, "");
        assert!(matches!(result, Err(EncodeError::PayloadTooLarge { .. })));
    }

    #[test]
    fn test_call_constructors() {
        let ringing = NotificationRequest::incoming_call("+4912345", true);
        assert_eq!(ringing.kind(), NotificationType::IncomingCall);
        assert_eq!(ringing.flags(), NotificationFlags::CALL_ACTIONS);
        assert_eq!(ringing.sender(), "+4912345");

        let ended = NotificationRequest::incoming_call("+4912345", false);
        assert_eq!(ended.kind(), NotificationType::Dismiss);

        let missed = NotificationRequest::missed_call("+4912345");
        assert_eq!(missed.kind().code(), 6);
        assert_eq!(missed.package_crc(), package_crc(GENERIC_PACKAGE));
    }
}
