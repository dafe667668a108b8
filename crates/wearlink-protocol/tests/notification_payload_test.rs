//! Notification payload and asset naming tests
//!
//! Checks the header fields against the texts actually written and the
//! overloads that derive title and package CRC.

use wearlink_protocol::asset::encode_asset_file;
use wearlink_protocol::notification::{encode_notification, package_crc, PLACEHOLDER_TITLE};
use wearlink_protocol::{FileHandle, NotificationFlags, NotificationRequest, NotificationType};

/// Split the text section back into (title, sender, message) using the
/// header length bytes.
fn texts(payload: &[u8]) -> (&[u8], &[u8], &[u8]) {
    let (t, s, m) = (payload[7] as usize, payload[8] as usize, payload[9] as usize);
    let body = &payload[18..];
    (&body[..t], &body[t..t + s], &body[t + s..t + s + m])
}

#[test]
fn test_length_fields_match_texts() {
    let payload = encode_notification(3, 2, 7, "Chat", "Alice", "Hello there").unwrap();

    let (title, sender, message) = texts(&payload);
    assert_eq!(title, b"Chat\0");
    assert_eq!(sender, b"Alice\0");
    assert_eq!(message, b"Hello there\0");
}

#[test]
fn test_total_length_matches_buffer() {
    let long = "z".repeat(1000);
    for message in ["", "short", "ünïcödé", long.as_str()] {
        let payload = encode_notification(3, 2, 0, "title", "sender", message).unwrap();
        let total = u16::from_le_bytes([payload[0], payload[1]]) as usize;
        assert_eq!(total, payload.len());
    }
}

#[test]
fn test_long_message_truncated() {
    let message = "m".repeat(600);
    let payload = encode_notification(3, 2, 0, "t", "s", &message).unwrap();

    assert_eq!(payload[9], 234); // 490 wraps into one byte as 490 - 256
    let (_, _, body) = texts(&payload);
    assert_eq!(body.len(), 234);
    assert_eq!(payload.len(), 18 + 2 + 2 + 490);
    assert_ne!(*payload.last().unwrap(), 0);
}

#[test]
fn test_package_overload_uses_package_as_title() {
    let request = NotificationRequest::for_package(
        NotificationType::Notification,
        NotificationFlags::ALERT,
        "org.example.chat",
        "Bob",
        "hi",
    );
    assert_eq!(request.title(), "org.example.chat");
    assert_eq!(request.package_crc(), crc32fast::hash(b"org.example.chat"));

    let payload = request.encode().unwrap();
    assert_eq!(&payload[14..18], &package_crc("org.example.chat").to_le_bytes());
    assert_eq!(&payload[10..14], &[0, 0, 0, 0]);
}

#[test]
fn test_package_only_overload() {
    let request = NotificationRequest::package_only(
        NotificationType::Notification,
        NotificationFlags::ALERT,
        "pkg",
    );
    let payload = request.encode().unwrap();
    let (title, sender, message) = texts(&payload);
    assert_eq!(title, b"pkg\0");
    assert_eq!(sender, b"pkg\0");
    assert_eq!(message, b"pkg\0");
}

#[test]
fn test_crc_overload_uses_placeholder_title() {
    let request = NotificationRequest::with_package_crc(
        NotificationType::Notification,
        NotificationFlags::ALERT,
        0x1234_5678,
        "Carol",
        "ping",
    );
    assert_eq!(request.title(), PLACEHOLDER_TITLE);
    let payload = request.encode().unwrap();
    assert_eq!(&payload[14..18], &[0x78, 0x56, 0x34, 0x12]);
}

#[test]
fn test_text_notification_file_put() {
    let put = NotificationRequest::text("org.example.mail", "Dave", "New mail")
        .to_file_put()
        .unwrap();
    assert_eq!(put.handle, FileHandle::NOTIFICATION_PLAY);
    assert_eq!(put.data[3], NotificationType::Notification.code());
    assert_eq!(put.data[4], NotificationFlags::ALERT.bits());
}

#[test]
fn test_asset_name_is_stable() {
    let data = b"watchface-background".to_vec();
    let a = encode_asset_file(&data);
    let b = encode_asset_file(&data);
    assert_eq!(a.file_name(), b.file_name());
    assert_eq!(a.file_name(), hex::encode(crc32fast::hash(&data).to_be_bytes()));
    assert_eq!(a.file_name(), a.file_name().to_lowercase());

    let c = encode_asset_file(b"other");
    assert_ne!(a.file_name(), c.file_name());
}
