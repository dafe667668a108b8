//! Install handlers.
//!
//! A handler is only ever built for a resource whose contents matched one of
//! the formats the target family accepts, so holding one means the resource
//! is installable.

use std::path::{Path, PathBuf};

use serde::Serialize;
use wearlink_core::DeviceType;

use crate::coordinator::HuamiModel;

/// What an installable resource is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallKind {
    Firmware,
    ResourcePack,
    Font,
    Watchface,
    App,
}

/// A validated resource ready to be sent to a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallHandler {
    device_type: DeviceType,
    kind: InstallKind,
    path: PathBuf,
    size: usize,
    crc32: u32,
}

impl InstallHandler {
    pub(crate) fn new(device_type: DeviceType, kind: InstallKind, path: &Path, data: &[u8]) -> Self {
        Self {
            device_type,
            kind,
            path: path.to_path_buf(),
            size: data.len(),
            crc32: crc32fast::hash(data),
        }
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn kind(&self) -> InstallKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// CRC-32 of the whole resource, for verifying the transfer.
    pub fn crc32(&self) -> u32 {
        self.crc32
    }
}

const HUAMI_RESOURCE_MAGIC: &[u8] = b"HMRES";
const HUAMI_FONT_MAGIC: &[u8] = b"NERES";
const HUAMI_WATCHFACE_MAGIC: &[u8] = b"HMDIAL\0";

const BIP_FIRMWARE_HEADER: &[u8] = &[
    0x00, 0x98, 0x00, 0x20, 0xA5, 0x04, 0x00, 0x20, 0xAD, 0x04, 0x00, 0x20,
];
const COR_FIRMWARE_HEADER: &[u8] = &[0x00, 0x98, 0x00, 0x20, 0x89, 0x04, 0x00, 0x20];
const MIBAND2_FIRMWARE_HEADER: &[u8] = &[
    0xA3, 0x68, 0x04, 0x3B, 0x02, 0xDB, 0xC8, 0x58, 0xD0, 0x50, 0xFA, 0xE7,
];
// Newer models wrap firmware in a container with the magic at 0x10.
const HUAMI_CONTAINER_MAGIC: &[u8] = b"UIHH";
const HUAMI_CONTAINER_MAGIC_OFFSET: usize = 0x10;

const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

// Fossil app files start with the app file handle and end with a CRC-32 of
// everything before it.
const FOSSIL_APP_HANDLE: [u8; 2] = [0xFE, 0x15];
const FOSSIL_MIN_FILE_LEN: usize = FOSSIL_APP_HANDLE.len() + 4;

fn has_at(data: &[u8], offset: usize, magic: &[u8]) -> bool {
    data.get(offset..offset + magic.len()) == Some(magic)
}

/// Firmware headers a Huami model accepts.
fn huami_firmware_matches(model: HuamiModel, data: &[u8]) -> bool {
    match model {
        HuamiModel::AmazfitBip | HuamiModel::AmazfitBipLite => {
            has_at(data, 0, BIP_FIRMWARE_HEADER)
        }
        HuamiModel::AmazfitCor | HuamiModel::AmazfitCor2 => has_at(data, 0, COR_FIRMWARE_HEADER),
        HuamiModel::MiBand2 | HuamiModel::MiBand2Hrx => has_at(data, 0, MIBAND2_FIRMWARE_HEADER),
        HuamiModel::MiBand3
        | HuamiModel::MiBand4
        | HuamiModel::AmazfitGtr
        | HuamiModel::AmazfitGts => {
            has_at(data, HUAMI_CONTAINER_MAGIC_OFFSET, HUAMI_CONTAINER_MAGIC)
        }
        HuamiModel::AmazfitBipS => false,
    }
}

pub(crate) fn classify_huami(model: HuamiModel, data: &[u8]) -> Option<InstallKind> {
    if model == HuamiModel::AmazfitBipS {
        return None;
    }
    if has_at(data, 0, HUAMI_RESOURCE_MAGIC) {
        Some(InstallKind::ResourcePack)
    } else if has_at(data, 0, HUAMI_FONT_MAGIC) {
        Some(InstallKind::Font)
    } else if has_at(data, 0, HUAMI_WATCHFACE_MAGIC) {
        Some(InstallKind::Watchface)
    } else if huami_firmware_matches(model, data) {
        Some(InstallKind::Firmware)
    } else {
        None
    }
}

/// Pebble bundles are zip archives.
pub(crate) fn classify_pebble(data: &[u8]) -> Option<InstallKind> {
    has_at(data, 0, ZIP_MAGIC).then_some(InstallKind::App)
}

pub(crate) fn classify_fossil(data: &[u8]) -> Option<InstallKind> {
    if data.len() < FOSSIL_MIN_FILE_LEN || !has_at(data, 0, &FOSSIL_APP_HANDLE) {
        return None;
    }
    let (body, trailer) = data.split_at(data.len() - 4);
    let expected = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    (crc32fast::hash(body) == expected).then_some(InstallKind::App)
}
