//! Shared configuration defaults and host settings.
//!
//! Protocol constants live here so the codec and device crates agree on them,
//! together with the environment variables a host can use to configure the
//! legacy device entries and the storage location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Wire constants of the hybrid-watch file protocol.
pub mod protocol {
    /// Encoded message bytes kept in a notification payload.
    pub const MAX_MESSAGE_BYTES: usize = 490;
    /// Fixed part of the notification header, length prefix included.
    pub const NOTIFICATION_HEADER_LEN: u8 = 10;
    /// Width of the message id field.
    pub const UID_LEN: u8 = 4;
    /// Width of the package CRC field.
    pub const PACKAGE_CRC_LEN: u8 = 4;
    /// File handle the notification payload is written to.
    pub const NOTIFICATION_FILE_HANDLE: u16 = 0x0900;
}

/// Default values.
pub mod defaults {
    pub const DB_PATH: &str = "./data/wearlink.redb";
    /// Alias given to the legacy Mi Band entry.
    pub const MIBAND_ALIAS: &str = "MI";
    /// Alias given to the Pebble emulator entry.
    pub const PEBBLE_EMULATOR_ALIAS: &str = "Pebble qemu";
    /// Shortest emulator host accepted, e.g. `1.2.3.4`.
    pub const PEBBLE_EMULATOR_MIN_ADDR_LEN: usize = 7;
}

/// Environment variable names.
pub mod env_vars {
    pub const DB_PATH: &str = "WEARLINK_DB_PATH";
    pub const MIBAND_ADDRESS: &str = "WEARLINK_MIBAND_ADDRESS";
    pub const PEBBLE_EMU_ADDR: &str = "WEARLINK_PEBBLE_EMU_ADDR";
    pub const PEBBLE_EMU_PORT: &str = "WEARLINK_PEBBLE_EMU_PORT";
    pub const LOG_JSON: &str = "WEARLINK_LOG_JSON";

    /// Read a non-empty variable.
    pub fn non_empty(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Whether JSON logging was requested.
    pub fn log_json() -> bool {
        std::env::var(LOG_JSON)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false)
    }
}

/// Host level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Location of the paired-device database.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Address of a Mi Band configured before device records existed.
    #[serde(default)]
    pub miband_address: Option<String>,
    /// Host of a Pebble emulator to list as an available device.
    #[serde(default)]
    pub pebble_emulator_addr: Option<String>,
    /// Port of the Pebble emulator.
    #[serde(default)]
    pub pebble_emulator_port: Option<String>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(defaults::DB_PATH)
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            miband_address: None,
            pebble_emulator_addr: None,
            pebble_emulator_port: None,
        }
    }
}

impl HostConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            db_path: env_vars::non_empty(env_vars::DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            miband_address: env_vars::non_empty(env_vars::MIBAND_ADDRESS),
            pebble_emulator_addr: env_vars::non_empty(env_vars::PEBBLE_EMU_ADDR),
            pebble_emulator_port: env_vars::non_empty(env_vars::PEBBLE_EMU_PORT),
        }
    }

    /// Load the configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Address of the Pebble emulator as `host:port`, if both parts are usable.
    pub fn pebble_emulator_endpoint(&self) -> Option<String> {
        let addr = self.pebble_emulator_addr.as_deref()?;
        let port = self.pebble_emulator_port.as_deref()?;
        if addr.len() >= defaults::PEBBLE_EMULATOR_MIN_ADDR_LEN && !port.is_empty() {
            Some(format!("{}:{}", addr, port))
        } else {
            None
        }
    }
}
