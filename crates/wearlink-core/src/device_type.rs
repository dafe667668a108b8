//! Device type keys.

use serde::{Deserialize, Serialize};

/// Family of a wearable.
///
/// Every variant maps to a stable integer key used by persisted records.
/// `Unknown` marks a device no coordinator recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Unknown,
    Pebble,
    MiBand,
    MiBand2,
    MiBand2Hrx,
    AmazfitBip,
    AmazfitCor,
    MiBand3,
    AmazfitCor2,
    MiBand4,
    AmazfitBipLite,
    AmazfitGtr,
    AmazfitGts,
    AmazfitBipS,
    MiScale2,
    FossilQHybrid,
    BangleJs,
}

impl DeviceType {
    /// All known types, `Unknown` first.
    pub const ALL: [DeviceType; 17] = [
        DeviceType::Unknown,
        DeviceType::Pebble,
        DeviceType::MiBand,
        DeviceType::MiBand2,
        DeviceType::MiBand2Hrx,
        DeviceType::AmazfitBip,
        DeviceType::AmazfitCor,
        DeviceType::MiBand3,
        DeviceType::AmazfitCor2,
        DeviceType::MiBand4,
        DeviceType::AmazfitBipLite,
        DeviceType::AmazfitGtr,
        DeviceType::AmazfitGts,
        DeviceType::AmazfitBipS,
        DeviceType::MiScale2,
        DeviceType::FossilQHybrid,
        DeviceType::BangleJs,
    ];

    /// Persisted integer key.
    pub fn key(self) -> i32 {
        match self {
            DeviceType::Unknown => -1,
            DeviceType::Pebble => 1,
            DeviceType::MiBand => 10,
            DeviceType::MiBand2 => 11,
            DeviceType::MiBand2Hrx => 12,
            DeviceType::AmazfitBip => 13,
            DeviceType::AmazfitCor => 14,
            DeviceType::MiBand3 => 15,
            DeviceType::AmazfitCor2 => 16,
            DeviceType::MiBand4 => 17,
            DeviceType::AmazfitBipLite => 18,
            DeviceType::AmazfitGtr => 19,
            DeviceType::AmazfitGts => 20,
            DeviceType::AmazfitBipS => 21,
            DeviceType::MiScale2 => 50,
            DeviceType::FossilQHybrid => 121,
            DeviceType::BangleJs => 210,
        }
    }

    /// Look up a type by key. Unrecognised keys yield `Unknown`.
    pub fn from_key(key: i32) -> DeviceType {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.key() == key)
            .unwrap_or(DeviceType::Unknown)
    }

    pub fn is_supported(self) -> bool {
        self != DeviceType::Unknown
    }

    /// Human readable family name.
    pub fn display_name(self) -> &'static str {
        match self {
            DeviceType::Unknown => "Unknown",
            DeviceType::Pebble => "Pebble",
            DeviceType::MiBand => "Mi Band",
            DeviceType::MiBand2 => "Mi Band 2",
            DeviceType::MiBand2Hrx => "Mi Band 2 HRX",
            DeviceType::AmazfitBip => "Amazfit Bip",
            DeviceType::AmazfitCor => "Amazfit Cor",
            DeviceType::MiBand3 => "Mi Band 3",
            DeviceType::AmazfitCor2 => "Amazfit Cor 2",
            DeviceType::MiBand4 => "Mi Band 4",
            DeviceType::AmazfitBipLite => "Amazfit Bip Lite",
            DeviceType::AmazfitGtr => "Amazfit GTR",
            DeviceType::AmazfitGts => "Amazfit GTS",
            DeviceType::AmazfitBipS => "Amazfit Bip S",
            DeviceType::MiScale2 => "Mi Scale 2",
            DeviceType::FossilQHybrid => "Fossil Q Hybrid",
            DeviceType::BangleJs => "Bangle.js",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
