//! Recognition predicates.
//!
//! Matching is by advertised name, advertised service or vendor address
//! prefix. It is deliberately loose; the registry order resolves overlaps.

use tracing::warn;
use uuid::Uuid;
use wearlink_core::{bluetooth_uuid, CandidateDescriptor, MacAddress};

use super::HuamiModel;

/// Body composition service advertised by the Mi Scale 2.
pub const MISCALE_BODY_COMPOSITION_SERVICE: Uuid = bluetooth_uuid(0x181B);

/// Primary service of Fossil hybrid watches.
pub const FOSSIL_SERVICE: Uuid = Uuid::from_u128(0x3dda0001_957f_7d4a_34a6_74696673696d);

/// Vendor prefixes of original Mi Band units.
pub const MIBAND_OUIS: [[u8; 3]; 2] = [[0x88, 0x0F, 0x10], [0xC8, 0x0F, 0x10]];

fn name_is(candidate: &CandidateDescriptor, names: &[&str]) -> bool {
    candidate
        .name()
        .is_some_and(|name| names.iter().any(|n| name.eq_ignore_ascii_case(n)))
}

fn name_starts_with(candidate: &CandidateDescriptor, prefix: &str) -> bool {
    candidate.name().is_some_and(|name| {
        name.len() >= prefix.len()
            && name.is_char_boundary(prefix.len())
            && name[..prefix.len()].eq_ignore_ascii_case(prefix)
    })
}

pub(super) fn has_miband_oui(address: &str) -> bool {
    address
        .parse::<MacAddress>()
        .map(|mac| MIBAND_OUIS.contains(&mac.oui()))
        .unwrap_or(false)
}

pub(super) fn mi_scale2(candidate: &CandidateDescriptor) -> bool {
    candidate.supports_service(&MISCALE_BODY_COMPOSITION_SERVICE)
        || name_is(candidate, &["MIBCS", "MIBFS"])
}

pub(super) fn huami(model: HuamiModel, candidate: &CandidateDescriptor) -> bool {
    match model {
        // Matches every Bip; the variants must be checked first.
        HuamiModel::AmazfitBip => name_starts_with(candidate, "Amazfit Bip"),
        HuamiModel::AmazfitBipLite => name_is(candidate, &["Amazfit Bip Lite"]),
        HuamiModel::AmazfitBipS => name_is(candidate, &["Amazfit Bip S"]),
        HuamiModel::AmazfitCor => name_is(candidate, &["Amazfit Cor"]),
        HuamiModel::AmazfitCor2 => name_is(candidate, &["Amazfit Band 2", "Amazfit Cor 2"]),
        HuamiModel::AmazfitGtr => name_is(candidate, &["Amazfit GTR"]),
        HuamiModel::AmazfitGts => name_is(candidate, &["Amazfit GTS"]),
        HuamiModel::MiBand2 => name_is(candidate, &["MI Band 2"]),
        HuamiModel::MiBand2Hrx => name_is(candidate, &["Mi Band HRX"]),
        HuamiModel::MiBand3 => name_is(candidate, &["Mi Band 3", "Xiaomi Mi Band 3"]),
        HuamiModel::MiBand4 => name_is(candidate, &["Mi Smart Band 4"]),
    }
}

/// Any name starting with "MI", or a Mi Band vendor prefix. Later Xiaomi
/// devices match too, so this must come after all of them.
pub(super) fn mi_band(candidate: &CandidateDescriptor) -> bool {
    if name_starts_with(candidate, "MI") {
        return true;
    }
    match candidate.mac_address() {
        Ok(mac) => MIBAND_OUIS.contains(&mac.oui()),
        Err(e) => {
            warn!(
                address = candidate.address(),
                error = %e,
                "Unable to check device address prefix"
            );
            false
        }
    }
}

pub(super) fn pebble(candidate: &CandidateDescriptor) -> bool {
    name_starts_with(candidate, "Pebble")
}

pub(super) fn fossil_q_hybrid(candidate: &CandidateDescriptor) -> bool {
    candidate.supports_service(&FOSSIL_SERVICE) || name_starts_with(candidate, "Hybrid HR")
}

pub(super) fn bangle_js(candidate: &CandidateDescriptor) -> bool {
    name_starts_with(candidate, "Bangle.js")
}
