//! Device coordinators.
//!
//! A coordinator is the stateless description of one device family: how to
//! recognise it from a scan, which capabilities it has, how it installs
//! resources and which codec it speaks. The set of families is closed; adding
//! one means adding a variant here and choosing its place in the registry
//! order.

mod profile;
mod recognition;

use std::path::Path;

use serde::Serialize;
use tracing::debug;
use wearlink_core::{
    BondingStyle, Capabilities, CandidateDescriptor, DeviceType, PairedDevice, SettingsPanel,
};
use wearlink_protocol::{FilePut, NotificationRequest};

use crate::install::{self, InstallHandler, InstallKind};

pub use recognition::{FOSSIL_SERVICE, MIBAND_OUIS, MISCALE_BODY_COMPOSITION_SERVICE};

/// Devices built by Huami, Xiaomi's wearable maker. They share a firmware
/// container format and the alarm implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HuamiModel {
    AmazfitBip,
    AmazfitBipLite,
    AmazfitBipS,
    AmazfitCor,
    AmazfitCor2,
    AmazfitGtr,
    AmazfitGts,
    MiBand2,
    MiBand2Hrx,
    MiBand3,
    MiBand4,
}

impl HuamiModel {
    pub fn device_type(self) -> DeviceType {
        match self {
            HuamiModel::AmazfitBip => DeviceType::AmazfitBip,
            HuamiModel::AmazfitBipLite => DeviceType::AmazfitBipLite,
            HuamiModel::AmazfitBipS => DeviceType::AmazfitBipS,
            HuamiModel::AmazfitCor => DeviceType::AmazfitCor,
            HuamiModel::AmazfitCor2 => DeviceType::AmazfitCor2,
            HuamiModel::AmazfitGtr => DeviceType::AmazfitGtr,
            HuamiModel::AmazfitGts => DeviceType::AmazfitGts,
            HuamiModel::MiBand2 => DeviceType::MiBand2,
            HuamiModel::MiBand2Hrx => DeviceType::MiBand2Hrx,
            HuamiModel::MiBand3 => DeviceType::MiBand3,
            HuamiModel::MiBand4 => DeviceType::MiBand4,
        }
    }
}

/// One device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "family", content = "model")]
pub enum Coordinator {
    /// Sentinel for devices nothing recognised. Supports nothing.
    Unknown,
    MiScale2,
    Huami(HuamiModel),
    /// The original Mi Band and Mi Band 1S.
    MiBand,
    Pebble,
    FossilQHybrid,
    BangleJs,
}

impl Coordinator {
    /// Whether the scan result looks like this family.
    ///
    /// Never fails; a candidate that cannot be checked is not recognised.
    pub fn recognizes(&self, candidate: &CandidateDescriptor) -> bool {
        match self {
            Coordinator::Unknown => false,
            Coordinator::MiScale2 => recognition::mi_scale2(candidate),
            Coordinator::Huami(model) => recognition::huami(*model, candidate),
            Coordinator::MiBand => recognition::mi_band(candidate),
            Coordinator::Pebble => recognition::pebble(candidate),
            Coordinator::FossilQHybrid => recognition::fossil_q_hybrid(candidate),
            Coordinator::BangleJs => recognition::bangle_js(candidate),
        }
    }

    /// Type of the devices this coordinator creates.
    pub fn device_type(&self) -> DeviceType {
        match self {
            Coordinator::Unknown => DeviceType::Unknown,
            Coordinator::MiScale2 => DeviceType::MiScale2,
            Coordinator::Huami(model) => model.device_type(),
            Coordinator::MiBand => DeviceType::MiBand,
            Coordinator::Pebble => DeviceType::Pebble,
            Coordinator::FossilQHybrid => DeviceType::FossilQHybrid,
            Coordinator::BangleJs => DeviceType::BangleJs,
        }
    }

    /// Whether this coordinator handles an already paired device.
    pub fn supports_device(&self, device: &PairedDevice) -> bool {
        if *self == Coordinator::Unknown {
            return false;
        }
        if device.device_type == self.device_type() {
            return true;
        }
        // Records from before device types were stored carry no type; those
        // were always Mi Bands, known by their vendor prefix.
        *self == Coordinator::MiBand
            && device.device_type == DeviceType::Unknown
            && recognition::has_miband_oui(&device.address)
    }

    /// Build the paired-device record for a recognised candidate.
    pub fn create_device(&self, candidate: &CandidateDescriptor) -> PairedDevice {
        let alias = candidate
            .name()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.default_name());
        PairedDevice::new(candidate.address(), alias, self.device_type())
    }

    pub fn capabilities(&self) -> Capabilities {
        profile::capabilities(self)
    }

    pub fn supports_heart_rate(&self, device: &PairedDevice) -> bool {
        match self {
            // Only the 1S revision has the sensor, and it reports its own firmware.
            Coordinator::MiBand => device.firmware_version2.is_some(),
            _ => self.capabilities().heart_rate,
        }
    }

    pub fn supports_smart_wakeup(&self, _device: &PairedDevice) -> bool {
        self.capabilities().smart_wakeup
    }

    pub fn supports_alarm_snoozing(&self) -> bool {
        self.capabilities().alarm_snoozing
    }

    pub fn supports_weather(&self) -> bool {
        self.capabilities().weather
    }

    pub fn supports_music_info(&self) -> bool {
        self.capabilities().music_info
    }

    pub fn supports_unicode_emoji(&self) -> bool {
        self.capabilities().unicode_emoji
    }

    pub fn supports_activity_tracks(&self) -> bool {
        self.capabilities().activity_tracks
    }

    pub fn bonding_style(&self) -> BondingStyle {
        self.capabilities().bonding
    }

    pub fn alarm_slot_count(&self) -> u8 {
        self.capabilities().alarm_slots
    }

    /// Settings panels to show for this family, in display order.
    pub fn settings_panels(&self) -> &'static [SettingsPanel] {
        profile::settings_panels(self)
    }

    pub fn manufacturer(&self) -> &'static str {
        profile::manufacturer(self)
    }

    pub fn default_name(&self) -> &'static str {
        self.device_type().display_name()
    }

    /// What kind of installable `data` is for this family, if any.
    pub fn classify_resource(&self, data: &[u8]) -> Option<InstallKind> {
        match self {
            Coordinator::Huami(model) => install::classify_huami(*model, data),
            Coordinator::Pebble => install::classify_pebble(data),
            Coordinator::FossilQHybrid => install::classify_fossil(data),
            Coordinator::Unknown
            | Coordinator::MiScale2
            | Coordinator::MiBand
            | Coordinator::BangleJs => None,
        }
    }

    /// Whether this family has any install flow at all.
    pub fn has_install_flow(&self) -> bool {
        match self {
            Coordinator::Huami(model) => *model != HuamiModel::AmazfitBipS,
            Coordinator::Pebble | Coordinator::FossilQHybrid => true,
            Coordinator::Unknown
            | Coordinator::MiScale2
            | Coordinator::MiBand
            | Coordinator::BangleJs => false,
        }
    }

    /// Handler for installing the file at `path`, if the file is valid for
    /// this family.
    pub fn select_install_handler(&self, path: &Path) -> Option<InstallHandler> {
        if !self.has_install_flow() {
            return None;
        }
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Cannot read install resource");
                return None;
            }
        };
        let kind = self.classify_resource(&data)?;
        Some(InstallHandler::new(self.device_type(), kind, path, &data))
    }

    /// Encode a notification as a device file, for families that take
    /// notifications as file writes.
    pub fn notification_file(
        &self,
        request: &NotificationRequest,
    ) -> crate::Result<Option<FilePut>> {
        match self {
            Coordinator::FossilQHybrid => Ok(Some(request.to_file_put()?)),
            _ => Ok(None),
        }
    }
}

impl std::fmt::Display for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.device_type().display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wearlink_core::bluetooth_uuid;

    #[test]
    fn test_unknown_supports_nothing() {
        let unknown = Coordinator::Unknown;
        let device = PairedDevice::new("00:11:22:33:44:55", "x", DeviceType::Unknown);
        assert!(!unknown.supports_device(&device));
        assert!(!unknown.supports_heart_rate(&device));
        assert!(!unknown.supports_smart_wakeup(&device));
        assert!(!unknown.supports_alarm_snoozing());
        assert!(!unknown.supports_weather());
        assert!(!unknown.supports_music_info());
        assert!(!unknown.supports_unicode_emoji());
        assert!(!unknown.supports_activity_tracks());
        assert_eq!(unknown.bonding_style(), BondingStyle::None);
        assert_eq!(unknown.alarm_slot_count(), 0);
        assert!(unknown.settings_panels().is_empty());
        assert!(unknown.classify_resource(b"HMRES").is_none());
    }

    #[test]
    fn test_miband_heart_rate_depends_on_hardware() {
        let mut device = PairedDevice::new("88:0F:10:00:00:01", "MI", DeviceType::MiBand);
        assert!(!Coordinator::MiBand.supports_heart_rate(&device));
        device.firmware_version2 = Some("1.0.1.3".to_string());
        assert!(Coordinator::MiBand.supports_heart_rate(&device));
    }

    #[test]
    fn test_legacy_untyped_miband_record() {
        let legacy = PairedDevice::new("C8:0F:10:12:34:56", "MI", DeviceType::Unknown);
        assert!(Coordinator::MiBand.supports_device(&legacy));
        assert!(!Coordinator::Pebble.supports_device(&legacy));

        let other = PairedDevice::new("00:11:22:33:44:55", "x", DeviceType::Unknown);
        assert!(!Coordinator::MiBand.supports_device(&other));
    }

    #[test]
    fn test_create_device_uses_default_name() {
        let candidate = CandidateDescriptor::new("11:22:33:44:55:66").with_service(FOSSIL_SERVICE);
        let device = Coordinator::FossilQHybrid.create_device(&candidate);
        assert_eq!(device.alias, "Fossil Q Hybrid");
        assert_eq!(device.device_type, DeviceType::FossilQHybrid);
        assert_eq!(device.address, "11:22:33:44:55:66");
    }

    #[test]
    fn test_bip_s_capabilities() {
        let bip_s = Coordinator::Huami(HuamiModel::AmazfitBipS);
        let device = PairedDevice::new("AA:BB:CC:DD:EE:FF", "Bip S", DeviceType::AmazfitBipS);
        assert!(bip_s.supports_heart_rate(&device));
        assert!(bip_s.supports_activity_tracks());
        assert!(bip_s.supports_weather());
        assert_eq!(bip_s.bonding_style(), BondingStyle::RequireKey);
        assert_eq!(bip_s.settings_panels().last(), Some(&SettingsPanel::AuthKey));
        assert!(!bip_s.has_install_flow());
    }

    #[test]
    fn test_notification_file_only_for_hybrids() {
        let request = NotificationRequest::text("org.example", "Ann", "hello");
        let put = Coordinator::FossilQHybrid.notification_file(&request).unwrap();
        assert!(put.is_some());
        assert!(Coordinator::Pebble.notification_file(&request).unwrap().is_none());
    }

    #[test]
    fn test_notification_file_reports_encode_failure() {
        let request = NotificationRequest::text("org.example", "x".repeat(70_000), "hello");
        let result = Coordinator::FossilQHybrid.notification_file(&request);
        assert!(matches!(
            result,
            Err(crate::DeviceError::Encode(
                wearlink_protocol::EncodeError::PayloadTooLarge { .. }
            ))
        ));
    }

    #[test]
    fn test_scale_recognised_by_service() {
        let candidate =
            CandidateDescriptor::new("C8:0F:10:00:00:01").with_service(bluetooth_uuid(0x181B));
        assert!(Coordinator::MiScale2.recognizes(&candidate));
    }
}
