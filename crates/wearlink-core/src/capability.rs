//! Capability model.
//!
//! A [`Capabilities`] value is the static feature sheet of one device family.
//! Coordinators answer their capability queries from it; device-dependent
//! answers (heart rate on hardware revisions, smart wakeup) refine it.

use serde::{Deserialize, Serialize};

/// How a family expects to be paired at the OS level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondingStyle {
    /// Never bond.
    #[default]
    None,
    /// Always create an OS bond.
    Bond,
    /// Let the user decide.
    Ask,
    /// Pairing needs a device-specific auth key.
    RequireKey,
}

impl BondingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BondingStyle::None => "none",
            BondingStyle::Bond => "bond",
            BondingStyle::Ask => "ask",
            BondingStyle::RequireKey => "require_key",
        }
    }
}

/// Identifier of a device settings panel the host UI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsPanel {
    AuthKey,
    ButtonActions,
    CustomEmojiFont,
    DateFormat,
    DisplayItems,
    DisplayOnLift,
    DisconnectNotification,
    ExposeHrThirdParty,
    GoalNotification,
    HeartRateMonitoring,
    Language,
    LiftWristActivateDisplay,
    NightMode,
    PebbleAppSettings,
    RotateWrist,
    Shortcuts,
    SyncCalendar,
    TimeFormat,
    VibrationPatterns,
    WearLocation,
    WeightUnit,
}

impl SettingsPanel {
    pub fn id(&self) -> &'static str {
        match self {
            SettingsPanel::AuthKey => "auth_key",
            SettingsPanel::ButtonActions => "button_actions",
            SettingsPanel::CustomEmojiFont => "custom_emoji_font",
            SettingsPanel::DateFormat => "date_format",
            SettingsPanel::DisplayItems => "display_items",
            SettingsPanel::DisplayOnLift => "display_on_lift",
            SettingsPanel::DisconnectNotification => "disconnect_notification",
            SettingsPanel::ExposeHrThirdParty => "expose_hr_third_party",
            SettingsPanel::GoalNotification => "goal_notification",
            SettingsPanel::HeartRateMonitoring => "heart_rate_monitoring",
            SettingsPanel::Language => "language",
            SettingsPanel::LiftWristActivateDisplay => "lift_wrist_activate_display",
            SettingsPanel::NightMode => "night_mode",
            SettingsPanel::PebbleAppSettings => "pebble_app_settings",
            SettingsPanel::RotateWrist => "rotate_wrist",
            SettingsPanel::Shortcuts => "shortcuts",
            SettingsPanel::SyncCalendar => "sync_calendar",
            SettingsPanel::TimeFormat => "time_format",
            SettingsPanel::VibrationPatterns => "vibration_patterns",
            SettingsPanel::WearLocation => "wear_location",
            SettingsPanel::WeightUnit => "weight_unit",
        }
    }
}

/// Static feature sheet of one device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub heart_rate: bool,
    pub smart_wakeup: bool,
    pub alarm_snoozing: bool,
    pub weather: bool,
    pub music_info: bool,
    pub unicode_emoji: bool,
    pub activity_tracks: bool,
    pub bonding: BondingStyle,
    pub alarm_slots: u8,
}

impl Capabilities {
    /// Supports nothing. Used by the unknown-device sentinel.
    pub const NONE: Capabilities = Capabilities {
        heart_rate: false,
        smart_wakeup: false,
        alarm_snoozing: false,
        weather: false,
        music_info: false,
        unicode_emoji: false,
        activity_tracks: false,
        bonding: BondingStyle::None,
        alarm_slots: 0,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::NONE
    }
}
