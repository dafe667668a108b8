//! Per-family capability sheets and settings panels.

use wearlink_core::{BondingStyle, Capabilities, SettingsPanel};

use super::{Coordinator, HuamiModel};

use SettingsPanel::*;

const HUAMI_BASE: Capabilities = Capabilities {
    heart_rate: true,
    smart_wakeup: false,
    alarm_snoozing: false,
    weather: true,
    music_info: false,
    unicode_emoji: false,
    activity_tracks: false,
    bonding: BondingStyle::None,
    alarm_slots: 5,
};

pub(super) fn capabilities(coordinator: &Coordinator) -> Capabilities {
    match coordinator {
        Coordinator::Unknown => Capabilities::NONE,
        Coordinator::MiScale2 => Capabilities::NONE,
        Coordinator::Huami(model) => huami_capabilities(*model),
        Coordinator::MiBand => Capabilities {
            heart_rate: true,
            smart_wakeup: true,
            alarm_slots: 3,
            ..Capabilities::NONE
        },
        Coordinator::Pebble => Capabilities {
            weather: true,
            music_info: true,
            unicode_emoji: true,
            bonding: BondingStyle::Ask,
            ..Capabilities::NONE
        },
        Coordinator::FossilQHybrid => Capabilities {
            alarm_snoozing: true,
            music_info: true,
            weather: true,
            alarm_slots: 5,
            ..Capabilities::NONE
        },
        Coordinator::BangleJs => Capabilities {
            heart_rate: true,
            weather: true,
            music_info: true,
            ..Capabilities::NONE
        },
    }
}

fn huami_capabilities(model: HuamiModel) -> Capabilities {
    match model {
        HuamiModel::AmazfitBip => Capabilities {
            activity_tracks: true,
            unicode_emoji: true,
            ..HUAMI_BASE
        },
        HuamiModel::AmazfitBipLite => Capabilities {
            activity_tracks: true,
            bonding: BondingStyle::RequireKey,
            ..HUAMI_BASE
        },
        HuamiModel::AmazfitBipS => Capabilities {
            activity_tracks: true,
            bonding: BondingStyle::RequireKey,
            ..HUAMI_BASE
        },
        HuamiModel::AmazfitCor => HUAMI_BASE,
        HuamiModel::AmazfitCor2 => Capabilities {
            music_info: true,
            unicode_emoji: true,
            ..HUAMI_BASE
        },
        HuamiModel::AmazfitGtr | HuamiModel::AmazfitGts => Capabilities {
            music_info: true,
            unicode_emoji: true,
            activity_tracks: true,
            bonding: BondingStyle::RequireKey,
            ..HUAMI_BASE
        },
        HuamiModel::MiBand2 => Capabilities {
            weather: false,
            ..HUAMI_BASE
        },
        HuamiModel::MiBand2Hrx => Capabilities {
            heart_rate: false,
            weather: false,
            ..HUAMI_BASE
        },
        HuamiModel::MiBand3 => Capabilities {
            unicode_emoji: true,
            ..HUAMI_BASE
        },
        HuamiModel::MiBand4 => Capabilities {
            music_info: true,
            unicode_emoji: true,
            bonding: BondingStyle::RequireKey,
            ..HUAMI_BASE
        },
    }
}

pub(super) fn settings_panels(coordinator: &Coordinator) -> &'static [SettingsPanel] {
    match coordinator {
        Coordinator::Unknown | Coordinator::BangleJs => &[],
        Coordinator::MiScale2 => &[WeightUnit],
        Coordinator::MiBand => &[WearLocation, VibrationPatterns, GoalNotification, HeartRateMonitoring],
        Coordinator::Pebble => &[PebbleAppSettings],
        Coordinator::FossilQHybrid => &[VibrationPatterns, ButtonActions],
        Coordinator::Huami(model) => match model {
            HuamiModel::AmazfitBip => &[
                DisplayItems,
                Shortcuts,
                TimeFormat,
                DateFormat,
                WearLocation,
                CustomEmojiFont,
                LiftWristActivateDisplay,
                DisconnectNotification,
                ExposeHrThirdParty,
                Language,
            ],
            HuamiModel::AmazfitBipLite => &[
                DisplayItems,
                TimeFormat,
                WearLocation,
                LiftWristActivateDisplay,
                DisconnectNotification,
                ExposeHrThirdParty,
                AuthKey,
            ],
            HuamiModel::AmazfitBipS => &[
                DisplayItems,
                TimeFormat,
                WearLocation,
                CustomEmojiFont,
                LiftWristActivateDisplay,
                DisconnectNotification,
                SyncCalendar,
                ExposeHrThirdParty,
                ButtonActions,
                AuthKey,
            ],
            HuamiModel::AmazfitCor => &[
                DisplayItems,
                TimeFormat,
                WearLocation,
                LiftWristActivateDisplay,
                DisconnectNotification,
                ExposeHrThirdParty,
            ],
            HuamiModel::AmazfitCor2 => &[
                DisplayItems,
                TimeFormat,
                WearLocation,
                LiftWristActivateDisplay,
                DisconnectNotification,
                ExposeHrThirdParty,
                NightMode,
            ],
            HuamiModel::AmazfitGtr | HuamiModel::AmazfitGts => &[
                TimeFormat,
                WearLocation,
                LiftWristActivateDisplay,
                DisconnectNotification,
                ExposeHrThirdParty,
                AuthKey,
            ],
            HuamiModel::MiBand2 => &[
                DateFormat,
                DisplayItems,
                WearLocation,
                LiftWristActivateDisplay,
                RotateWrist,
                GoalNotification,
                ExposeHrThirdParty,
            ],
            HuamiModel::MiBand2Hrx => &[
                DisplayItems,
                WearLocation,
                LiftWristActivateDisplay,
                RotateWrist,
                GoalNotification,
            ],
            HuamiModel::MiBand3 => &[
                DisplayItems,
                Shortcuts,
                NightMode,
                TimeFormat,
                WearLocation,
                LiftWristActivateDisplay,
                DisconnectNotification,
                ExposeHrThirdParty,
                Language,
            ],
            HuamiModel::MiBand4 => &[
                DisplayItems,
                Shortcuts,
                NightMode,
                TimeFormat,
                WearLocation,
                LiftWristActivateDisplay,
                DisconnectNotification,
                ExposeHrThirdParty,
                AuthKey,
            ],
        },
    }
}

pub(super) fn manufacturer(coordinator: &Coordinator) -> &'static str {
    match coordinator {
        Coordinator::Unknown => "",
        Coordinator::MiScale2 | Coordinator::MiBand => "Xiaomi",
        Coordinator::Huami(_) => "Huami",
        Coordinator::Pebble => "Pebble",
        Coordinator::FossilQHybrid => "Fossil",
        Coordinator::BangleJs => "Espruino",
    }
}
