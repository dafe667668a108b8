//! Command-line interface for Wearlink.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;
use wearlink_core::config::env_vars;
use wearlink_core::{CandidateDescriptor, DeviceRecord, DeviceType, HostConfig, PairedDevice, Weekday};
use wearlink_devices::{AlarmEdit, AlarmService, BondService, CoordinatorRegistry};
use wearlink_protocol::notification::PLACEHOLDER_TITLE;
use wearlink_protocol::{AssetFile, NotificationFlags, NotificationRequest, NotificationType};
use wearlink_storage::{DeviceStore, RedbDeviceStore};

/// Wearlink - identify wearables and build the payloads they understand.
#[derive(Parser, Debug)]
#[command(name = "wearlink")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file. Environment variables are used otherwise.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Device database, overriding the configuration.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// List device families in resolution order.
    Coordinators,
    /// Identify a scanned device.
    Identify {
        /// Device address as reported by the scanner.
        #[arg(short, long)]
        address: String,
        /// Advertised name.
        #[arg(short, long)]
        name: Option<String>,
        /// Signal strength.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rssi: i16,
        /// Advertised service UUID, repeatable.
        #[arg(short, long)]
        service: Vec<Uuid>,
    },
    /// Encode a notification payload.
    Notify {
        #[command(subcommand)]
        notification: NotifyCommand,
    },
    /// Show the asset name of a file.
    Asset {
        /// File to name.
        path: PathBuf,
        /// Explicit name instead of the CRC-derived one.
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Paired device management.
    Devices {
        #[command(subcommand)]
        devices_cmd: DevicesCommand,
    },
    /// Alarm management.
    Alarm {
        #[command(subcommand)]
        alarm_cmd: AlarmCommand,
    },
    /// Check whether a file can be installed on a device.
    Install {
        /// Device address.
        #[arg(short, long)]
        device: String,
        /// File to install.
        path: PathBuf,
    },
}

/// Notification subcommands.
#[derive(Subcommand, Debug)]
enum NotifyCommand {
    /// App text notification.
    Text {
        #[arg(short, long)]
        package: String,
        #[arg(short, long)]
        sender: String,
        #[arg(short, long)]
        message: String,
    },
    /// Notification carrying only the app package.
    App {
        package: String,
    },
    /// Incoming call, or its end with --ended.
    Call {
        number: String,
        #[arg(long)]
        ended: bool,
    },
    /// Missed call.
    MissedCall {
        number: String,
    },
    /// Raw fields, for apps known only by their CRC.
    Raw {
        #[arg(long = "type")]
        kind: u8,
        #[arg(long)]
        flags: u8,
        /// Package CRC-32, hex.
        #[arg(long, value_parser = parse_hex_u32)]
        crc: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "")]
        sender: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

/// Device subcommands.
#[derive(Subcommand, Debug)]
enum DevicesCommand {
    /// List available devices.
    List,
    /// Store a scanned device as paired.
    Pair {
        #[arg(short, long)]
        address: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        service: Vec<Uuid>,
    },
    /// Forget a paired device.
    Remove {
        address: String,
        /// Also remove the OS bond.
        #[arg(long)]
        unbond: bool,
    },
}

/// Alarm subcommands.
#[derive(Subcommand, Debug)]
enum AlarmCommand {
    /// Set an alarm slot.
    Set {
        #[arg(short, long)]
        device: String,
        #[arg(short, long)]
        position: u8,
        /// Time as HH:MM.
        #[arg(short, long, value_parser = parse_time)]
        time: (u8, u8),
        /// Comma separated days, e.g. mon,tue or daily.
        #[arg(long, value_parser = parse_days)]
        days: Option<[bool; 7]>,
        #[arg(long)]
        smart_wakeup: bool,
        #[arg(long)]
        snooze: bool,
        #[arg(long)]
        disabled: bool,
    },
    /// List alarms of a device.
    List {
        #[arg(short, long)]
        device: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => HostConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => HostConfig::from_env(),
    };
    if let Some(db) = args.db {
        config.db_path = db;
    }
    debug!(db = %config.db_path.display(), "Using configuration");

    let registry = CoordinatorRegistry::global();

    match args.command {
        Command::Coordinators => list_coordinators(registry),
        Command::Identify {
            address,
            name,
            rssi,
            service,
        } => identify(registry, candidate(address, name, rssi, service)),
        Command::Notify { notification } => encode_notification(notification),
        Command::Asset { path, name } => asset(&path, name),
        Command::Devices { devices_cmd } => run_devices_cmd(registry, &config, devices_cmd),
        Command::Alarm { alarm_cmd } => run_alarm_cmd(registry, &config, alarm_cmd),
        Command::Install { device, path } => install(registry, &config, &device, &path),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("warn,wearlink={level}")));

    if env_vars::log_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn candidate(address: String, name: Option<String>, rssi: i16, services: Vec<Uuid>) -> CandidateDescriptor {
    let mut candidate = CandidateDescriptor::new(address).with_rssi(rssi);
    if let Some(name) = name {
        candidate = candidate.with_name(name);
    }
    services
        .into_iter()
        .fold(candidate, |c, service| c.with_service(service))
}

fn open_store(config: &HostConfig) -> Result<RedbDeviceStore> {
    RedbDeviceStore::open(&config.db_path)
        .with_context(|| format!("opening device database {}", config.db_path.display()))
}

fn find_device(
    registry: &CoordinatorRegistry,
    store: &dyn DeviceStore,
    config: &HostConfig,
    address: &str,
) -> Result<PairedDevice> {
    registry
        .find_available_device(address, store, config)
        .ok_or_else(|| anyhow!("no available device with address {address}"))
}

fn list_coordinators(registry: &CoordinatorRegistry) -> Result<()> {
    for (i, coordinator) in registry.coordinators().iter().enumerate() {
        println!(
            "{:>2}. {} ({}, key {})",
            i + 1,
            coordinator,
            coordinator.manufacturer(),
            coordinator.device_type().key()
        );
    }
    Ok(())
}

fn identify(registry: &CoordinatorRegistry, candidate: CandidateDescriptor) -> Result<()> {
    let coordinator = registry.resolve_candidate(&candidate);
    let device = coordinator.create_device(&candidate);

    print_json(&json!({
        "coordinator": coordinator,
        "device_type": coordinator.device_type(),
        "type_key": coordinator.device_type().key(),
        "alias": device.alias,
        "manufacturer": coordinator.manufacturer(),
        "heart_rate": coordinator.supports_heart_rate(&device),
        "capabilities": coordinator.capabilities(),
        "settings_panels": coordinator.settings_panels(),
    }))
}

fn encode_notification(cmd: NotifyCommand) -> Result<()> {
    let request = match cmd {
        NotifyCommand::Text {
            package,
            sender,
            message,
        } => NotificationRequest::text(&package, sender, message),
        NotifyCommand::App { package } => NotificationRequest::package_only(
            NotificationType::Notification,
            NotificationFlags::ALERT,
            &package,
        ),
        NotifyCommand::Call { number, ended } => NotificationRequest::incoming_call(number, !ended),
        NotifyCommand::MissedCall { number } => NotificationRequest::missed_call(number),
        NotifyCommand::Raw {
            kind,
            flags,
            crc,
            title,
            sender,
            message,
        } => NotificationRequest::new(
            NotificationType::from_code(kind),
            NotificationFlags::from_bits_retain(flags),
            crc,
            title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
            sender,
            message,
        ),
    };

    let put = request.to_file_put()?;
    print_json(&json!({
        "handle": put.handle.to_string(),
        "length": put.data.len(),
        "payload": hex::encode(&put.data),
    }))
}

fn asset(path: &Path, name: Option<String>) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let asset = match name {
        Some(name) => AssetFile::named(name, data),
        None => AssetFile::new(data),
    };
    print_json(&json!({
        "name": asset.file_name(),
        "size": asset.len(),
    }))
}

fn run_devices_cmd(registry: &CoordinatorRegistry, config: &HostConfig, cmd: DevicesCommand) -> Result<()> {
    let store = open_store(config)?;

    match cmd {
        DevicesCommand::List => print_json(&registry.available_devices(&store, config)),
        DevicesCommand::Pair {
            address,
            name,
            service,
        } => {
            let candidate = candidate(address, name, 0, service);
            let device = registry
                .to_supported_device(&candidate)
                .ok_or_else(|| anyhow!("no coordinator recognises {}", candidate.address()))?;
            store.save_device(&DeviceRecord::from_paired(&device))?;
            print_json(&device)
        }
        DevicesCommand::Remove { address, unbond } => {
            let device = store
                .load_device(&address)?
                .map(|record| CoordinatorRegistry::to_paired_device(&record))
                .unwrap_or_else(|| PairedDevice::new(&address, "", DeviceType::Unknown));

            if unbond {
                // No OS Bluetooth stack is reachable from here.
                BondService::unsupported().remove_bond(&device)?;
            }

            if !store.remove_device(&address)? {
                bail!("no stored device with address {address}");
            }
            println!("Removed {address}");
            Ok(())
        }
    }
}

fn run_alarm_cmd(registry: &CoordinatorRegistry, config: &HostConfig, cmd: AlarmCommand) -> Result<()> {
    let store = open_store(config)?;
    let service = AlarmService::new(registry, &store);

    match cmd {
        AlarmCommand::Set {
            device,
            position,
            time: (hour, minute),
            days,
            smart_wakeup,
            snooze,
            disabled,
        } => {
            let device = find_device(registry, &store, config, &device)?;
            let mut edit = AlarmEdit::new(position, hour, minute)
                .with_smart_wakeup(smart_wakeup)
                .with_snooze(snooze);
            if let Some(days) = days {
                edit = edit.repeat_on(days);
            }
            edit.enabled = !disabled;

            let alarm = service.update(&edit, &device)?;
            print_json(&alarm)
        }
        AlarmCommand::List { device } => {
            let device = find_device(registry, &store, config, &device)?;
            print_json(&service.alarms_for(&device)?)
        }
    }
}

fn install(registry: &CoordinatorRegistry, config: &HostConfig, address: &str, path: &Path) -> Result<()> {
    let store = open_store(config)?;
    let device = find_device(registry, &store, config, address)?;
    let coordinator = registry.resolve_device(&device);

    match coordinator.select_install_handler(path) {
        Some(handler) => print_json(&handler),
        None => bail!("{} cannot be installed on {}", path.display(), coordinator),
    }
}

fn parse_time(s: &str) -> std::result::Result<(u8, u8), String> {
    let (hour, minute) = s
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got {s:?}"))?;
    let hour: u8 = hour.parse().map_err(|_| format!("invalid hour in {s:?}"))?;
    let minute: u8 = minute.parse().map_err(|_| format!("invalid minute in {s:?}"))?;
    if hour > 23 || minute > 59 {
        return Err(format!("{s:?} is not a time of day"));
    }
    Ok((hour, minute))
}

fn parse_days(s: &str) -> std::result::Result<[bool; 7], String> {
    if s.eq_ignore_ascii_case("daily") {
        return Ok([true; 7]);
    }
    let mut days = [false; 7];
    for part in s.split(',').filter(|p| !p.trim().is_empty()) {
        let day = Weekday::parse(part).ok_or_else(|| format!("unknown day {part:?}"))?;
        days[day as usize] = true;
    }
    Ok(days)
}

fn parse_hex_u32(s: &str) -> std::result::Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid CRC {s:?}: {e}"))
}
