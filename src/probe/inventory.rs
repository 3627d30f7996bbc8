//! Hardware inventory capability: structured enumeration of controllers,
//! tape-class devices, and raw device nodes.
//!
//! The production [`SystemInventory`] shells out to the host's SCSI inventory
//! commands and lists the device namespace; tests substitute canned records.
//! Each enumeration carries the raw output it was parsed from so the caller
//! can log it before any pattern matching happens.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::errors::{Result, WatchError};

/// One controller/adapter as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerRecord {
    /// Controller or driver name.
    pub name: String,
    /// Whether the host reports the controller as operational.
    pub operational: bool,
}

/// Device class of a tape-subsystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// A tape drive.
    TapeDrive,
    /// A medium changer (library robot).
    MediumChanger,
}

/// One tape-class device as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Vendor/model description.
    pub name: String,
    /// Reported device class.
    pub class: DeviceClass,
}

/// Structured records plus the raw output they were derived from.
#[derive(Debug, Clone, Default)]
pub struct Enumeration<T> {
    /// Parsed records.
    pub records: Vec<T>,
    /// Raw enumeration output, captured for diagnostic logging.
    pub raw: String,
}

/// One method per detection technique. Every method may fail independently;
/// the detector treats a failure as a negative verdict for that technique.
pub trait HardwareInventory {
    /// Enumerate SCSI controllers/adapters.
    fn scsi_controllers(&self) -> Result<Enumeration<ControllerRecord>>;

    /// Enumerate tape drives and medium changers.
    fn tape_class_devices(&self) -> Result<Enumeration<DeviceRecord>>;

    /// List names in the raw device namespace.
    fn raw_device_nodes(&self) -> Result<Enumeration<String>>;
}

/// Production inventory backed by `lsscsi` and the `/dev` namespace.
#[derive(Debug, Clone)]
pub struct SystemInventory {
    dev_dir: PathBuf,
}

impl SystemInventory {
    /// Inventory over the standard device namespace.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dev_dir: PathBuf::from("/dev"),
        }
    }

    /// Inventory over an alternate device namespace root.
    #[must_use]
    pub fn with_dev_dir(dev_dir: PathBuf) -> Self {
        Self { dev_dir }
    }
}

impl Default for SystemInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareInventory for SystemInventory {
    fn scsi_controllers(&self) -> Result<Enumeration<ControllerRecord>> {
        let raw = run_inventory_command("scsi_controllers", "lsscsi", &["--hosts"])?;
        Ok(Enumeration {
            records: parse_hosts_output(&raw),
            raw,
        })
    }

    fn tape_class_devices(&self) -> Result<Enumeration<DeviceRecord>> {
        let raw = run_inventory_command("tape_class_devices", "lsscsi", &[])?;
        Ok(Enumeration {
            records: parse_device_output(&raw),
            raw,
        })
    }

    fn raw_device_nodes(&self) -> Result<Enumeration<String>> {
        let records = list_device_nodes(&self.dev_dir)?;
        let raw = records.join(" ");
        Ok(Enumeration { records, raw })
    }
}

fn run_inventory_command(
    technique: &'static str,
    program: &str,
    args: &[&str],
) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|err| WatchError::InventoryQuery {
            technique,
            details: format!("{program}: {err}"),
        })?;
    if !output.status.success() {
        return Err(WatchError::InventoryQuery {
            technique,
            details: format!("{program} exited with {}", output.status),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `lsscsi --hosts` lines of the form `[N]  driver_name`. A host that
/// appears in the listing is active, so it is reported operational.
fn parse_hosts_output(raw: &str) -> Vec<ControllerRecord> {
    raw.lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix('[')?;
            let (_, name) = rest.split_once(']')?;
            let name = name.trim();
            (!name.is_empty()).then(|| ControllerRecord {
                name: name.to_string(),
                operational: true,
            })
        })
        .collect()
}

/// Parse `lsscsi` device lines, keeping only tape drives (`tape`) and medium
/// changers (`mediumx`).
fn parse_device_output(raw: &str) -> Vec<DeviceRecord> {
    raw.lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let _address = fields.next()?;
            let kind = fields.next()?;
            let class = match kind {
                "tape" => DeviceClass::TapeDrive,
                "mediumx" => DeviceClass::MediumChanger,
                _ => return None,
            };
            let name = fields.collect::<Vec<_>>().join(" ");
            Some(DeviceRecord { name, class })
        })
        .collect()
}

fn list_device_nodes(dev_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dev_dir).map_err(|err| WatchError::InventoryQuery {
        technique: "raw_device_nodes",
        details: format!("{}: {err}", dev_dir.display()),
    })?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}
