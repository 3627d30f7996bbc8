//! Three-technique presence detector: controller match, device-class match,
//! device-node match, in fixed order with first-positive short-circuit.
//!
//! The detector never fails. A technique whose inventory query errors out
//! degrades to a negative verdict for that technique; the failure is logged
//! at diagnostic level and never reaches the caller.

use std::sync::Arc;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::logger::LogSink;
use crate::probe::inventory::{ControllerRecord, HardwareInventory};

/// Naming convention for tape nodes in the raw device namespace: `st0`,
/// `nst0` (with optional density suffix) and the `TAPE0` style.
static DEFAULT_NODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(n?st[0-9]+[lma]?|tape[0-9]*)$").expect("hard-coded pattern compiles")
});

/// One independent detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Technique {
    /// Controller/adapter enumeration filtered by vendor and bus type.
    Controllers,
    /// Tape and medium-changer device-class enumeration.
    DeviceClasses,
    /// Raw device-namespace scan against the tape naming convention.
    DeviceNodes,
}

impl Technique {
    /// Human-readable technique name for log lines and report bodies.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Controllers => "controller enumeration",
            Self::DeviceClasses => "device-class enumeration",
            Self::DeviceNodes => "device-node scan",
        }
    }
}

/// Matching rules applied to the structured inventory records.
#[derive(Debug, Clone)]
pub struct DetectorRules {
    /// Vendor substring; a controller name containing it is positive on its
    /// own.
    pub vendor_pattern: String,
    /// Bus-type substring; requires the controller to also be operational.
    pub bus_pattern: String,
    /// Naming convention for tape nodes in the device namespace.
    pub node_pattern: Regex,
}

impl Default for DetectorRules {
    fn default() -> Self {
        Self {
            vendor_pattern: "atto".to_string(),
            bus_pattern: "sas".to_string(),
            node_pattern: DEFAULT_NODE_PATTERN.clone(),
        }
    }
}

impl DetectorRules {
    /// Case-insensitive controller match: vendor substring alone, or bus-type
    /// substring on an operational controller.
    #[must_use]
    pub fn controller_matches(&self, record: &ControllerRecord) -> bool {
        let name = record.name.to_lowercase();
        name.contains(&self.vendor_pattern)
            || (name.contains(&self.bus_pattern) && record.operational)
    }

    /// Whether a device-node name follows the tape naming convention.
    #[must_use]
    pub fn node_matches(&self, name: &str) -> bool {
        self.node_pattern.is_match(name)
    }
}

/// Outcome of one probe cycle. Produced fresh each cycle and discarded after
/// the notification is sent.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Whether the tape library is visible to the host.
    pub present: bool,
    /// How long the whole probe took.
    pub elapsed: Duration,
    /// The technique that produced the positive verdict, if any.
    pub technique: Option<Technique>,
    /// True when every technique failed to execute, as opposed to executing
    /// and matching nothing. Lets the report distinguish "no inventory
    /// mechanism available" from "inventory ran and found no tape device".
    pub all_queries_failed: bool,
}

impl ProbeResult {
    /// One-line explanation for the notification body.
    #[must_use]
    pub fn detail(&self) -> String {
        match (self.present, self.technique, self.all_queries_failed) {
            (true, Some(technique), _) => {
                format!("Detected via {}.", technique.describe())
            }
            (true, None, _) => "Detected.".to_string(),
            (false, _, true) => {
                "No hardware inventory mechanism produced any data on this host.".to_string()
            }
            (false, _, false) => {
                "Hardware inventory ran but no technique matched a tape device.".to_string()
            }
        }
    }
}

/// Evaluates the three techniques in fixed order against a
/// [`HardwareInventory`], returning on the first positive.
pub struct Detector {
    inventory: Box<dyn HardwareInventory>,
    rules: DetectorRules,
    log: Arc<dyn LogSink>,
}

impl Detector {
    /// Detector with the default matching rules.
    pub fn new(inventory: Box<dyn HardwareInventory>, log: Arc<dyn LogSink>) -> Self {
        Self {
            inventory,
            rules: DetectorRules::default(),
            log,
        }
    }

    /// Override the matching rules.
    #[must_use]
    pub fn with_rules(mut self, rules: DetectorRules) -> Self {
        self.rules = rules;
        self
    }

    /// Run one probe. Logical OR over the techniques, not a consensus vote:
    /// the first positive wins and later techniques are not queried.
    pub fn probe(&self) -> ProbeResult {
        let started = Instant::now();
        let mut any_query_ran = false;

        if let Some(result) = self.controllers_technique(&mut any_query_ran, started) {
            return result;
        }
        if let Some(result) = self.device_class_technique(&mut any_query_ran, started) {
            return result;
        }
        if let Some(result) = self.device_node_technique(&mut any_query_ran, started) {
            return result;
        }

        let result = ProbeResult {
            present: false,
            elapsed: started.elapsed(),
            technique: None,
            all_queries_failed: !any_query_ran,
        };
        self.log.info(&format!("probe verdict: negative ({})", result.detail()));
        result
    }

    fn controllers_technique(
        &self,
        any_query_ran: &mut bool,
        started: Instant,
    ) -> Option<ProbeResult> {
        let technique = Technique::Controllers;
        match self.inventory.scsi_controllers() {
            Ok(enumeration) => {
                *any_query_ran = true;
                self.log_raw(technique, &enumeration.raw);
                let hit = enumeration
                    .records
                    .iter()
                    .find(|record| self.rules.controller_matches(record));
                if let Some(record) = hit {
                    return Some(self.positive(technique, &record.name, started));
                }
                self.log_negative(technique);
            }
            Err(err) => self.log_failed(technique, &err.to_string()),
        }
        None
    }

    fn device_class_technique(
        &self,
        any_query_ran: &mut bool,
        started: Instant,
    ) -> Option<ProbeResult> {
        let technique = Technique::DeviceClasses;
        match self.inventory.tape_class_devices() {
            Ok(enumeration) => {
                *any_query_ran = true;
                self.log_raw(technique, &enumeration.raw);
                if let Some(record) = enumeration.records.first() {
                    return Some(self.positive(technique, &record.name, started));
                }
                self.log_negative(technique);
            }
            Err(err) => self.log_failed(technique, &err.to_string()),
        }
        None
    }

    fn device_node_technique(
        &self,
        any_query_ran: &mut bool,
        started: Instant,
    ) -> Option<ProbeResult> {
        let technique = Technique::DeviceNodes;
        match self.inventory.raw_device_nodes() {
            Ok(enumeration) => {
                *any_query_ran = true;
                self.log_raw(technique, &enumeration.raw);
                let hit = enumeration
                    .records
                    .iter()
                    .find(|name| self.rules.node_matches(name));
                if let Some(name) = hit {
                    return Some(self.positive(technique, name, started));
                }
                self.log_negative(technique);
            }
            Err(err) => self.log_failed(technique, &err.to_string()),
        }
        None
    }

    fn positive(&self, technique: Technique, matched: &str, started: Instant) -> ProbeResult {
        self.log.info(&format!(
            "{} verdict: positive ({matched})",
            technique.describe()
        ));
        ProbeResult {
            present: true,
            elapsed: started.elapsed(),
            technique: Some(technique),
            all_queries_failed: false,
        }
    }

    fn log_raw(&self, technique: Technique, raw: &str) {
        let raw = if raw.trim().is_empty() { "<empty>" } else { raw.trim_end() };
        self.log
            .debug(&format!("{} raw output: {raw}", technique.describe()));
    }

    fn log_negative(&self, technique: Technique) {
        self.log
            .debug(&format!("{} verdict: negative", technique.describe()));
    }

    fn log_failed(&self, technique: Technique, details: &str) {
        self.log
            .debug(&format!("{} failed, counting as negative: {details}", technique.describe()));
    }
}
