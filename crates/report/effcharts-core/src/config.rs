//! Engine configuration.
//!
//! Browser identities, chart colors, metric polarity and the renderer prefix
//! table are passed to the engine explicitly. Deserialized from
//! `effcharts.toml`; any section missing from the file keeps its default.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::bars::Color;
use crate::render::RenderProfile;
use crate::stats::Polarity;

/// One browser under test.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrowserDef {
    /// OS process names belonging to the browser. The first one is the
    /// process the browser is charted under.
    pub processes: Vec<String>,
    /// Chart color for every process of the browser.
    #[serde(default)]
    pub color: Option<Color>,
}

impl BrowserDef {
    fn new(processes: &[&str], color: Color) -> Self {
        Self {
            processes: processes.iter().map(|p| (*p).to_string()).collect(),
            color: Some(color),
        }
    }
}

/// `[[renderers]]` entry: sets whose name starts with `prefix` are drawn
/// with `profile`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RendererRule {
    /// Set-name prefix.
    pub prefix: String,
    /// Value-axis style used for matching sets.
    pub profile: RenderProfile,
}

impl RendererRule {
    fn new(prefix: &str, profile: RenderProfile) -> Self {
        Self {
            prefix: prefix.to_string(),
            profile,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Process name of the browser every diff is computed against.
    pub baseline: String,
    /// Browsers keyed by short name (the first file-name token).
    pub browsers: BTreeMap<String, BrowserDef>,
    /// Per-set polarity overrides; unlisted sets are smaller-is-better.
    pub polarity: BTreeMap<String, Polarity>,
    /// Ordered renderer prefix table.
    pub renderers: Vec<RendererRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let browsers = [
            ("yabro", BrowserDef::new(&["browser.exe"], Color::rgb(0xff, 0x00, 0x00))),
            ("brodefault", BrowserDef::new(&["brodefault.exe"], Color::rgb(0xe0, 0x94, 0xa9))),
            ("chrome", BrowserDef::new(&["chrome.exe"], Color::rgb(0x00, 0x00, 0xff))),
            ("chromium", BrowserDef::new(&["chromium.exe"], Color::rgb(0x3c, 0xa6, 0xc5))),
            ("opera", BrowserDef::new(&["opera.exe"], Color::rgb(0x00, 0x00, 0x00))),
            ("firefox", BrowserDef::new(&["firefox.exe"], Color::rgb(0xff, 0x66, 0x00))),
            (
                "edge",
                BrowserDef::new(
                    &["MicrosoftEdge.exe", "MicrosoftEdgeCP.exe"],
                    Color::rgb(0x0b, 0x60, 0x97),
                ),
            ),
        ]
        .into_iter()
        .map(|(name, def)| (name.to_string(), def))
        .collect();

        let polarity = [
            "YandexBenchmarkJetStream",
            "YandexBenchmarkMotionMark",
            "YandexBenchmarkSpeedometer",
        ]
        .into_iter()
        .map(|set| (set.to_string(), Polarity::BiggerIsBetter))
        .collect();

        let magnitude = [
            "srum",
            "YandexBenchmark",
            "Intel Power",
            "socwatch",
            "amdProfCli",
            "ippet",
            "diskIo Disk IO Time",
            "diskIo Disk IO Size",
            "diskIo Disk Service Time",
            "fileIo File IO Duration",
            "fileIo File IO Size",
            "memSet WorkingSet",
            "memSet PrivateWorkingSet",
            "memSet VirtualSize",
            "gpuUsage GPU Time",
            "gpuUsage GPU Packets",
        ];
        let percentage = ["gpuUsage GPU Percentage", "cpuUsage CPU  Utilization %"];
        let renderers = magnitude
            .iter()
            .map(|p| RendererRule::new(p, RenderProfile::Magnitude))
            .chain(
                percentage
                    .iter()
                    .map(|p| RendererRule::new(p, RenderProfile::Percentage)),
            )
            .collect();

        Self {
            baseline: "browser.exe".to_string(),
            browsers,
            polarity,
            renderers,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Charted process name for a browser short name.
    pub fn process_for(&self, short_name: &str) -> Option<&str> {
        self.browsers
            .get(short_name)
            .and_then(|b| b.processes.first())
            .map(String::as_str)
    }

    /// Short name of the browser owning a process.
    pub fn short_name_for(&self, process: &str) -> Option<&str> {
        self.browsers
            .iter()
            .find(|(_, b)| b.processes.iter().any(|p| p == process))
            .map(|(name, _)| name.as_str())
    }

    /// All process names of a browser short name (empty if unknown).
    pub fn processes_for(&self, short_name: &str) -> &[String] {
        self.browsers
            .get(short_name)
            .map_or(&[], |b| b.processes.as_slice())
    }

    /// Every configured process name, sorted and deduplicated.
    pub fn known_processes(&self) -> BTreeSet<&str> {
        self.browsers
            .values()
            .flat_map(|b| b.processes.iter().map(String::as_str))
            .collect()
    }

    /// Chart color of a process; `None` means "draw unstyled".
    pub fn color_for(&self, process: &str) -> Option<Color> {
        self.browsers
            .values()
            .find(|b| b.processes.iter().any(|p| p == process))
            .and_then(|b| b.color)
    }

    /// Polarity of a full set name.
    pub fn polarity_for(&self, set_name: &str) -> Polarity {
        self.polarity.get(set_name).copied().unwrap_or_default()
    }
}
