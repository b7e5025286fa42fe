//! Chart-bar assembly.
//!
//! Turns grouped samples into ordered, colored, labeled bar descriptors:
//! one median bar per browser (sorted by label) followed by one diff bar per
//! competitor, or one bar per iteration sample for the iteration view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::EngineConfig;
use crate::group::{IterationGroups, SetGroups};
use crate::stats::{self, DiffKind};
use crate::vprintln;

/// An RGBA color, written as `#rrggbb` (or `#rrggbbaa` when translucent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `rrggbb` or `rrggbbaa`, with or without a leading `#`.
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color '{value}'"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

const GOOD_FILL: Color = Color::rgb(0x4c, 0xe6, 0x00);
const GOOD_STROKE: Color = Color::rgb(0xee, 0xff, 0xe6);
const BAD_FILL: Color = Color::rgb(110, 128, 139);

/// Drawing style of a bar. Missing colors render with the renderer default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarStyle {
    /// Whether the bar is drawn.
    pub show: bool,
    /// Fill color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    /// Outline color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
}

impl BarStyle {
    fn solid(color: Option<Color>) -> Self {
        Self {
            show: true,
            fill: color,
            stroke: color,
        }
    }

    fn diff(kind: DiffKind) -> Self {
        let (fill, stroke) = match kind {
            DiffKind::Good => (GOOD_FILL, GOOD_STROKE),
            DiffKind::Bad => (BAD_FILL, BAD_FILL),
        };
        Self {
            show: true,
            fill: Some(fill),
            stroke: Some(stroke),
        }
    }
}

/// One drawable bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Text under the bar.
    pub label: String,
    /// Bar height in chart units.
    pub value: f64,
    /// Colors.
    pub style: BarStyle,
    /// Browser process the bar belongs to; empty for diff bars.
    #[serde(skip)]
    pub browser: String,
}

/// Fixed-point text with exactly `precision` decimals.
pub fn format_value(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Sort bars ascending by label text.
pub fn sort_by_label(bars: &mut [Bar]) {
    bars.sort_by(|a, b| a.label.cmp(&b.label));
}

/// Assembles bars for one report type at a fixed decimal precision.
pub struct BarAssembler<'a> {
    config: &'a EngineConfig,
    precision: usize,
}

impl<'a> BarAssembler<'a> {
    /// Create an assembler formatting values with `precision` decimals.
    pub fn new(config: &'a EngineConfig, precision: usize) -> Self {
        Self { config, precision }
    }

    /// `"<browser> (<value>)"` bar in the browser's color.
    pub fn browser_bar(&self, browser: &str, value: f64) -> Bar {
        Bar {
            label: format!("{browser} ({})", format_value(value, self.precision)),
            value,
            style: BarStyle::solid(self.config.color_for(browser)),
            browser: browser.to_string(),
        }
    }

    /// `"<iteration>: <browser> (<value>)"` bar in the browser's color.
    pub fn iteration_bar(&self, iteration: &str, browser: &str, value: f64) -> Bar {
        Bar {
            label: format!(
                "{iteration}: {browser} ({})",
                format_value(value, self.precision)
            ),
            value,
            style: BarStyle::solid(self.config.color_for(browser)),
            browser: browser.to_string(),
        }
    }

    /// Median bar per browser, sorted by label, followed by the diff bars.
    pub fn aggregate(&self, groups: &SetGroups) -> BTreeMap<String, Vec<Bar>> {
        groups
            .iter()
            .map(|(set_name, browsers)| {
                let mut bars: Vec<Bar> = browsers
                    .iter()
                    .filter_map(|(browser, values)| {
                        stats::median(values).map(|m| self.browser_bar(browser, m))
                    })
                    .collect();
                sort_by_label(&mut bars);
                let diffs = self.diff_bars(set_name, &bars);
                bars.extend(diffs);
                (set_name.clone(), bars)
            })
            .collect()
    }

    /// One bar per sample, sorted by label (iteration first, then browser).
    pub fn iterations(&self, groups: &IterationGroups) -> BTreeMap<String, Vec<Bar>> {
        groups
            .iter()
            .map(|(set_name, iterations)| {
                let mut bars: Vec<Bar> = iterations
                    .iter()
                    .flat_map(|(iteration, measures)| {
                        measures
                            .iter()
                            .map(move |m| self.iteration_bar(iteration, &m.browser, m.value))
                    })
                    .collect();
                sort_by_label(&mut bars);
                (set_name.clone(), bars)
            })
            .collect()
    }

    /// Diff bars of every competitor against the baseline bar.
    ///
    /// Empty when the set has a single bar or no baseline bar.
    pub fn diff_bars(&self, set_name: &str, bars: &[Bar]) -> Vec<Bar> {
        if bars.len() <= 1 {
            return Vec::new();
        }

        let is_baseline = |bar: &Bar| bar.browser.contains(self.config.baseline.as_str());
        let Some(baseline) = bars.iter().find(|bar| is_baseline(bar)) else {
            vprintln!(
                "  {set_name}: no {} bar, skipping diffs",
                self.config.baseline
            );
            return Vec::new();
        };

        let polarity = self.config.polarity_for(set_name);
        bars.iter()
            .filter(|bar| !is_baseline(bar))
            .map(|competitor| {
                let d = stats::diff(baseline.value, competitor.value, polarity);
                Bar {
                    label: format!(
                        "{} vs {} ({}) diff {:.0}% ({})",
                        d.kind.as_str(),
                        competitor.browser,
                        polarity.explain(),
                        d.percent,
                        format_value(d.magnitude, self.precision),
                    ),
                    value: d.magnitude,
                    style: BarStyle::diff(d.kind),
                    browser: String::new(),
                }
            })
            .collect()
    }
}
