//! Renderer dispatch.
//!
//! A set is drawn only when its name starts with a prefix from the configured
//! renderer table; the longest matching prefix decides the value-axis
//! profile. Drawing itself is delegated to a [`ChartRenderer`].

pub mod png;
pub mod svg;

use serde::Deserialize;

use crate::bars::Bar;
use crate::config::RendererRule;

/// Value-axis style of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderProfile {
    /// `[0, max(bar values)]`, for times, sizes and counts.
    Magnitude,
    /// Fixed `[0, 100]`, for utilization percentages.
    Percentage,
}

/// Select the profile for a set by longest matching prefix.
///
/// Among equally long prefixes the earliest table entry wins. `None` means
/// the set is not charted.
pub fn select_profile(rules: &[RendererRule], set_name: &str) -> Option<RenderProfile> {
    let mut best: Option<&RendererRule> = None;
    for rule in rules.iter().filter(|r| set_name.starts_with(r.prefix.as_str())) {
        if best.is_none_or(|b| rule.prefix.len() > b.prefix.len()) {
            best = Some(rule);
        }
    }
    best.map(|r| r.profile)
}

/// Bars per chart before the layout switches to the compact form.
pub const COMPACT_THRESHOLD: usize = 9;

/// Canvas and bar geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Width of each bar in pixels.
    pub bar_width: u32,
    /// Axis label font size.
    pub font_size: f64,
}

impl ChartLayout {
    /// Layout for `bar_count` bars: narrower bars, smaller font and a wider
    /// canvas once the count exceeds [`COMPACT_THRESHOLD`].
    pub fn for_bars(bar_count: usize) -> Self {
        if bar_count > COMPACT_THRESHOLD {
            let extra = u32::try_from(bar_count - COMPACT_THRESHOLD).unwrap_or(u32::MAX / 200);
            Self {
                width: 1024 + extra * 100,
                height: 400,
                bar_width: 40,
                font_size: 8.0,
            }
        } else {
            Self {
                width: 1024,
                height: 400,
                bar_width: 60,
                font_size: 10.0,
            }
        }
    }
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone)]
pub struct Chart<'a> {
    /// Title line.
    pub title: String,
    /// Value-axis style.
    pub profile: RenderProfile,
    /// Geometry.
    pub layout: ChartLayout,
    /// Value-axis range `(min, max)`.
    pub y_range: (f64, f64),
    /// Bars in drawing order.
    pub bars: &'a [Bar],
}

impl<'a> Chart<'a> {
    /// Plan a chart for a set. Magnitude charts carry the run timestamp in
    /// their title; percentage charts are titled with the set name only.
    pub fn plan(set_name: &str, bars: &'a [Bar], profile: RenderProfile, run_stamp: &str) -> Self {
        let (title, y_range) = match profile {
            RenderProfile::Magnitude => {
                let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
                (format!("{set_name} {run_stamp}"), (0.0, max))
            }
            RenderProfile::Percentage => (set_name.to_string(), (0.0, 100.0)),
        };
        Self {
            title,
            profile,
            layout: ChartLayout::for_bars(bars.len()),
            y_range,
            bars,
        }
    }
}

/// Backend that turns a planned chart into image bytes.
pub trait ChartRenderer {
    /// File extension of the produced image, without the dot.
    fn extension(&self) -> &'static str;

    /// Render the chart.
    fn render(&self, chart: &Chart<'_>) -> Result<Vec<u8>, String>;
}
