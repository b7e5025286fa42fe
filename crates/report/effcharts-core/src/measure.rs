//! The universal record every extractor emits.

use chrono::NaiveDateTime;

/// One observed numeric sample with its identifying context.
///
/// Extractors produce measures once per pass; the engine only reads them and
/// copies fields into derived records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measure {
    /// Repeated test run identifier (may be a non-numeric label).
    pub iteration: String,
    /// Coarse category, usually the source tool (e.g. `srum`, `Intel Power`).
    pub measure_set: String,
    /// Fine-grained metric name, possibly embedding the browser process name.
    pub measure_name: String,
    /// Scenario, page or workload under measurement.
    pub scenario_name: String,
    /// Resolved OS process name of the browser under test.
    pub browser: String,
    /// Canonical short identifier of the browser (e.g. `chrome`).
    pub browser_short_name: String,
    /// Every process name that belongs to this browser.
    pub browser_processes: Vec<String>,
    /// Timestamp of the originating export, when the file name carries one.
    pub date: Option<NaiveDateTime>,
    /// The sample.
    pub value: f64,
}

impl Measure {
    /// Grouping key shared by every browser measuring the same logical metric.
    pub fn full_set_name(&self) -> String {
        full_set_name(
            &self.measure_set,
            &self.browser,
            &self.measure_name,
            &self.scenario_name,
        )
    }
}

/// Build the full set name from its parts.
///
/// The first occurrence of `browser` is removed from `measure_name` and the
/// joined result is trimmed of spaces:
///
/// ```
/// use effcharts_core::measure::full_set_name;
///
/// let key = full_set_name("gpuUsage", "browser.exe", "GPU time browser.exe (us)", "yarunewtab");
/// assert_eq!(key, "gpuUsage GPU time  (us) yarunewtab");
/// ```
pub fn full_set_name(
    measure_set: &str,
    browser: &str,
    measure_name: &str,
    scenario_name: &str,
) -> String {
    let name = if browser.is_empty() {
        measure_name.to_string()
    } else {
        measure_name.replacen(browser, "", 1)
    };
    format!("{measure_set} {name} {scenario_name}")
        .trim_matches(' ')
        .to_string()
}
