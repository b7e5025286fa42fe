//! Intel SoC Watch wakeup analysis summaries.
//!
//! Exports live in a `socwatch/` directory below the run directory. Each file
//! stacks several titled tables; four of them carry per-process figures that
//! are summed over the processes of the browser under test.

use std::fs;
use std::path::{Component, Path};

use effcharts_core::{EngineConfig, Measure, SourceReport};

use super::{Source, has_extension};
use crate::error::ExtractError;
use crate::meta::decode_file_meta;
use crate::records::{Totals, parse_value, records_from_lines, section};

/// Directory and measure set of SoC Watch exports.
pub const SOCWATCH_SET: &str = "socwatch";

const CONTEXT_SWITCHES: &str = "Context Switch (in) Statistics";
const BUSY_DURATION: &str = "Processes by Platform Busy Duration";
const TIMER_RESIDENCY: &str = "Timer Resolution Requests (OS) Summary: Residency (Time)";
const TIMER_ENTRIES: &str = "Timer Resolution Requests (OS) Summary: Entry Counts";

/// `Process,Total Context Switches,Caused Thread Wakeups,...` rows.
const CONTEXT_SWITCH_COLUMNS: [(&str, usize); 4] = [
    ("Total Context Switches", 1),
    ("Caused Thread Wakeups", 2),
    ("Caused Core Wakeups", 3),
    ("Caused Package Wakeups", 4),
];

/// `Rank,Process Name (PID),CPU % (Platform),...` rows.
const BUSY_COLUMNS: [(&str, usize); 3] = [
    ("Duration in ms (Platform)", 3),
    ("Duration in ms (Logical)", 5),
    ("CSwitches From Idle (per sec)", 6),
];

/// `socwatch/*.csv` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocWatch;

impl Source for SocWatch {
    fn report(&self) -> SourceReport {
        SourceReport::new("socwatch", 2, Some(2))
    }

    fn matches(&self, file_name: &str) -> bool {
        has_extension(file_name, "csv")
    }

    fn claims(&self, relative: &Path) -> bool {
        let parts: Vec<Component<'_>> = relative.components().collect();
        matches!(parts.as_slice(), [Component::Normal(dir), Component::Normal(file)]
            if *dir == SOCWATCH_SET && file.to_str().is_some_and(|f| self.matches(f)))
    }

    fn extract(&self, path: &Path, config: &EngineConfig) -> Result<Vec<Measure>, ExtractError> {
        let template = Measure {
            measure_set: SOCWATCH_SET.to_string(),
            ..decode_file_meta(path, config)?
        };
        let text = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let owns = |cell: &str| {
            template
                .browser_processes
                .iter()
                .any(|p| cell.starts_with(p.as_str()))
        };

        let mut totals = Totals::default();

        for row in records_from_lines(path, &section(&text, CONTEXT_SWITCHES), b',')? {
            if row.get(0).is_some_and(owns) {
                add_counts(&mut totals, path, &row, &CONTEXT_SWITCH_COLUMNS);
            }
        }

        for row in records_from_lines(path, &section(&text, BUSY_DURATION), b',')? {
            if row.get(1).is_some_and(owns) {
                add_counts(&mut totals, path, &row, &BUSY_COLUMNS);
            }
        }

        // Header: `Kernel/Application, <resolution>, ...`; one row per process.
        let residency = records_from_lines(path, &section(&text, TIMER_RESIDENCY), b',')?;
        if let Some((header, rows)) = residency.split_first() {
            for row in rows.iter().filter(|r| r.get(0).is_some_and(owns)) {
                for (col, resolution) in header.iter().enumerate().skip(1) {
                    if let Some(value) = row.get(col).and_then(|c| parse_value(path, c)) {
                        totals.add(&format!("Timer Resolution Requests {resolution}"), value);
                    }
                }
            }
        }

        // Header: `Requested Resolution, <process> Entry Count, ...`, then a
        // dashed rule, then one row per resolution.
        let entries = records_from_lines(path, &section(&text, TIMER_ENTRIES), b',')?;
        if let Some((header, rows)) = entries.split_first() {
            let cols: Vec<usize> = header
                .iter()
                .enumerate()
                .filter(|&(_, title)| owns(title))
                .map(|(col, _)| col)
                .collect();
            for row in rows.iter().skip(1) {
                let name = format!("Timer Resolution Count {}", row.get(0).unwrap_or_default());
                for &col in &cols {
                    if let Some(value) = row.get(col).and_then(|c| parse_value(path, c)) {
                        totals.add(&name, value);
                    }
                }
            }
        }

        Ok(totals
            .positive()
            .map(|(name, value)| Measure {
                measure_name: name,
                value,
                ..template.clone()
            })
            .collect())
    }
}

/// Add the leading count of each listed column, ignoring a `( 12.5%)` share
/// suffix.
fn add_counts(totals: &mut Totals, path: &Path, row: &csv::StringRecord, columns: &[(&str, usize)]) {
    for &(name, col) in columns {
        let Some(cell) = row.get(col) else {
            continue;
        };
        let count = cell.split('(').next().unwrap_or(cell);
        if let Some(value) = parse_value(path, count) {
            totals.add(name, value);
        }
    }
}
