//! System Resource Usage Monitor energy tables.
//!
//! A dump holds the whole history of the machine, so only rows recorded at or
//! after the run start encoded in the file name are summed. Rows are stored
//! oldest first below a header row whose timestamp cell reads `TimeStamp`.

use std::path::Path;

use chrono::NaiveDateTime;
use effcharts_core::{EngineConfig, Measure, SourceReport, dprintln};

use super::{Source, has_extension};
use crate::error::ExtractError;
use crate::meta::decode_file_meta_strict;
use crate::records::{parse_value, read_records};

const COL_APP_ID: usize = 0;
const COL_TIMESTAMP: usize = 2;
const TIMESTAMP_HEADER: &str = "TimeStamp";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d:%H:%M:%S%.f";

const ENERGY_COLUMNS: [(&str, usize); 11] = [
    ("EnergyLoss", 12),
    ("CPUEnergyConsumption", 13),
    ("SocEnergyConsumption", 14),
    ("DisplayEnergyConsumption", 15),
    ("DiskEnergyConsumption", 16),
    ("NetworkEnergyConsumption", 17),
    ("MBBEnergyConsumption", 18),
    ("OtherEnergyConsumption", 19),
    ("EmiEnergyConsumption", 20),
    ("CPUEnergyConsumptionWorkOnBehalf", 21),
    ("CPUEnergyConsumptionAttributed", 22),
];
const ROW_LEN: usize = 23;

/// `*_srum_*.csv` files named with exactly six metadata tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct Srum;

impl Source for Srum {
    fn report(&self) -> SourceReport {
        SourceReport::new("srum", 2, Some(6))
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.contains("_srum_") && has_extension(file_name, "csv")
    }

    fn extract(&self, path: &Path, config: &EngineConfig) -> Result<Vec<Measure>, ExtractError> {
        let template = decode_file_meta_strict(path, config)?;
        if template.browser.is_empty() {
            dprintln!(
                "  {}: unknown browser '{}'",
                path.display(),
                template.browser_short_name
            );
            return Ok(Vec::new());
        }
        let Some(started) = template.date else {
            return Ok(Vec::new());
        };

        let records = read_records(path, b',')?;
        let mut totals = [0.0_f64; ENERGY_COLUMNS.len()];

        for row in records.iter().rev() {
            if row.len() < ROW_LEN {
                continue;
            }
            let stamp = row[COL_TIMESTAMP].trim();
            if stamp == TIMESTAMP_HEADER {
                break;
            }
            let recorded = match NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT) {
                Ok(t) => t,
                Err(e) => {
                    dprintln!("  {}: skipping row stamped {stamp:?}: {e}", path.display());
                    continue;
                }
            };
            if recorded < started {
                break;
            }
            if !row[COL_APP_ID].contains(template.browser.as_str()) {
                continue;
            }
            for (total, (_, col)) in totals.iter_mut().zip(ENERGY_COLUMNS) {
                if let Some(value) = parse_value(path, &row[col]) {
                    *total += value;
                }
            }
        }

        Ok(ENERGY_COLUMNS
            .iter()
            .zip(totals)
            .filter(|&(_, total)| total != 0.0)
            .map(|(&(name, _), total)| Measure {
                measure_name: name.to_string(),
                value: total,
                ..template.clone()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(app: &str, stamp: &str, cpu: f64, display: f64) -> String {
        let mut cells = vec![app.to_string(), " 1".to_string(), format!(" {stamp}")];
        cells.extend((3..12).map(|_| " 0".to_string()));
        for col in 12..ROW_LEN {
            let value = match col {
                13 => cpu,
                15 => display,
                _ => 0.0,
            };
            cells.push(format!(" {value}"));
        }
        cells.join(",")
    }

    fn header() -> String {
        let mut cells = vec!["AppId".to_string(), " UserId".to_string(), " TimeStamp".to_string()];
        cells.extend((3..ROW_LEN).map(|i| format!(" Col{i}")));
        cells.join(",")
    }

    fn write_dump(dir: &Path, name: &str, rows: &[String]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut text = String::from("preamble\n");
        text.push_str(&header());
        text.push('\n');
        for r in rows {
            text.push_str(r);
            text.push('\n');
        }
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn sums_rows_since_run_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dump(
            dir.path(),
            "chrome_favicon_0_srum_20171217_010658.csv",
            &[
                row("\\device\\chrome.exe", "2017-12-17:01:00:00.0000", 100.0, 100.0),
                row("\\device\\chrome.exe", "2017-12-17:01:10:00.0000", 3.0, 0.0),
                row("\\device\\svchost.exe", "2017-12-17:01:10:00.0000", 50.0, 0.0),
                row("\\device\\chrome.exe", "2017-12-17:01:20:00.0000", 4.5, 0.0),
            ],
        );

        let measures = Srum.extract(&path, &EngineConfig::default()).unwrap();
        assert_eq!(measures.len(), 1);
        let cpu = &measures[0];
        assert_eq!(cpu.measure_name, "CPUEnergyConsumption");
        assert!((cpu.value - 7.5).abs() < 1e-9);
        assert_eq!(cpu.browser, "chrome.exe");
        assert_eq!(cpu.measure_set, "srum");
        assert_eq!(cpu.scenario_name, "favicon");
    }

    #[test]
    fn stops_at_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dump(
            dir.path(),
            "chrome_favicon_1_srum_20171217_010658.csv",
            &[row("chrome.exe", "2017-12-18:00:00:00.0000", 1.0, 2.0)],
        );
        let measures = Srum.extract(&path, &EngineConfig::default()).unwrap();
        let names: Vec<&str> = measures.iter().map(|m| m.measure_name.as_str()).collect();
        assert_eq!(names, ["CPUEnergyConsumption", "DisplayEnergyConsumption"]);
    }

    #[test]
    fn unknown_browser_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dump(
            dir.path(),
            "lynx_favicon_0_srum_20171217_010658.csv",
            &[row("lynx.exe", "2017-12-18:00:00:00.0000", 1.0, 0.0)],
        );
        assert!(Srum.extract(&path, &EngineConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn rejects_extra_name_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dump(dir.path(), "chrome_fav_0_srum_20171217_010658_b.csv", &[]);
        let err = Srum.extract(&path, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Meta { .. }));
    }
}
