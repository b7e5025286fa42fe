//! Intel Power Gadget logs. The summary block at the end of a log carries
//! cumulative totals such as `Cumulative IA Energy_0 (Joules) = 20.57`.

use std::fs;
use std::path::Path;

use effcharts_core::{EngineConfig, Measure, SourceReport, dprintln};

use super::{Source, has_extension};
use crate::error::ExtractError;
use crate::meta::decode_file_meta;

/// Measure set of every Intel Power Gadget total.
pub const INTEL_POWER_SET: &str = "Intel Power";

const PATTERNS: [&str; 4] = [
    "Cumulative GT Energy_0 (Joules)",
    "Cumulative Processor Energy_0 (Joules)",
    "Cumulative DRAM Energy_0 (Joules)",
    "Cumulative IA Energy_0 (Joules)",
];

/// `*IntelPowerLog*.csv` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntelPowerLog;

impl Source for IntelPowerLog {
    fn report(&self) -> SourceReport {
        SourceReport::new("intel power log", 6, Some(6))
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.contains("IntelPowerLog") && has_extension(file_name, "csv")
    }

    fn extract(&self, path: &Path, config: &EngineConfig) -> Result<Vec<Measure>, ExtractError> {
        let text = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut template: Option<Measure> = None;
        let mut measures = Vec::new();
        for line in text.lines() {
            let Some(pattern) = PATTERNS.iter().find(|p| line.contains(*p)) else {
                continue;
            };
            let Some(value) = first_number(line) else {
                dprintln!("  {}: no value in {line:?}", path.display());
                continue;
            };
            if template.is_none() {
                template = Some(decode_file_meta(path, config)?);
            }
            let Some(base) = &template else {
                continue;
            };
            measures.push(Measure {
                measure_set: INTEL_POWER_SET.to_string(),
                measure_name: (*pattern).to_string(),
                value,
                ..base.clone()
            });
        }
        Ok(measures)
    }
}

/// First `=`-separated token of a line that parses as a number.
fn first_number(line: &str) -> Option<f64> {
    line.split('=').find_map(|part| part.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_joule_totals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chrome_newtab_2_IntelPowerLog_20180120_224843.csv");
        std::fs::write(
            &path,
            "System Time,RDTSC,Elapsed Time (sec)\n\
             12:00:00:001,1234,0.1\n\
             \n\
             Cumulative Processor Energy_0 (Joules) = 20.57\n\
             Cumulative Processor Energy_0 (mWh) = 5.71\n\
             Cumulative IA Energy_0 (Joules) = 12.5\n\
             Cumulative GT Energy_0 (Joules) = broken\n",
        )
        .unwrap();

        let measures = IntelPowerLog.extract(&path, &EngineConfig::default()).unwrap();
        assert_eq!(measures.len(), 2);
        assert_eq!(measures[0].measure_set, INTEL_POWER_SET);
        assert_eq!(measures[0].measure_name, "Cumulative Processor Energy_0 (Joules)");
        assert!((measures[0].value - 20.57).abs() < 1e-9);
        assert_eq!(measures[1].browser, "chrome.exe");
        assert_eq!(measures[1].iteration, "2");
        assert_eq!(
            measures[1].full_set_name(),
            "Intel Power Cumulative IA Energy_0 (Joules) newtab"
        );
    }

    #[test]
    fn log_without_totals_needs_no_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IntelPowerLog.csv");
        std::fs::write(&path, "System Time,RDTSC\n").unwrap();
        assert!(IntelPowerLog.extract(&path, &EngineConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn picks_first_numeric_token() {
        assert_eq!(first_number("Total = 1.5 = 2"), Some(1.5));
        assert_eq!(first_number("Total = n/a"), None);
    }
}
