//! AMD uProf CLI energy reports.
//!
//! The profiler writes one report per session to
//! `amdProfCli/<session>/<session>.csv`, where `<session>` is the raw profile
//! name. Only the per-process energy table is read; producing the report from
//! the raw profile is left to the profiler.

use std::fs;
use std::path::{Component, Path};

use effcharts_core::{EngineConfig, Measure, SourceReport};

use super::{Source, has_extension};
use crate::error::ExtractError;
use crate::meta::decode_file_meta;
use crate::records::{Totals, parse_value, records_from_lines, section};

/// Directory and measure set of uProf reports.
pub const AMD_PROF_SET: &str = "amdProfCli";

const ALL_PROCESSES: &str = "ALL PROCESSES (Sort Event - Energy)";

/// `PROCESS,"Energy" (milli Joules),"CPU Time" (seconds)` rows.
const COLUMNS: [(&str, usize); 2] = [("milli Joules", 1), ("CPU Time", 2)];

/// `amdProfCli/<session>/<session>.csv` reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmdProfReport;

impl Source for AmdProfReport {
    fn report(&self) -> SourceReport {
        SourceReport::new("amd uprof", 2, Some(2))
    }

    fn matches(&self, file_name: &str) -> bool {
        has_extension(file_name, "csv")
    }

    fn claims(&self, relative: &Path) -> bool {
        let parts: Vec<Component<'_>> = relative.components().collect();
        let [Component::Normal(dir), Component::Normal(session), Component::Normal(file)] = parts.as_slice() else {
            return false;
        };
        *dir == AMD_PROF_SET
            && file.to_str().is_some_and(|f| self.matches(f))
            && Path::new(file).file_stem() == Some(*session)
    }

    fn extract(&self, path: &Path, config: &EngineConfig) -> Result<Vec<Measure>, ExtractError> {
        let template = Measure {
            measure_set: AMD_PROF_SET.to_string(),
            ..decode_file_meta(path, config)?
        };
        let text = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let lines: Vec<String> = section(&text, ALL_PROCESSES)
            .into_iter()
            .map(|l| l.replace('"', ""))
            .collect();
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();

        let mut totals = Totals::default();
        for row in records_from_lines(path, &lines, b',')? {
            let Some(process) = row.get(0) else {
                continue;
            };
            if !template.browser_processes.iter().any(|p| process.contains(p.as_str())) {
                continue;
            }
            for (name, col) in COLUMNS {
                if let Some(value) = row.get(col).and_then(|c| parse_value(path, c)) {
                    totals.add(name, value);
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

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = "yabro_newtab_2_amd_20180620_101500";

    const REPORT: &str = "\
AMDuProfCLI Report\r
\r
ALL PROCESSES (Sort Event - Energy)\r
PROCESS,\"Energy\" (milli Joules),\"CPU Time\" (seconds)\r
System Idle (PID - 0),12475.300,147.083\r
c:\\windows\\system32\\svchost.exe (PID - 1828),2135.332,3.532\r
C:\\Distros\\yandex-18.6.0.742\\browser.exe (PID - 6688),267.393,0.428\r
C:\\Distros\\yandex-18.6.0.742\\browser.exe (PID - 7012),32.607,0.072\r
\r
ALL MODULES (Sort Event - Energy)\r
MODULE,\"Energy\" (milli Joules)\r
browser.dll,999\r
";

    #[test]
    fn sums_browser_processes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("{SESSION}.csv"));
        std::fs::write(&path, REPORT).unwrap();

        let measures = AmdProfReport.extract(&path, &EngineConfig::default()).unwrap();
        assert_eq!(measures.len(), 2);
        assert_eq!(measures[0].measure_set, AMD_PROF_SET);
        assert_eq!(measures[0].measure_name, "milli Joules");
        assert!((measures[0].value - 300.0).abs() < 1e-9);
        assert_eq!(measures[1].measure_name, "CPU Time");
        assert!((measures[1].value - 0.5).abs() < 1e-9);
        assert_eq!(measures[1].browser, "browser.exe");
        assert_eq!(measures[1].full_set_name(), "amdProfCli CPU Time newtab");
    }

    #[test]
    fn claims_session_reports_only() {
        let report = format!("amdProfCli/{SESSION}/{SESSION}.csv");
        assert!(AmdProfReport.claims(Path::new(&report)));
        assert!(!AmdProfReport.claims(Path::new(&format!("amdProfCli/{SESSION}/other.csv"))));
        assert!(!AmdProfReport.claims(Path::new(&format!("amdProfCli/{SESSION}.pdata"))));
        assert!(!AmdProfReport.claims(Path::new(&format!("{SESSION}.csv"))));
    }
}
