//! Intel Platform Power Estimation Tool process tables.
//!
//! The tab-separated `.xls` export has one header row followed by one row per
//! sample. Whole-system power columns are summed as is; per-process columns
//! are summed only for the processes of the browser under test.

use std::path::Path;

use effcharts_core::{EngineConfig, Measure, SourceReport};

use super::{Source, has_extension};
use crate::error::ExtractError;
use crate::meta::decode_file_meta;
use crate::records::{parse_value, read_records};

/// Header pattern and resulting measure name of whole-system columns.
const SYSTEM_COLUMNS: [(&str, &str); 4] = [
    ("Power(_Total)\\Package W", "Power Total Package W"),
    ("Power(_Total)\\CPU W", "Power Total CPU W"),
    ("Power(_Total)\\GPU W", "Power Total GPU W"),
    ("Power(_Total)\\Disk W", "Power Total Disk W"),
];

/// Header pattern and resulting measure name of per-process columns.
const PROCESS_COLUMNS: [(&str, &str); 3] = [
    ("GPU Power W", "GPU Power W"),
    ("CPU Power W", "CPU Power W"),
    (")\\%CPU", "CPU Usage Percents"),
];

/// `*ippet*_processes*.xls` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ippet;

impl Source for Ippet {
    fn report(&self) -> SourceReport {
        SourceReport::new("ippet", 6, Some(6))
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.contains("ippet") && file_name.contains("_processes") && has_extension(file_name, "xls")
    }

    fn extract(&self, path: &Path, config: &EngineConfig) -> Result<Vec<Measure>, ExtractError> {
        let template = decode_file_meta(path, config)?;
        let records = read_records(path, b'\t')?;
        let Some((header, samples)) = records.split_first() else {
            return Err(ExtractError::Structure {
                path: path.to_path_buf(),
                reason: "missing header row".to_string(),
            });
        };

        let mut columns: Vec<(&str, Vec<usize>)> = Vec::new();
        for (pattern, name) in SYSTEM_COLUMNS {
            let ids = header
                .iter()
                .enumerate()
                .filter(|(_, title)| title.contains(pattern))
                .map(|(id, _)| id)
                .collect();
            columns.push((name, ids));
        }
        for (pattern, name) in PROCESS_COLUMNS {
            let ids = header
                .iter()
                .enumerate()
                .filter(|(_, title)| {
                    title.contains(pattern)
                        && template
                            .browser_processes
                            .iter()
                            .any(|p| title.contains(p.as_str()))
                })
                .map(|(id, _)| id)
                .collect();
            columns.push((name, ids));
        }

        let mut measures = Vec::new();
        for (name, ids) in columns {
            let total: f64 = samples
                .iter()
                .flat_map(|row| ids.iter().filter_map(move |&id| row.get(id)))
                .filter_map(|cell| parse_value(path, cell))
                .sum();
            if total == 0.0 {
                continue;
            }
            measures.push(Measure {
                measure_name: name.to_string(),
                value: total,
                ..template.clone()
            });
        }
        Ok(measures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Time\t\
        \\\\HOST\\Power(_Total)\\Package W\t\
        \\\\HOST\\Power(_Total)\\GPU W\t\
        \\\\HOST\\Process(chrome.exe)\\CPU Power W\t\
        \\\\HOST\\Process(chrome.exe)\\%CPU\t\
        \\\\HOST\\Process(svchost.exe)\\CPU Power W";

    fn write_table(dir: &Path, name: &str, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut text = format!("{HEADER}\n");
        for r in rows {
            text.push_str(r);
            text.push('\n');
        }
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn sums_system_and_browser_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            dir.path(),
            "chrome_newtab_1_ippet_20180120_224843-1_processes.xls",
            &["0\t4.5\t0\t1.25\t10\t99", "1\t5.5\t0\t0.75\t20\t99"],
        );

        let measures = Ippet.extract(&path, &EngineConfig::default()).unwrap();
        let found: Vec<(&str, f64)> = measures
            .iter()
            .map(|m| (m.measure_name.as_str(), m.value))
            .collect();
        assert_eq!(
            found,
            [
                ("Power Total Package W", 10.0),
                ("CPU Power W", 2.0),
                ("CPU Usage Percents", 30.0),
            ]
        );
        assert_eq!(measures[0].measure_set, "ippet");
        assert_eq!(measures[0].browser, "chrome.exe");
        assert_eq!(measures[0].iteration, "1");
    }

    #[test]
    fn empty_table_is_a_structure_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chrome_newtab_1_ippet_20180120_224843-1_processes.xls");
        std::fs::write(&path, "").unwrap();
        let err = Ippet.extract(&path, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Structure { .. }));
    }

    #[test]
    fn claims_process_tables_only() {
        assert!(Ippet.matches("edge_x_0_ippet_20180120_224843-1_processes.xls"));
        assert!(!Ippet.matches("edge_x_0_ippet_20180120_224843-1.xls"));
        assert!(!Ippet.matches("edge_x_0_ippet_20180120_224843-1_processes.csv"));
    }
}
