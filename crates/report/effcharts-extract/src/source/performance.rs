//! Performance CSV exports: one row per sample, with the measured process
//! named inside the measure column.

use std::path::Path;

use effcharts_core::{EngineConfig, Measure, SourceReport, dprintln};

use super::{Source, has_extension};
use crate::error::ExtractError;
use crate::records::{parse_value, read_records};

const COL_TEST: usize = 1;
const COL_ITERATION: usize = 2;
const COL_SET: usize = 6;
const COL_MEASURE: usize = 7;
const COL_RESULT: usize = 8;

/// `Performance*.csv` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceCsv;

impl Source for PerformanceCsv {
    fn report(&self) -> SourceReport {
        SourceReport::new("performance", 2, Some(2))
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with("Performance") && has_extension(file_name, "csv")
    }

    fn extract(&self, path: &Path, config: &EngineConfig) -> Result<Vec<Measure>, ExtractError> {
        let processes = config.known_processes();
        let mut measures = Vec::new();

        for (line, row) in read_records(path, b',')?.iter().enumerate() {
            if row.len() <= COL_RESULT {
                dprintln!("  {}:{}: skipping short row", path.display(), line + 1);
                continue;
            }
            let measure_name = &row[COL_MEASURE];
            for process in processes.iter().filter(|p| measure_name.contains(*p)) {
                let Some(value) = parse_value(path, &row[COL_RESULT]) else {
                    continue;
                };
                measures.push(Measure {
                    iteration: row[COL_ITERATION].to_string(),
                    measure_set: row[COL_SET].to_string(),
                    measure_name: measure_name.to_string(),
                    scenario_name: row[COL_TEST].to_string(),
                    browser: (*process).to_string(),
                    browser_short_name: config.short_name_for(process).unwrap_or_default().to_string(),
                    browser_processes: Vec::new(),
                    date: None,
                    value,
                });
            }
        }

        Ok(measures)
    }
}
