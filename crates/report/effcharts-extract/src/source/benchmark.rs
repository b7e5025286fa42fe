//! Browser benchmark score tables: `test,browser,score` rows.

use std::path::Path;

use effcharts_core::{EngineConfig, Measure, SourceReport, dprintln};

use super::{Source, has_extension};
use crate::error::ExtractError;
use crate::records::{parse_value, read_records};

const PREFIX: &str = "YandexBenchmark";
const COL_TEST: usize = 0;
const COL_BROWSER: usize = 1;
const COL_VALUE: usize = 2;

/// `YandexBenchmark*.csv` files. Scores have no iteration view.
#[derive(Debug, Clone, Copy, Default)]
pub struct BenchmarkCsv;

impl Source for BenchmarkCsv {
    fn report(&self) -> SourceReport {
        SourceReport::new("benchmark", 2, None)
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(PREFIX) && has_extension(file_name, "csv")
    }

    fn extract(&self, path: &Path, config: &EngineConfig) -> Result<Vec<Measure>, ExtractError> {
        let mut measures = Vec::new();
        for row in &read_records(path, b',')? {
            if row.len() <= COL_VALUE {
                continue;
            }
            let short = row[COL_BROWSER].trim();
            let Some(process) = config.process_for(short) else {
                dprintln!("  {}: unknown browser '{short}'", path.display());
                continue;
            };
            let Some(value) = parse_value(path, &row[COL_VALUE]) else {
                continue;
            };
            measures.push(Measure {
                iteration: "0".to_string(),
                measure_set: row[COL_TEST].trim().to_string(),
                browser: process.to_string(),
                browser_short_name: short.to_string(),
                browser_processes: config.processes_for(short).to_vec(),
                value,
                ..Measure::default()
            });
        }
        Ok(measures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_scores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("YandexBenchmark.csv");
        std::fs::write(
            &path,
            "YandexBenchmarkJetStream,yabro,181.5\n\
             YandexBenchmarkJetStream,chrome,175\n\
             YandexBenchmarkJetStream,netscape,12\n\
             YandexBenchmarkSpeedometer,chrome,n/a\n",
        )
        .unwrap();

        let measures = BenchmarkCsv.extract(&path, &EngineConfig::default()).unwrap();
        assert_eq!(measures.len(), 2);
        assert_eq!(measures[0].browser, "browser.exe");
        assert_eq!(measures[0].iteration, "0");
        assert_eq!(measures[0].full_set_name(), "YandexBenchmarkJetStream");
        assert_eq!(measures[1].browser, "chrome.exe");
        assert!((measures[1].value - 175.0).abs() < f64::EPSILON);
    }

    #[test]
    fn has_no_iteration_view() {
        assert_eq!(BenchmarkCsv.report().iteration_precision, None);
    }
}
