//! Delimited-text helpers shared by the extractors.

use std::path::Path;

use effcharts_core::dprintln;

use crate::error::ExtractError;

/// Read every record of a delimited file. Rows may have differing lengths.
pub(crate) fn read_records(path: &Path, delimiter: u8) -> Result<Vec<csv::StringRecord>, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| ExtractError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ExtractError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Lines of every block titled `title`, up to the blank line ending it.
///
/// Report-style exports stack several tables in one file, each under a title
/// line. A title line may carry trailing commas.
pub(crate) fn section<'t>(text: &'t str, title: &str) -> Vec<&'t str> {
    let mut lines = text.lines();
    let mut found = Vec::new();
    while let Some(line) = lines.next() {
        if line.trim().trim_end_matches(',').trim_end() != title {
            continue;
        }
        found.extend(lines.by_ref().take_while(|l| !l.trim().is_empty()));
    }
    found
}

/// Parse already-extracted lines as delimited records with trimmed cells.
pub(crate) fn records_from_lines(path: &Path, lines: &[&str], delimiter: u8) -> Result<Vec<csv::StringRecord>, ExtractError> {
    let text = lines.join("\n");
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ExtractError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Running per-name totals, kept in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct Totals(Vec<(String, f64)>);

impl Totals {
    pub(crate) fn add(&mut self, name: &str, value: f64) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some((_, total)) => *total += value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    /// Totals above zero, in first-seen order.
    pub(crate) fn positive(self) -> impl Iterator<Item = (String, f64)> {
        self.0.into_iter().filter(|&(_, total)| total > 0.0)
    }
}

/// Parse a numeric cell, accepting surrounding spaces and a decimal comma.
///
/// Unparsable cells are reported and yield `None` so the caller can skip the
/// sample.
pub(crate) fn parse_value(path: &Path, raw: &str) -> Option<f64> {
    let text = raw.trim().replacen(',', ".", 1);
    match text.parse::<f64>() {
        Ok(value) => Some(value),
        Err(e) => {
            dprintln!(
                "  {}: skipping sample {raw:?}: {e}",
                path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_comma_and_spaces() {
        let path = Path::new("x.csv");
        assert_eq!(parse_value(path, " 1,5 "), Some(1.5));
        assert_eq!(parse_value(path, "42"), Some(42.0));
        assert_eq!(parse_value(path, "n/a"), None);
    }

    #[test]
    fn reads_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        std::fs::write(&path, "a,b,c\n1,2\n").unwrap();
        let records = read_records(&path, b',').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].len(), 2);
    }

    #[test]
    fn section_stops_at_blank_line() {
        let text = "head\r\nTimers,\r\na,1\r\nb,2\r\n\r\nc,3\r\nTimers\nd,4\n";
        assert_eq!(section(text, "Timers"), ["a,1", "b,2", "d,4"]);
        assert!(section(text, "Missing").is_empty());
    }

    #[test]
    fn section_records_are_trimmed() {
        let records = records_from_lines(Path::new("x.csv"), &["a  , 1", " b,2 "], b',').unwrap();
        assert_eq!(&records[0][0], "a");
        assert_eq!(&records[0][1], "1");
        assert_eq!(&records[1][1], "2");
    }

    #[test]
    fn totals_merge_by_name() {
        let mut totals = Totals::default();
        totals.add("b", 1.0);
        totals.add("a", 0.0);
        totals.add("b", 2.5);
        let kept: Vec<(String, f64)> = totals.positive().collect();
        assert_eq!(kept, [("b".to_string(), 3.5)]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_records(Path::new("/nonexistent/effcharts.csv"), b',').unwrap_err();
        assert!(matches!(err, ExtractError::Csv { .. }));
    }
}
