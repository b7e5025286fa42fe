//! Export formats understood by the report generator.

mod amd_prof;
mod benchmark;
mod intel_power;
mod ippet;
mod performance;
mod socwatch;
mod srum;

use std::path::{Path, PathBuf};

use effcharts_core::{EngineConfig, Measure, SourceReport, vprintln};

use crate::error::ExtractError;

pub use amd_prof::AmdProfReport;
pub use benchmark::BenchmarkCsv;
pub use intel_power::IntelPowerLog;
pub use ippet::Ippet;
pub use performance::PerformanceCsv;
pub use socwatch::SocWatch;
pub use srum::Srum;

/// One kind of profiling export.
pub trait Source {
    /// Name and label precision of this source's charts.
    fn report(&self) -> SourceReport;

    /// Whether a file with this name belongs to this source.
    fn matches(&self, file_name: &str) -> bool;

    /// Whether a file at `relative` (below the input directory) belongs to
    /// this source. Defaults to top-level files accepted by [`Source::matches`].
    fn claims(&self, relative: &Path) -> bool {
        relative.parent().is_some_and(|p| p.as_os_str().is_empty())
            && relative
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| self.matches(n))
    }

    /// Extract every measure contained in one file.
    fn extract(&self, path: &Path, config: &EngineConfig) -> Result<Vec<Measure>, ExtractError>;
}

/// Every built-in source, in report order.
pub fn all_sources() -> Vec<Box<dyn Source>> {
    vec![
        Box::new(PerformanceCsv),
        Box::new(BenchmarkCsv),
        Box::new(Srum),
        Box::new(IntelPowerLog),
        Box::new(Ippet),
        Box::new(SocWatch),
        Box::new(AmdProfReport),
    ]
}

/// Run `source` over the files below `root` it claims and concatenate their
/// measures.
///
/// The first file that fails to extract aborts the source.
pub fn collect(
    source: &dyn Source,
    root: &Path,
    files: &[PathBuf],
    config: &EngineConfig,
) -> Result<Vec<Measure>, ExtractError> {
    let mut measures = Vec::new();
    for path in files {
        let relative = path.strip_prefix(root).unwrap_or(path);
        if !source.claims(relative) {
            continue;
        }
        let found = source.extract(path, config)?;
        vprintln!(
            "  {}: {} measures from {}",
            source.report().name,
            found.len(),
            relative.display()
        );
        measures.extend(found);
    }
    Ok(measures)
}

/// Whether `file_name` has the given extension (without the dot).
fn has_extension(file_name: &str, extension: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|e| e == extension)
}
