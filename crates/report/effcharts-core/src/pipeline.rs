//! Per-source report generation.

use crate::bars::BarAssembler;
use crate::error::ReportError;
use crate::group;
use crate::measure::Measure;
use crate::output::ArtifactWriter;
use crate::verbose::Timer;

/// How one input source is charted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    /// Source name used in diagnostics.
    pub name: String,
    /// Decimals in aggregate (median and diff) labels.
    pub aggregate_precision: usize,
    /// Decimals in iteration labels; `None` disables the iteration view.
    pub iteration_precision: Option<usize>,
}

/// Outcome of one source's report generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Charts written to disk.
    pub charts_written: usize,
    /// Sets with no matching renderer.
    pub sets_skipped: usize,
}

impl SourceReport {
    /// Describe a source.
    pub fn new(name: impl Into<String>, aggregate_precision: usize, iteration_precision: Option<usize>) -> Self {
        Self {
            name: name.into(),
            aggregate_precision,
            iteration_precision,
        }
    }

    /// Group, reduce and draw the aggregate view, then the iteration view.
    ///
    /// The first I/O or rendering failure aborts this source.
    pub fn generate(&self, measures: &[Measure], writer: &ArtifactWriter<'_>) -> Result<ReportSummary, ReportError> {
        let _t = Timer::start(format!("{} charts", self.name));
        let mut summary = ReportSummary::default();
        let config = writer.config();

        let aggregate = BarAssembler::new(config, self.aggregate_precision)
            .aggregate(&group::group_by_set(measures));
        for (set_name, bars) in &aggregate {
            summary.record(writer.draw(set_name, bars)?.is_some());
        }

        if let Some(precision) = self.iteration_precision {
            let iterations = BarAssembler::new(config, precision)
                .iterations(&group::group_by_iteration(measures));
            for (set_name, bars) in &iterations {
                summary.record(writer.draw(set_name, bars)?.is_some());
            }
        }

        Ok(summary)
    }
}

impl ReportSummary {
    fn record(&mut self, written: bool) {
        if written {
            self.charts_written += 1;
        } else {
            self.sets_skipped += 1;
        }
    }
}
