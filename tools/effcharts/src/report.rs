//! The `report` subcommand: extract every source and draw its charts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use effcharts_core::output::ArtifactWriter;
use effcharts_core::render::png::PngRenderer;
use effcharts_core::verbose::Timer;
use effcharts_core::{EngineConfig, ReportSummary, dprintln, vprintln};
use effcharts_extract::{Source, all_sources, collect};
use walkdir::WalkDir;

use crate::cli::ReportArgs;
use crate::config;

/// Generate charts for every source found in the input directory.
///
/// Sources run independently: a failing source is reported and the rest
/// still run, but the command fails at the end.
pub fn cmd_report(args: &ReportArgs) -> Result<()> {
    let _t = Timer::start("report");
    let config = config::load(args.config.as_deref(), &args.input)?;
    let files = discover(&args.input)?;
    vprintln!("Found {} files in {}", files.len(), args.input.display());

    let out_dir = args.output.as_ref().unwrap_or(&args.input);
    let renderer = PngRenderer::new();
    let writer = ArtifactWriter::new(&config, &renderer, out_dir).with_json(args.json);

    let mut total = ReportSummary::default();
    let mut failed = Vec::new();
    for source in all_sources() {
        let name = source.report().name;
        match run_source(source.as_ref(), &args.input, &files, &config, &writer) {
            Ok(summary) => {
                if summary.charts_written > 0 {
                    dprintln!("{name}: {} charts", summary.charts_written);
                }
                total.charts_written += summary.charts_written;
                total.sets_skipped += summary.sets_skipped;
            }
            Err(e) => {
                eprintln!("error: {name}: {e:#}");
                failed.push(name);
            }
        }
    }

    println!(
        "Wrote {} charts to {} ({} sets without a renderer)",
        total.charts_written,
        out_dir.display(),
        total.sets_skipped
    );
    if !failed.is_empty() {
        bail!("{} source(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

fn run_source(
    source: &dyn Source,
    root: &Path,
    files: &[PathBuf],
    config: &EngineConfig,
    writer: &ArtifactWriter<'_>,
) -> Result<ReportSummary> {
    let measures = collect(source, root, files, config).context("extraction failed")?;
    if measures.is_empty() {
        return Ok(ReportSummary::default());
    }
    let summary = source
        .report()
        .generate(&measures, writer)
        .context("chart generation failed")?;
    Ok(summary)
}

/// Deepest directory level any source reads from
/// (`amdProfCli/<session>/<session>.csv`).
const MAX_DEPTH: usize = 3;

/// Regular files inside `dir` down to [`MAX_DEPTH`], sorted by path.
fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("input directory {} does not exist", dir.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(MAX_DEPTH).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
