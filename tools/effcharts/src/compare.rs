//! The `compare` subcommand: stitch charts of two runs side by side.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use effcharts_core::render::png::{self, RgbaImage};
use effcharts_core::{dprintln, vprintln};
use walkdir::WalkDir;

use crate::cli::CompareArgs;

/// Merge every PNG present in both report directories.
pub fn cmd_compare(args: &CompareArgs) -> Result<()> {
    let left = charts_in(&args.left)?;
    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let mut merged = 0usize;
    for left_path in &left {
        let Some(name) = left_path.file_name() else {
            continue;
        };
        let right_path = args.right.join(name);
        if !right_path.is_file() {
            dprintln!("  {}: no counterpart in {}", name.to_string_lossy(), args.right.display());
            continue;
        }
        let out = args.output.join(name);
        merge(left_path, &right_path, &out)?;
        vprintln!("  wrote {}", out.display());
        merged += 1;
    }

    println!("Merged {merged} charts into {}", args.output.display());
    Ok(())
}

/// Write `left | right` as one PNG.
pub fn merge(left: &Path, right: &Path, out: &Path) -> Result<()> {
    let canvas = png::side_by_side(&read_png(left)?, &read_png(right)?);
    let bytes = png::encode(&canvas).map_err(|e| anyhow!("encoding {}: {e}", out.display()))?;
    fs::write(out, bytes).with_context(|| format!("failed to write {}", out.display()))
}

fn read_png(path: &Path) -> Result<RgbaImage> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    png::decode(&bytes).map_err(|e| anyhow!("decoding {}: {e}", path.display()))
}

/// PNG files directly inside `dir`, sorted by name.
fn charts_in(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("report directory {} does not exist", dir.display());
    }
    let mut charts = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|e| e == "png") {
            charts.push(entry.into_path());
        }
    }
    Ok(charts)
}
