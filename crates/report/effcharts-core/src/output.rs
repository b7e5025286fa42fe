//! Chart artifact writing.
//!
//! Each charted set produces `<out>/<set>.<ext>` and, when enabled, a
//! `<out>/<set>.json` sidecar holding the assembled bar list.

use std::path::{Path, PathBuf};

use crate::bars::Bar;
use crate::config::EngineConfig;
use crate::error::ReportError;
use crate::render::{self, Chart, ChartRenderer};
use crate::vprintln;

/// Writes rendered charts and bar sidecars into one output directory.
pub struct ArtifactWriter<'a> {
    config: &'a EngineConfig,
    renderer: &'a dyn ChartRenderer,
    out_dir: PathBuf,
    json: bool,
    run_stamp: String,
}

impl<'a> ArtifactWriter<'a> {
    /// Create a writer stamping magnitude charts with the current local time.
    pub fn new(config: &'a EngineConfig, renderer: &'a dyn ChartRenderer, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            renderer,
            out_dir: out_dir.into(),
            json: false,
            run_stamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Also write a JSON sidecar next to every chart.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Override the timestamp shown in magnitude chart titles.
    #[must_use]
    pub fn with_run_stamp(mut self, stamp: impl Into<String>) -> Self {
        self.run_stamp = stamp.into();
        self
    }

    /// Engine configuration the writer dispatches with.
    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Artifact path for a set name and extension.
    ///
    /// Path separators inside the set name are replaced with `_`.
    pub fn artifact_path(&self, set_name: &str, extension: &str) -> PathBuf {
        let stem: String = set_name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.out_dir.join(format!("{stem}.{extension}"))
    }

    /// Draw a set if its name matches the renderer table.
    ///
    /// Returns the image path, or `None` when no prefix matched and nothing
    /// was written.
    pub fn draw(&self, set_name: &str, bars: &[Bar]) -> Result<Option<PathBuf>, ReportError> {
        let Some(profile) = render::select_profile(&self.config.renderers, set_name) else {
            vprintln!("  skip {set_name}: no renderer");
            return Ok(None);
        };

        self.ensure_dir()?;
        let chart = Chart::plan(set_name, bars, profile, &self.run_stamp);
        let bytes = self.renderer.render(&chart).map_err(|message| ReportError::Render {
            set: set_name.to_string(),
            message,
        })?;

        let path = self.artifact_path(set_name, self.renderer.extension());
        std::fs::write(&path, bytes).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        vprintln!("  wrote {}", path.display());

        if self.json {
            self.write_json(set_name, bars)?;
        }
        Ok(Some(path))
    }

    /// Serialize a bar list to `<out>/<set>.json`.
    pub fn write_json(&self, set_name: &str, bars: &[Bar]) -> Result<PathBuf, ReportError> {
        self.ensure_dir()?;
        let path = self.artifact_path(set_name, "json");
        let json = serde_json::to_string_pretty(bars).map_err(|e| ReportError::Encode {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, json).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        vprintln!("  wrote {}", path.display());
        Ok(path)
    }

    fn ensure_dir(&self) -> Result<(), ReportError> {
        std::fs::create_dir_all(&self.out_dir).map_err(|source| ReportError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })
    }
}
