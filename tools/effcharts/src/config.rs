//! Engine configuration loading.
//!
//! An explicit `--config` file wins; otherwise `effcharts.toml` inside the
//! input directory is used when present, and the built-in tables otherwise.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use effcharts_core::{EngineConfig, vprintln};

/// Configuration file looked up inside the input directory.
pub const CONFIG_FILE: &str = "effcharts.toml";

/// Resolve and load the engine configuration for a run.
pub fn load(explicit: Option<&Path>, input: &Path) -> Result<EngineConfig> {
    let Some(path) = locate(explicit, input) else {
        vprintln!("Using built-in configuration");
        return Ok(EngineConfig::default());
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = EngineConfig::from_toml_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    vprintln!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn locate(explicit: Option<&Path>, input: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = input.join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use effcharts_core::Polarity;

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(None, dir.path()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn picks_up_file_in_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "baseline = \"chrome.exe\"\n\n[polarity]\n\"memSet WorkingSet\" = \"bigger_is_better\"\n",
        )
        .unwrap();

        let config = load(None, dir.path()).unwrap();
        assert_eq!(config.baseline, "chrome.exe");
        assert_eq!(config.polarity_for("memSet WorkingSet"), Polarity::BiggerIsBetter);
        assert_eq!(config.renderers, EngineConfig::default().renderers);
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load(Some(&missing), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("nope.toml"));
    }

    #[test]
    fn malformed_file_names_its_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "baseline = [").unwrap();
        let err = load(None, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse"));
    }
}
