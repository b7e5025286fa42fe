//! File-name metadata decoding.
//!
//! Exported files are named
//! `<browser>_<scenario>_<iteration>_<measureSet>_<yyyymmdd>_<hhmmss>[...]`,
//! e.g. `chrome_yandexstaticfavicon_0_srum_20171217_010658.csv`.

use std::path::Path;

use chrono::NaiveDateTime;
use effcharts_core::{EngineConfig, Measure};

use crate::error::ExtractError;

const META_TOKENS: usize = 6;

/// Decode a file name with at least six `_`-separated tokens into a
/// template measure (no name or value yet).
pub fn decode_file_meta(path: &Path, config: &EngineConfig) -> Result<Measure, ExtractError> {
    decode(path, config, false)
}

/// Like [`decode_file_meta`] but requires exactly six tokens.
pub fn decode_file_meta_strict(path: &Path, config: &EngineConfig) -> Result<Measure, ExtractError> {
    decode(path, config, true)
}

fn decode(path: &Path, config: &EngineConfig, strict: bool) -> Result<Measure, ExtractError> {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tokens: Vec<&str> = file.split('_').collect();

    let count_ok = if strict {
        tokens.len() == META_TOKENS
    } else {
        tokens.len() >= META_TOKENS
    };
    if !count_ok {
        return Err(ExtractError::Meta {
            reason: format!(
                "expected {}{META_TOKENS} '_'-separated tokens, found {}",
                if strict { "" } else { "at least " },
                tokens.len()
            ),
            file,
        });
    }

    let Some(time) = tokens[5].get(..6) else {
        return Err(ExtractError::Meta {
            reason: format!("time token '{}' is shorter than hhmmss", tokens[5]),
            file,
        });
    };
    let stamp = format!("{} {time}", tokens[4]);
    let date = NaiveDateTime::parse_from_str(&stamp, "%Y%m%d %H%M%S").map_err(|e| ExtractError::Meta {
        reason: format!("bad timestamp '{stamp}': {e}"),
        file: file.clone(),
    })?;

    let short = tokens[0];
    Ok(Measure {
        iteration: tokens[2].to_string(),
        measure_set: tokens[3].to_string(),
        scenario_name: tokens[1].to_string(),
        browser: config.process_for(short).unwrap_or_default().to_string(),
        browser_short_name: short.to_string(),
        browser_processes: config.processes_for(short).to_vec(),
        date: Some(date),
        ..Measure::default()
    })
}
