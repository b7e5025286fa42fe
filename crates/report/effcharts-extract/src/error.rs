//! Error types for measure extraction.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that abort extraction of one file.
#[derive(Debug)]
pub enum ExtractError {
    /// The file could not be read.
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The file is not valid delimited text.
    Csv {
        /// File path.
        path: PathBuf,
        /// Underlying CSV failure.
        source: csv::Error,
    },
    /// The file name does not follow the metadata token convention.
    Meta {
        /// File name.
        file: String,
        /// What is wrong with it.
        reason: String,
    },
    /// An expected section, header or column is missing.
    Structure {
        /// File path.
        path: PathBuf,
        /// What is missing.
        reason: String,
    },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            Self::Csv { path, source } => write!(f, "parsing {}: {source}", path.display()),
            Self::Meta { file, reason } => write!(f, "file name '{file}': {reason}"),
            Self::Structure { path, reason } => write!(f, "{}: {reason}", path.display()),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}
