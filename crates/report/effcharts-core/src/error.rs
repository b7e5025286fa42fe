//! Error types for report generation.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that abort the report generation call for one source.
#[derive(Debug)]
pub enum ReportError {
    /// The output directory could not be created.
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// An artifact file could not be created or written.
    Write {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// An artifact could not be encoded (JSON or PNG).
    Encode {
        /// Artifact path.
        path: PathBuf,
        /// Encoder message.
        message: String,
    },
    /// The chart for a set could not be rendered.
    Render {
        /// Full set name of the chart.
        set: String,
        /// Renderer message.
        message: String,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => {
                write!(f, "creating directory {}: {source}", path.display())
            }
            Self::Write { path, source } => write!(f, "writing {}: {source}", path.display()),
            Self::Encode { path, message } => write!(f, "encoding {}: {message}", path.display()),
            Self::Render { set, message } => write!(f, "rendering chart '{set}': {message}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } | Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}
