//! Extractors turning profiling tool exports into [`Measure`]s.
//!
//! Each supported export format is a [`Source`]: it claims files by name,
//! extracts measures from them, and describes how its charts are labeled
//! through a [`SourceReport`].
//!
//! [`Measure`]: effcharts_core::Measure
//! [`SourceReport`]: effcharts_core::SourceReport

pub mod error;
pub mod meta;
pub mod source;

mod records;

pub use error::ExtractError;
pub use meta::{decode_file_meta, decode_file_meta_strict};
pub use source::{Source, all_sources, collect};
