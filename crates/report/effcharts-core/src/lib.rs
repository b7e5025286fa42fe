//! Measure aggregation and comparative reporting for browser efficiency runs.
//!
//! Every format extractor produces a flat list of [`Measure`]s. This crate
//! groups them by a deterministic full set name, reduces each browser bucket to
//! its median, appends baseline diff bars with good/bad polarity and hands the
//! assembled bars to a renderer selected by set-name prefix.
//!
//! Pipeline: measures → [`group`] → [`stats`] → [`bars`] → [`render`] →
//!           [`output`] (PNG + optional JSON sidecar).

pub mod bars;
pub mod config;
pub mod error;
pub mod group;
pub mod measure;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod stats;
pub mod verbose;

pub use bars::{Bar, BarStyle, Color};
pub use config::{BrowserDef, EngineConfig, RendererRule};
pub use error::ReportError;
pub use measure::Measure;
pub use pipeline::{ReportSummary, SourceReport};
pub use render::RenderProfile;
pub use stats::{DiffKind, Polarity};
