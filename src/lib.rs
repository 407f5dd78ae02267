//! Honeypot Insights - attack pattern analysis for honeypot CSV exports
//!
//! The pipeline loads an export once, cleans it into a [`data::CanonicalDataset`],
//! then derives the statistics summary and the chart aggregates from it.

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod data;
pub mod report;
pub mod settings;
pub mod stats;

pub use aggregate::AnalysisReport;
pub use config::{PipelineConfig, StrayColumnPolicy, WarningPolicy};
pub use data::{prepare, prepare_file, CanonicalDataset, MalformedSourceError};
pub use stats::{summarize, Summary};
