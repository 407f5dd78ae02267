//! Command line settings.

use crate::config::{PipelineConfig, StrayColumnPolicy, WarningPolicy, DEFAULT_STRAY_COLUMN};
use clap::Parser;
use std::path::PathBuf;

/// Attack pattern statistics and charts from a honeypot CSV export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "honeypot-insights",
    about = "Attack pattern statistics and charts from a honeypot CSV export",
    version
)]
pub struct Settings {
    /// Honeypot CSV export to analyse
    pub input: PathBuf,

    /// Directory chart images are written to
    #[arg(long, default_value = "charts")]
    pub out_dir: PathBuf,

    /// Also write the full report as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Name of the unused column the export appends
    #[arg(long, default_value = DEFAULT_STRAY_COLUMN)]
    pub stray_column: String,

    /// Continue when the stray column is absent instead of failing
    #[arg(long)]
    pub tolerate_missing_stray: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Report data-quality warnings (dropped rows, unmapped codes) at warn level
    #[arg(long)]
    pub show_warnings: bool,

    /// Open the chart directory when done
    #[arg(long)]
    pub open: bool,
}

impl Settings {
    /// Pipeline configuration selected by the flags.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let stray_policy = if self.tolerate_missing_stray {
            StrayColumnPolicy::Tolerate
        } else {
            StrayColumnPolicy::Require
        };
        let warnings = if self.show_warnings {
            WarningPolicy::Emit
        } else {
            WarningPolicy::Suppress
        };

        PipelineConfig::new()
            .with_stray_column(self.stray_column.clone())
            .with_stray_policy(stray_policy)
            .with_warnings(warnings)
    }
}
