//! Pipeline Configuration Module
//! Explicit settings handed to the loader instead of process-wide state.

use serde::Serialize;
use std::fmt;

/// Name the export tool gives its trailing, header-less column.
pub const DEFAULT_STRAY_COLUMN: &str = "Unnamed: 15";

/// What to do when the stray export column is not in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StrayColumnPolicy {
    /// Absence is treated as schema drift and fails the load.
    #[default]
    Require,
    /// Drop the column when present, log and continue otherwise.
    Tolerate,
}

/// Verbosity of data-quality diagnostics raised while cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WarningPolicy {
    /// Report dropped rows and unmapped codes at `warn` level.
    Emit,
    /// Demote those diagnostics to `debug`.
    #[default]
    Suppress,
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    pub stray_column: String,
    pub stray_policy: StrayColumnPolicy,
    pub warnings: WarningPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stray_column: DEFAULT_STRAY_COLUMN.to_string(),
            stray_policy: StrayColumnPolicy::default(),
            warnings: WarningPolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stray_column(mut self, name: impl Into<String>) -> Self {
        self.stray_column = name.into();
        self
    }

    pub fn with_stray_policy(mut self, policy: StrayColumnPolicy) -> Self {
        self.stray_policy = policy;
        self
    }

    pub fn with_warnings(mut self, warnings: WarningPolicy) -> Self {
        self.warnings = warnings;
        self
    }

    /// Whether data-quality warnings should surface at `warn` level.
    pub fn emits_warnings(&self) -> bool {
        self.warnings == WarningPolicy::Emit
    }

    /// Log a data-quality diagnostic at the level the warning policy selects.
    pub fn report_quality(&self, message: fmt::Arguments<'_>) {
        if self.emits_warnings() {
            tracing::warn!("{}", message);
        } else {
            tracing::debug!("{}", message);
        }
    }
}
