//! Aggregate module - chart-ready tables built from the canonical dataset

mod geo;
mod host_type;
mod protocol;
mod timeline;

pub use geo::{geo_points, GeoPoint};
pub use host_type::{host_type_matrix, HostTypeMatrix, HostTypeRow};
pub use protocol::{protocol_counts, ProtocolCounts, ProtocolShare};
pub use timeline::{daily_counts, DailyCount};

use crate::data::{CanonicalDataset, CleaningStats};
use crate::stats::{summarize, Summary};
use serde::Serialize;

/// Everything the presentation layer consumes from one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub cleaning: CleaningStats,
    pub summary: Summary,
    pub geo_points: Vec<GeoPoint>,
    pub daily_counts: Vec<DailyCount>,
    pub protocol_counts: ProtocolCounts,
    pub host_type_matrix: HostTypeMatrix,
}

impl AnalysisReport {
    /// Run the summary and the four aggregators. None of them depends on
    /// another, so they are computed in parallel over the shared dataset.
    pub fn build(dataset: &CanonicalDataset) -> Self {
        let ((summary, geo_points), ((daily_counts, protocol_counts), host_type_matrix)) =
            rayon::join(
                || rayon::join(|| summarize(dataset), || geo_points(dataset)),
                || {
                    rayon::join(
                        || rayon::join(|| daily_counts(dataset), || protocol_counts(dataset)),
                        || host_type_matrix(dataset),
                    )
                },
            );

        tracing::info!(
            "Aggregated {} records: {} days, {} protocols, {} hosts",
            dataset.len(),
            daily_counts.len(),
            protocol_counts.len(),
            host_type_matrix.rows.len()
        );

        Self {
            cleaning: dataset.cleaning_stats(),
            summary,
            geo_points,
            daily_counts,
            protocol_counts,
            host_type_matrix,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}
