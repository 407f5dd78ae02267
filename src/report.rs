//! Statistics Report
//! Plain-text rendering of the dataset summary and JSON export of a full run.

use crate::aggregate::AnalysisReport;
use crate::stats::{DatasetSummary, Summary};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

const RULE: &str = "=========================";

/// Render the statistics block printed after loading.
pub fn render_statistics(summary: &Summary) -> String {
    match summary {
        Summary::Empty => format!(
            "{RULE}\nDataset Statistics\n{RULE}\nNo usable records after cleaning.\n{RULE}\n"
        ),
        Summary::Populated(summary) => render_populated(summary),
    }
}

fn render_populated(s: &DatasetSummary) -> String {
    let mut out = format!("{RULE}\nDataset Statistics\n{RULE}\n");
    out.push_str(&format!(
        "Total number of entries: {}\n",
        thousands(s.total_records)
    ));
    out.push_str(&format!("Number of unique hosts: {}\n", s.unique_hosts));
    out.push_str(&format!("Date range: {} to {}\n", s.first_seen, s.last_seen));

    out.push_str("\nMost common attack types:\n");
    let width = s
        .top_types
        .iter()
        .map(|t| t.attack_type.len())
        .max()
        .unwrap_or(0);
    for freq in &s.top_types {
        out.push_str(&format!("{:<width$}  {:>8}\n", freq.attack_type, freq.count));
    }

    out.push_str("\nBasic statistics for numerical columns:\n");
    out.push_str(&format!("{:<6} {:>14} {:>14}\n", "", "latitude", "longitude"));
    for ((label, lat), (_, lon)) in s.latitude.rows().iter().zip(s.longitude.rows().iter()) {
        out.push_str(&format!("{label:<6} {lat:>14.6} {lon:>14.6}\n"));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

/// `1234567` → `1,234,567`.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Write the full report as pretty-printed JSON.
pub fn write_json(report: &AnalysisReport, path: &Path) -> io::Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    tracing::info!("Wrote JSON report to {}", path.display());
    Ok(())
}
