//! Honeypot Insights - attack pattern statistics and charts from honeypot CSV exports.

mod bootstrap;

use anyhow::{Context, Result};
use clap::Parser;
use honeypot_insights::charts::ChartRenderer;
use honeypot_insights::report::{render_statistics, write_json};
use honeypot_insights::settings::Settings;
use honeypot_insights::{prepare_file, AnalysisReport};

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Honeypot Insights v{} starting", env!("CARGO_PKG_VERSION"));

    let config = settings.pipeline_config();
    let dataset = prepare_file(&settings.input, &config)
        .with_context(|| format!("Failed to prepare {}", settings.input.display()))?;

    let report = AnalysisReport::build(&dataset);
    print!("{}", render_statistics(&report.summary));

    if let Some(json_path) = &settings.json {
        write_json(&report, json_path)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
    }

    if settings.no_charts {
        return Ok(());
    }

    let renderer = ChartRenderer::new(&settings.out_dir);
    let written = renderer.render_all(&report)?;
    tracing::info!("Wrote {} charts to {}", written.len(), renderer.out_dir().display());

    if settings.open && !written.is_empty() {
        open::that(renderer.out_dir())
            .with_context(|| format!("Failed to open {}", renderer.out_dir().display()))?;
    }

    Ok(())
}
