pub mod aggregator;
pub mod formatter;

use std::path::{Path, PathBuf};
use crate::errors::VulnprobeError;
use crate::models::RunReport;
use tracing::info;

pub use aggregator::ReportAggregator;
pub use formatter::{format_outcome_markdown, format_report_markdown, format_run_summary};

/// Write the machine-readable and human-readable report files for a run
/// under `<output_dir>/<run_id>/`. Returns the directory written to.
pub async fn write_report_files(
    report: &RunReport,
    output_dir: &Path,
) -> Result<PathBuf, VulnprobeError> {
    let run_dir = output_dir.join(&report.run_id);
    tokio::fs::create_dir_all(&run_dir).await?;

    let json = serde_json::to_string_pretty(report)?;
    let json_path = run_dir.join("report.json");
    tokio::fs::write(&json_path, &json).await?;
    info!(path = %json_path.display(), outcomes = report.outcomes.len(), "Wrote report.json");

    let md_path = run_dir.join("report.md");
    tokio::fs::write(&md_path, format_report_markdown(report)).await?;
    info!(path = %md_path.display(), "Wrote report.md");

    Ok(run_dir)
}
