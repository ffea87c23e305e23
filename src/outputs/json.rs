//! JSON output of batch reports.
//!
//! # Output Structure
//!
//! Files are organized by local date, one file per run:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── top_081502.json
//!     └── category-world_120044.json
//! ```

use super::BatchReport;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`BatchReport`] to `{json_output_dir}/{date}/{stem}.json`.
///
/// Creates the date directory as needed and returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &BatchReport,
    json_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    let full_json_dir = format!(
        "{}/{}",
        json_output_dir.trim_end_matches('/'),
        report.local_date
    );
    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = format!("{}/{}.json", full_json_dir, report.file_stem());
    fs::write(&path, json).await?;
    info!(%path, items = report.results.len(), "Wrote JSON report");

    Ok(path)
}
