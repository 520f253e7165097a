// The cleaning stage: raw CSV export -> validated JSON Lines artifact.
//
// Streams the export row by row so memory stays flat regardless of how
// large the portal dump is. Rows that fail validation are counted by
// reason rather than aborting the run; only I/O errors stop the pass.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::Config;
use crate::dataset::artifact::ArtifactWriter;
use crate::dataset::cleaner::{clean_record, CleanSummary};
use crate::dataset::records::RawIncident;

/// Run the cleaning pass. Returns the summary counters for display.
pub fn run(config: &Config, input_override: Option<&str>) -> Result<CleanSummary> {
    let input_path = config.require_input(input_override)?;

    info!(input = %input_path, artifact = %config.artifact_path, "Starting cleaning pass");

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&input_path)
        .with_context(|| format!("Failed to open input CSV {input_path}"))?;

    let mut writer = ArtifactWriter::create(&config.artifact_path)?;
    let mut summary = CleanSummary::default();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  Cleaning {pos} rows {spinner}")
            .unwrap(),
    );

    for result in reader.deserialize::<RawIncident>() {
        summary.rows_read += 1;
        pb.inc(1);

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                summary.dropped_malformed += 1;
                // Log the first few so a systematically broken export is visible
                if summary.dropped_malformed <= 3 {
                    warn!(row = summary.rows_read, error = %e, "Skipping malformed row");
                }
                continue;
            }
        };

        match clean_record(raw) {
            Ok(incident) => {
                writer.append(&incident)?;
                summary.rows_written += 1;
            }
            Err(reason) => summary.record_drop(reason),
        }
    }

    let written = writer.finish()?;
    pb.finish_and_clear();

    if written == 0 {
        anyhow::bail!(
            "No rows survived cleaning from {input_path}\n\
             Check that the file is the incident export (not a report summary)\n\
             and that its columns match the open-data portal format."
        );
    }

    info!(
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        dropped = summary.dropped_total(),
        "Cleaning pass complete"
    );

    Ok(summary)
}
