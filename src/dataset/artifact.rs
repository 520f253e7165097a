// The intermediate artifact — cleaned incidents as JSON Lines.
//
// One incident per line keeps the handoff streamable in both directions:
// the clean stage appends records as it validates them, and the map stage
// reads them back without loading the raw export again.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::records::Incident;

/// Streaming writer for the clean stage.
pub struct ArtifactWriter {
    inner: BufWriter<File>,
    rows: usize,
}

impl ArtifactWriter {
    /// Create (or truncate) the artifact at `path`, creating parent
    /// directories as needed.
    pub fn create(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }
        let file =
            File::create(path).with_context(|| format!("Failed to create artifact {path}"))?;
        Ok(Self {
            inner: BufWriter::new(file),
            rows: 0,
        })
    }

    pub fn append(&mut self, incident: &Incident) -> Result<()> {
        serde_json::to_writer(&mut self.inner, incident)?;
        self.inner.write_all(b"\n")?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and return the number of rows written.
    pub fn finish(mut self) -> Result<usize> {
        self.inner.flush().context("Failed to flush artifact")?;
        Ok(self.rows)
    }
}

/// Read the whole artifact back into memory.
///
/// The map stage operates on the full record set (scoring is memoized per
/// distinct description), so there is no benefit to streaming here.
pub fn read_incidents(path: &str) -> Result<Vec<Incident>> {
    let file = File::open(path).with_context(|| format!("Failed to open artifact {path}"))?;
    let reader = BufReader::new(file);

    let mut incidents = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read artifact line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let incident: Incident = serde_json::from_str(&line).with_context(|| {
            format!("Malformed artifact record on line {}", line_no + 1)
        })?;
        incidents.push(incident);
    }
    Ok(incidents)
}

/// Basic artifact facts for the `status` command.
#[derive(Debug)]
pub struct ArtifactStats {
    pub rows: usize,
    pub file_bytes: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

pub fn stats(path: &str) -> Result<ArtifactStats> {
    let file_bytes = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat artifact {path}"))?
        .len();

    let incidents = read_incidents(path)?;
    let first_date = incidents.iter().map(|i| i.date_occurred).min();
    let last_date = incidents.iter().map(|i| i.date_occurred).max();

    Ok(ArtifactStats {
        rows: incidents.len(),
        file_bytes,
        first_date,
        last_date,
    })
}
