use std::env;
use std::path::Path;

use anyhow::Result;

/// Grid cell edge length in degrees (~500 m at Los Angeles latitudes).
pub const DEFAULT_CELL_SIZE_DEG: f64 = 0.005;

/// Central configuration loaded from environment variables.
///
/// All paths come from env vars with sensible defaults. The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Raw CSV export from the open-data portal.
    pub input_csv: String,
    /// Cleaned intermediate artifact (JSON Lines), the handoff between
    /// the clean and map stages.
    pub artifact_path: String,
    /// Rendered heatmap destination.
    pub map_path: String,
    /// Grid cell edge length in degrees used for heatmap aggregation.
    pub cell_size_deg: f64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every field has a default — `status` and `score` work without any
    /// environment at all.
    pub fn load() -> Result<Self> {
        let cell_size_deg = match env::var("BLOCKWATCH_CELL_SIZE") {
            Ok(raw) => {
                let parsed: f64 = raw.parse().map_err(|_| {
                    anyhow::anyhow!(
                        "BLOCKWATCH_CELL_SIZE is not a number: {raw:?}\n\
                         Expected a grid edge length in degrees, e.g. 0.005"
                    )
                })?;
                if !parsed.is_finite() || parsed <= 0.0 {
                    anyhow::bail!(
                        "BLOCKWATCH_CELL_SIZE must be a positive number, got {raw:?}"
                    );
                }
                parsed
            }
            Err(_) => DEFAULT_CELL_SIZE_DEG,
        };

        Ok(Self {
            input_csv: env::var("BLOCKWATCH_INPUT")
                .unwrap_or_else(|_| "crime_data_lapd.csv".to_string()),
            artifact_path: env::var("BLOCKWATCH_ARTIFACT")
                .unwrap_or_else(|_| "./cleaned_incidents.jsonl".to_string()),
            map_path: env::var("BLOCKWATCH_MAP")
                .unwrap_or_else(|_| "output/crime_heatmap.html".to_string()),
            cell_size_deg,
        })
    }

    /// Check that the raw CSV exists before starting a cleaning pass.
    pub fn require_input(&self, override_path: Option<&str>) -> Result<String> {
        let path = override_path.unwrap_or(&self.input_csv).to_string();
        if !Path::new(&path).exists() {
            anyhow::bail!(
                "Input CSV not found: {path}\n\
                 Download the incident export from the open-data portal, then\n\
                 either place it at that path or set BLOCKWATCH_INPUT in .env."
            );
        }
        Ok(path)
    }

    /// Check that the cleaned artifact exists.
    /// Call this before any operation that reads the clean-stage output.
    pub fn require_artifact(&self) -> Result<()> {
        if !Path::new(&self.artifact_path).exists() {
            anyhow::bail!(
                "Cleaned artifact not found: {}\n\
                 Run `blockwatch clean` first to produce it.",
                self.artifact_path
            );
        }
        Ok(())
    }
}
