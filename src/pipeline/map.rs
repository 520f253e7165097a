// The map stage: cleaned artifact -> scored incidents -> grid -> HTML.
//
// Scoring runs once per distinct description, not per row — the export has
// millions of rows but only a few hundred labels.

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::dataset::artifact;
use crate::dataset::records::Incident;
use crate::grid;
use crate::output::html::{self, MapMeta};
use crate::severity::lexicon::SeverityLexicon;
use crate::severity::scorer::LexiconScorer;
use crate::severity::Severity;

/// Filters applied before aggregation.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapOptions {
    /// Inclusive lower bound on the occurrence year.
    pub from_year: Option<i32>,
    /// Inclusive upper bound on the occurrence year.
    pub to_year: Option<i32>,
    /// Drop incidents below this severity level (1-5).
    pub min_severity: Option<u8>,
}

/// Counters for the map stage, for display.
#[derive(Debug, Clone)]
pub struct MapSummary {
    pub incidents_total: usize,
    pub incidents_mapped: usize,
    pub distinct_descriptions: usize,
    pub cells: usize,
    pub output_path: String,
}

/// Run the map stage. Returns the summary for display.
pub fn run(config: &Config, options: &MapOptions) -> Result<MapSummary> {
    config.require_artifact()?;

    let incidents = artifact::read_incidents(&config.artifact_path)?;
    let incidents_total = incidents.len();
    info!(incidents = incidents_total, "Loaded cleaned artifact");

    if incidents_total == 0 {
        anyhow::bail!(
            "Artifact {} is empty.\n\
             Re-run `blockwatch clean` against the raw export.",
            config.artifact_path
        );
    }

    let in_year_range: Vec<&Incident> = incidents
        .iter()
        .filter(|i| {
            options.from_year.map_or(true, |from| i.year() >= from)
                && options.to_year.map_or(true, |to| i.year() <= to)
        })
        .collect();

    let scorer = LexiconScorer::new(SeverityLexicon::default());
    let scores = scorer.score_unique(in_year_range.iter().map(|i| i.description.as_str()));
    info!(distinct = scores.len(), "Scored distinct descriptions");

    let min_level = options.min_severity.unwrap_or(1);
    let points: Vec<(f64, f64, Severity)> = in_year_range
        .iter()
        .filter_map(|incident| {
            let severity = scores
                .get(&incident.description.to_lowercase())
                .copied()
                .unwrap_or(Severity::Minor);
            (severity.level() >= min_level).then_some((incident.lat, incident.lon, severity))
        })
        .collect();

    if points.is_empty() {
        anyhow::bail!(
            "No incidents left to map after filtering.\n\
             Loosen --from-year/--to-year or --min-severity and try again."
        );
    }

    let cells = grid::aggregate(&points, config.cell_size_deg);
    info!(
        incidents = points.len(),
        cells = cells.len(),
        cell_size = config.cell_size_deg,
        "Aggregated incidents into grid cells"
    );

    let meta = MapMeta {
        title: "Crime Severity Heatmap".to_string(),
        incident_count: points.len(),
        generated_at: chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
    };
    html::write_heatmap(&cells, &meta, &config.map_path)?;

    Ok(MapSummary {
        incidents_total,
        incidents_mapped: points.len(),
        distinct_descriptions: scores.len(),
        cells: cells.len(),
        output_path: config.map_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CELL_SIZE_DEG;
    use crate::dataset::artifact::ArtifactWriter;
    use chrono::NaiveDate;

    fn incident(year: i32, description: &str, lat: f64, lon: f64) -> Incident {
        Incident {
            date_occurred: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            area_name: "Central".to_string(),
            description: description.to_string(),
            victim_age: None,
            victim_sex: "Unknown".to_string(),
            victim_descent: "Unknown".to_string(),
            premise: None,
            weapon: None,
            lat,
            lon,
        }
    }

    fn config_with_artifact(
        dir: &std::path::Path,
        incidents: &[Incident],
    ) -> Config {
        let artifact_path = dir.join("incidents.jsonl").to_str().unwrap().to_string();
        let mut writer = ArtifactWriter::create(&artifact_path).unwrap();
        for incident in incidents {
            writer.append(incident).unwrap();
        }
        writer.finish().unwrap();

        Config {
            input_csv: "unused.csv".to_string(),
            artifact_path,
            map_path: dir.join("out/map.html").to_str().unwrap().to_string(),
            cell_size_deg: DEFAULT_CELL_SIZE_DEG,
        }
    }

    #[test]
    fn test_run_renders_heatmap() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_artifact(
            dir.path(),
            &[
                incident(2022, "ROBBERY", 34.0522, -118.2437),
                incident(2022, "ROBBERY", 34.0523, -118.2436),
                incident(2023, "VANDALISM", 34.10, -118.30),
            ],
        );

        let summary = run(&config, &MapOptions::default()).unwrap();
        assert_eq!(summary.incidents_total, 3);
        assert_eq!(summary.incidents_mapped, 3);
        assert_eq!(summary.distinct_descriptions, 2);
        assert_eq!(summary.cells, 2);

        let page = std::fs::read_to_string(&config.map_path).unwrap();
        assert!(page.contains("L.heatLayer"));
    }

    #[test]
    fn test_year_filter() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_artifact(
            dir.path(),
            &[
                incident(2019, "ROBBERY", 34.05, -118.24),
                incident(2022, "ROBBERY", 34.05, -118.24),
                incident(2024, "ROBBERY", 34.05, -118.24),
            ],
        );

        let options = MapOptions {
            from_year: Some(2020),
            to_year: Some(2023),
            min_severity: None,
        };
        let summary = run(&config, &options).unwrap();
        assert_eq!(summary.incidents_mapped, 1);
    }

    #[test]
    fn test_min_severity_filter() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_artifact(
            dir.path(),
            &[
                incident(2022, "CRIMINAL HOMICIDE", 34.05, -118.24),
                incident(2022, "DISTURBING THE PEACE", 34.10, -118.30),
            ],
        );

        let options = MapOptions {
            from_year: None,
            to_year: None,
            min_severity: Some(4),
        };
        let summary = run(&config, &options).unwrap();
        assert_eq!(summary.incidents_mapped, 1);
        assert_eq!(summary.cells, 1);
    }

    #[test]
    fn test_overfiltering_fails_with_guidance() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_artifact(
            dir.path(),
            &[incident(2022, "DISTURBING THE PEACE", 34.05, -118.24)],
        );

        let options = MapOptions {
            from_year: Some(1990),
            to_year: Some(1991),
            min_severity: None,
        };
        let err = run(&config, &options).unwrap_err();
        assert!(err.to_string().contains("No incidents left"));
    }

    #[test]
    fn test_missing_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            input_csv: "unused.csv".to_string(),
            artifact_path: dir.path().join("missing.jsonl").to_str().unwrap().to_string(),
            map_path: dir.path().join("map.html").to_str().unwrap().to_string(),
            cell_size_deg: DEFAULT_CELL_SIZE_DEG,
        };
        assert!(run(&config, &MapOptions::default()).is_err());
    }
}
