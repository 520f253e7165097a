// Composition tests — verifying that the stages chain together correctly.
//
// These tests exercise the data flow between modules:
//   raw record -> cleaner -> artifact -> scorer -> grid -> HTML
// using tempfile-backed paths for the file handoffs.

use blockwatch::config::Config;
use blockwatch::dataset::artifact::{self, ArtifactWriter};
use blockwatch::dataset::cleaner::clean_record;
use blockwatch::dataset::records::RawIncident;
use blockwatch::grid;
use blockwatch::output::html::{generate_heatmap, MapMeta};
use blockwatch::pipeline;
use blockwatch::severity::lexicon::SeverityLexicon;
use blockwatch::severity::scorer::LexiconScorer;
use blockwatch::severity::Severity;
use std::io::Write;

fn raw(date: &str, description: &str, lat: f64, lon: f64) -> RawIncident {
    RawIncident {
        date_occurred: date.to_string(),
        area_name: "Central".to_string(),
        description: description.to_string(),
        victim_age: Some(30),
        victim_sex: Some("F".to_string()),
        victim_descent: Some("W".to_string()),
        premise: Some("STREET".to_string()),
        weapon: None,
        lat: Some(lat),
        lon: Some(lon),
    }
}

// ============================================================
// Chain: cleaner -> artifact -> scorer -> grid -> HTML
// ============================================================

#[test]
fn cleaned_records_flow_through_to_a_rendered_page() {
    let dir = tempfile::tempdir().unwrap();
    let artifact_path = dir.path().join("incidents.jsonl");
    let artifact_path = artifact_path.to_str().unwrap();

    // Clean a mixed batch: two good rows, one unmappable
    let rows = vec![
        raw("01/10/2022 12:00:00 AM", "ROBBERY", 34.0522, -118.2437),
        raw("02/14/2022 12:00:00 AM", "VANDALISM - MISDEAMEANOR", 34.1016, -118.3267),
        raw("03/01/2022 12:00:00 AM", "ARSON", 0.0, 0.0),
    ];

    let mut writer = ArtifactWriter::create(artifact_path).unwrap();
    let mut written = 0;
    for row in rows {
        if let Ok(incident) = clean_record(row) {
            writer.append(&incident).unwrap();
            written += 1;
        }
    }
    assert_eq!(writer.finish().unwrap(), written);
    assert_eq!(written, 2);

    // Read back and score
    let incidents = artifact::read_incidents(artifact_path).unwrap();
    let scorer = LexiconScorer::new(SeverityLexicon::default());
    let scores = scorer.score_unique(incidents.iter().map(|i| i.description.as_str()));

    assert_eq!(scores["robbery"], Severity::Serious);
    assert_eq!(scores["vandalism - misdeameanor"], Severity::Low);

    // Aggregate and render
    let points: Vec<(f64, f64, Severity)> = incidents
        .iter()
        .map(|i| (i.lat, i.lon, scores[&i.description.to_lowercase()]))
        .collect();
    let cells = grid::aggregate(&points, 0.005);
    assert_eq!(cells.len(), 2);

    let meta = MapMeta {
        title: "Test Heatmap".to_string(),
        incident_count: points.len(),
        generated_at: "2024-01-01 00:00 UTC".to_string(),
    };
    let page = generate_heatmap(&cells, &meta).unwrap();
    assert!(page.contains("L.heatLayer"));
    assert!(page.contains("2 incidents"));
}

// ============================================================
// Full pipeline: clean::run then map::run over one config
// ============================================================

#[test]
fn clean_then_map_produces_the_html_artifact() {
    let dir = tempfile::tempdir().unwrap();

    // Write a small raw export in the portal's column layout
    let input_path = dir.path().join("raw.csv");
    let mut file = std::fs::File::create(&input_path).unwrap();
    writeln!(
        file,
        "DR_NO,Date Rptd,DATE OCC,TIME OCC,AREA,AREA NAME,Rpt Dist No,Part 1-2,Crm Cd,Crm Cd Desc,Mocodes,Vict Age,Vict Sex,Vict Descent,Premis Cd,Premis Desc,Weapon Used Cd,Weapon Desc,Status,Status Desc,Crm Cd 1,Crm Cd 2,Crm Cd 3,Crm Cd 4,LOCATION,Cross Street,LAT,LON"
    )
    .unwrap();
    writeln!(
        file,
        "1,01/01/2022,01/01/2022 12:00:00 AM,1200,1,Central,101,1,110,CRIMINAL HOMICIDE,,34,M,B,101,STREET,200,HANDGUN,IC,Invest Cont,110,,,,100 MAIN ST,,34.0522,-118.2437"
    )
    .unwrap();
    writeln!(
        file,
        "2,02/01/2022,02/01/2022 12:00:00 AM,0800,1,Central,101,1,740,VANDALISM - FELONY,,0,X,X,101,ALLEY,,,IC,Invest Cont,740,,,,200 SPRING ST,,34.0524,-118.2440"
    )
    .unwrap();

    let config = Config {
        input_csv: input_path.to_str().unwrap().to_string(),
        artifact_path: dir.path().join("incidents.jsonl").to_str().unwrap().to_string(),
        map_path: dir.path().join("out/heatmap.html").to_str().unwrap().to_string(),
        cell_size_deg: 0.005,
    };

    let clean_summary = pipeline::clean::run(&config, None).unwrap();
    assert_eq!(clean_summary.rows_written, 2);
    assert_eq!(clean_summary.dropped_total(), 0);

    let map_summary = pipeline::map::run(&config, &pipeline::map::MapOptions::default()).unwrap();
    assert_eq!(map_summary.incidents_mapped, 2);
    // Both rows land in the same 0.005-degree cell
    assert_eq!(map_summary.cells, 1);

    let page = std::fs::read_to_string(&config.map_path).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("L.heatLayer"));
}
