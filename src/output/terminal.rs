// Colored terminal output for stage summaries and scoring breakdowns.
//
// This module handles all terminal-specific formatting: colors, tables,
// band coloring. The main.rs command bodies delegate here.

use colored::Colorize;

use crate::dataset::cleaner::CleanSummary;
use crate::pipeline::map::MapSummary;
use crate::severity::scorer::SeverityAssessment;
use crate::severity::Severity;

/// Display the cleaning-pass summary.
pub fn display_clean_summary(summary: &CleanSummary, artifact_path: &str) {
    println!("\n{}", "=== Cleaning Summary ===".bold());
    println!("  Rows read:    {}", summary.rows_read);
    println!("  Rows written: {}", summary.rows_written);

    if summary.dropped_total() > 0 {
        println!("  Dropped:      {}", summary.dropped_total());
        if summary.dropped_bad_date > 0 {
            println!("    bad date:        {}", summary.dropped_bad_date);
        }
        if summary.dropped_missing_coords > 0 {
            println!("    missing coords:  {}", summary.dropped_missing_coords);
        }
        if summary.dropped_malformed > 0 {
            println!("    malformed rows:  {}", summary.dropped_malformed);
        }
    }

    println!("\nArtifact written to: {}", artifact_path.bold());
    println!("{}", "Next step: blockwatch map".dimmed());
}

/// Display the map-stage summary.
pub fn display_map_summary(summary: &MapSummary) {
    println!("\n{}", "=== Heatmap Summary ===".bold());
    println!("  Incidents in artifact: {}", summary.incidents_total);
    println!("  Incidents mapped:      {}", summary.incidents_mapped);
    println!("  Distinct labels:       {}", summary.distinct_descriptions);
    println!("  Grid cells:            {}", summary.cells);
    println!("\nHeatmap written to: {}", summary.output_path.bold());
}

/// Display a single description's scoring breakdown.
pub fn display_assessment(description: &str, assessment: &SeverityAssessment) {
    println!(
        "\n{}",
        format!("=== Severity for \"{}\" ===", super::truncate_chars(description, 60)).bold()
    );

    println!(
        "  Assigned band: {} (level {})",
        colorize_severity(assessment.severity),
        assessment.severity.level()
    );
    if assessment.floored {
        println!(
            "  {}",
            "Best match fell below the confidence floor — defaulted to Minor.".dimmed()
        );
    }

    println!("\n  {:<10} {:>10}  Closest exemplar", "Band".dimmed(), "Similarity".dimmed());
    println!("  {}", "-".repeat(48).dimmed());
    for band_match in &assessment.band_matches {
        let marker = if band_match.severity == assessment.severity && !assessment.floored {
            "->"
        } else {
            "  "
        };
        println!(
            "{} {:<10} {:>10.2}  {}",
            marker,
            colorize_severity(band_match.severity),
            band_match.similarity,
            band_match.exemplar.dimmed()
        );
    }
}

/// Colorize a severity band.
pub fn colorize_severity(severity: Severity) -> colored::ColoredString {
    let name = severity.as_str();
    match severity {
        Severity::Severe => name.red().bold(),
        Severity::Serious => name.bright_red(),
        Severity::Moderate => name.yellow(),
        Severity::Low => name.cyan(),
        Severity::Minor => name.green(),
    }
}
