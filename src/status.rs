// System status display — artifact freshness, row counts, configured paths.

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::dataset::artifact;

/// Display pipeline status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    println!("Input CSV: {}", describe_file(&config.input_csv));

    if !Path::new(&config.artifact_path).exists() {
        println!("Artifact:  not yet built");
        println!("\nRun `blockwatch clean` to produce the cleaned artifact.");
        return Ok(());
    }

    let stats = artifact::stats(&config.artifact_path)?;
    println!(
        "Artifact:  {} ({}, {} rows)",
        config.artifact_path,
        format_bytes(stats.file_bytes),
        stats.rows
    );

    match (stats.first_date, stats.last_date) {
        (Some(first), Some(last)) => println!("Coverage:  {first} to {last}"),
        _ => println!("Coverage:  no dated rows"),
    }

    if Path::new(&config.map_path).exists() {
        let map_size = std::fs::metadata(&config.map_path)
            .map(|m| format_bytes(m.len()))
            .unwrap_or_else(|_| "unknown".to_string());
        println!("Heatmap:   {} ({})", config.map_path, map_size);
    } else {
        println!("Heatmap:   not yet rendered");
        println!("  Run `blockwatch map` to render it");
    }

    Ok(())
}

fn describe_file(path: &str) -> String {
    if Path::new(path).exists() {
        let size = std::fs::metadata(path)
            .map(|m| format_bytes(m.len()))
            .unwrap_or_else(|_| "unknown".to_string());
        format!("{path} ({size})")
    } else {
        format!("{path} (missing)")
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
