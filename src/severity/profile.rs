// SeverityProfile — the dataset-level view of the scoring output.
//
// For each band: how many incidents landed there, the share of the whole
// dataset, and the TF-IDF keywords that distinguish that band's
// descriptions. Each distinct description is treated as a document for IDF,
// so labels common to every band get downweighted and band-specific
// vocabulary rises to the top.

use std::collections::HashMap;

use anyhow::Result;
use colored::Colorize;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};

use super::scorer::LexiconScorer;
use super::Severity;
use crate::dataset::records::Incident;

/// One band's slice of the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandSummary {
    pub severity: Severity,
    pub count: usize,
    /// Fraction of all incidents in this band (0.0 to 1.0).
    pub share: f64,
    /// Top distinguishing keywords for this band's descriptions.
    pub keywords: Vec<String>,
}

/// A complete severity profile for a cleaned dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityProfile {
    /// One summary per band, highest band first.
    pub bands: Vec<BandSummary>,
    pub incident_count: usize,
}

/// Score every incident and fold the results into a profile.
pub fn build_profile(incidents: &[Incident], scorer: &LexiconScorer) -> Result<SeverityProfile> {
    if incidents.is_empty() {
        anyhow::bail!("No incidents to profile — run `blockwatch clean` on a non-empty export");
    }

    let scores = scorer.score_unique(incidents.iter().map(|i| i.description.as_str()));

    let mut counts: HashMap<Severity, usize> = HashMap::new();
    let mut documents: HashMap<Severity, Vec<String>> = HashMap::new();
    for incident in incidents {
        let severity = scores
            .get(&incident.description.to_lowercase())
            .copied()
            .unwrap_or(Severity::Minor);
        *counts.entry(severity).or_insert(0) += 1;
        documents
            .entry(severity)
            .or_default()
            .push(incident.description.to_lowercase());
    }

    let stop_words: Vec<String> = get(LANGUAGE::English);
    let total = incidents.len();

    let bands = Severity::descending()
        .iter()
        .map(|severity| {
            let count = counts.get(severity).copied().unwrap_or(0);
            let keywords = documents
                .get(severity)
                .map(|docs| top_keywords(docs, &stop_words, 6))
                .unwrap_or_default();
            BandSummary {
                severity: *severity,
                count,
                share: count as f64 / total as f64,
                keywords,
            }
        })
        .collect();

    Ok(SeverityProfile {
        bands,
        incident_count: total,
    })
}

/// Rank a band's descriptions with TF-IDF and keep the top keywords.
fn top_keywords(documents: &[String], stop_words: &[String], top_n: usize) -> Vec<String> {
    if documents.is_empty() {
        return Vec::new();
    }

    let params = TfIdfParams::UnprocessedDocuments(documents, stop_words, None);
    let tfidf = TfIdf::new(params);
    tfidf
        .get_ranked_word_scores(top_n)
        .into_iter()
        .map(|(word, _score)| word)
        .collect()
}

impl SeverityProfile {
    /// Display the profile as a formatted bar chart in the terminal.
    pub fn display(&self) {
        println!(
            "\n{}",
            format!(
                "=== Severity Profile ({} incidents) ===",
                self.incident_count
            )
            .bold()
        );
        println!();

        let bar_width: usize = 24;

        for band in &self.bands {
            let filled = (band.share * bar_width as f64).round() as usize;
            let empty = bar_width.saturating_sub(filled);
            let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

            let colored_bar = match band.severity {
                Severity::Severe => bar.red(),
                Severity::Serious => bar.bright_red(),
                Severity::Moderate => bar.yellow(),
                Severity::Low => bar.cyan(),
                Severity::Minor => bar.green(),
            };

            println!(
                "  {} {:<9} {} {:>5.1}%  ({} incidents)",
                band.severity.level(),
                band.severity.as_str().bold(),
                colored_bar,
                band.share * 100.0,
                band.count
            );

            if !band.keywords.is_empty() {
                println!("      Keywords: {}", band.keywords.join(", ").dimmed());
            }
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::lexicon::SeverityLexicon;
    use chrono::NaiveDate;

    fn incident(description: &str) -> Incident {
        Incident {
            date_occurred: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            area_name: "Central".to_string(),
            description: description.to_string(),
            victim_age: None,
            victim_sex: "Unknown".to_string(),
            victim_descent: "Unknown".to_string(),
            premise: None,
            weapon: None,
            lat: 34.0,
            lon: -118.2,
        }
    }

    #[test]
    fn test_profile_counts_and_shares() {
        let scorer = LexiconScorer::new(SeverityLexicon::default());
        let incidents = vec![
            incident("ROBBERY"),
            incident("ROBBERY"),
            incident("CRIMINAL HOMICIDE"),
            incident("VANDALISM"),
        ];

        let profile = build_profile(&incidents, &scorer).unwrap();
        assert_eq!(profile.incident_count, 4);
        assert_eq!(profile.bands.len(), 5);

        let serious = profile
            .bands
            .iter()
            .find(|b| b.severity == Severity::Serious)
            .unwrap();
        assert_eq!(serious.count, 2);
        assert!((serious.share - 0.5).abs() < f64::EPSILON);

        let share_sum: f64 = profile.bands.iter().map(|b| b.share).sum();
        assert!((share_sum - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_profile_bands_high_first() {
        let scorer = LexiconScorer::new(SeverityLexicon::default());
        let profile = build_profile(&[incident("ARSON")], &scorer).unwrap();
        let bands: Vec<Severity> = profile.bands.iter().map(|b| b.severity).collect();
        assert_eq!(bands, Severity::descending().to_vec());
    }

    #[test]
    fn test_profile_empty_fails() {
        let scorer = LexiconScorer::new(SeverityLexicon::default());
        assert!(build_profile(&[], &scorer).is_err());
    }

    #[test]
    fn test_empty_band_has_no_keywords() {
        let scorer = LexiconScorer::new(SeverityLexicon::default());
        let profile = build_profile(&[incident("ROBBERY")], &scorer).unwrap();
        let severe = profile
            .bands
            .iter()
            .find(|b| b.severity == Severity::Severe)
            .unwrap();
        assert_eq!(severe.count, 0);
        assert!(severe.keywords.is_empty());
    }
}
