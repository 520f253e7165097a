// The lexicon scorer — argmax over bands with a confidence floor.
//
// A description is compared against every exemplar; the band holding the
// most similar exemplar wins. Below the confidence floor the match is
// considered noise and the description falls back to Minor. Ties go to the
// higher band (bands are scanned highest first with a strict comparison).

use std::collections::HashMap;

use super::lexicon::SeverityLexicon;
use super::similarity::{best_window_similarity, trigram_counts, Normalizer};
use super::traits::SeverityScorer;
use super::Severity;

/// Best similarity below this is treated as "no real match" and the
/// description scores Minor.
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 0.3;

/// The best exemplar match within one band.
#[derive(Debug, Clone)]
pub struct BandMatch {
    pub severity: Severity,
    pub exemplar: String,
    pub similarity: f64,
}

/// Full scoring breakdown for one description.
#[derive(Debug, Clone)]
pub struct SeverityAssessment {
    /// The assigned band after applying the confidence floor.
    pub severity: Severity,
    /// The best similarity across all bands.
    pub confidence: f64,
    /// Whether the confidence floor forced the Minor fallback.
    pub floored: bool,
    /// Best match per band, highest band first.
    pub band_matches: Vec<BandMatch>,
}

struct Exemplar {
    text: String,
    token_count: usize,
    trigrams: HashMap<String, f64>,
}

/// Scores descriptions against a `SeverityLexicon`.
///
/// Exemplar trigram vectors are precomputed at construction; scoring a
/// description is then allocation-light and fast enough to run over every
/// distinct label in a multi-million-row export.
pub struct LexiconScorer {
    bands: Vec<(Severity, Vec<Exemplar>)>,
    normalizer: Normalizer,
    confidence_floor: f64,
}

impl LexiconScorer {
    pub fn new(lexicon: SeverityLexicon) -> Self {
        Self::with_floor(lexicon, DEFAULT_CONFIDENCE_FLOOR)
    }

    pub fn with_floor(lexicon: SeverityLexicon, confidence_floor: f64) -> Self {
        let normalizer = Normalizer::new();
        let bands = lexicon
            .bands()
            .iter()
            .map(|(severity, exemplars)| {
                let prepared = exemplars
                    .iter()
                    .map(|text| {
                        let tokens = normalizer.tokens(text);
                        Exemplar {
                            text: text.to_string(),
                            token_count: tokens.len().max(1),
                            trigrams: trigram_counts(&tokens.join(" ")),
                        }
                    })
                    .collect();
                (*severity, prepared)
            })
            .collect();

        Self {
            bands,
            normalizer,
            confidence_floor,
        }
    }

    /// Score one description with the full per-band breakdown.
    pub fn assess(&self, description: &str) -> SeverityAssessment {
        let tokens = self.normalizer.tokens(description);

        let mut band_matches = Vec::with_capacity(self.bands.len());
        let mut best_band = Severity::Minor;
        let mut best_similarity: f64 = 0.0;

        for (severity, exemplars) in &self.bands {
            let mut band_best: f64 = 0.0;
            let mut band_exemplar = exemplars
                .first()
                .map(|e| e.text.clone())
                .unwrap_or_default();

            for exemplar in exemplars {
                let sim =
                    best_window_similarity(&exemplar.trigrams, exemplar.token_count, &tokens);
                if sim > band_best {
                    band_best = sim;
                    band_exemplar = exemplar.text.clone();
                }
            }

            // Strict comparison: on an exact tie the earlier (higher) band wins
            if band_best > best_similarity {
                best_similarity = band_best;
                best_band = *severity;
            }

            band_matches.push(BandMatch {
                severity: *severity,
                exemplar: band_exemplar,
                similarity: band_best,
            });
        }

        let floored = best_similarity <= self.confidence_floor;
        let severity = if floored { Severity::Minor } else { best_band };

        SeverityAssessment {
            severity,
            confidence: best_similarity,
            floored,
            band_matches,
        }
    }

    /// Score each distinct description once (case-insensitive), returning a
    /// lowercase-keyed memo map for attaching severities to incident rows.
    pub fn score_unique<'a, I>(&self, descriptions: I) -> HashMap<String, Severity>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut scores = HashMap::new();
        for description in descriptions {
            let key = description.to_lowercase();
            if !scores.contains_key(&key) {
                let severity = self.assess(description).severity;
                scores.insert(key, severity);
            }
        }
        scores
    }
}

impl SeverityScorer for LexiconScorer {
    fn score(&self, description: &str) -> Severity {
        self.assess(description).severity
    }
}
