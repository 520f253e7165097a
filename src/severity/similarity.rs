// Character-trigram similarity between descriptions and lexicon exemplars.
//
// Incident labels and exemplars rarely share exact word forms ("kidnap" vs
// "KIDNAPPING", "stolen" vs "STOLEN VEHICLE"). Comparing character trigrams
// of stop-word-filtered token windows tolerates those inflections while
// staying fully local: no model files, no network, deterministic output.
// Cosine similarity over the trigram counts is the core comparison.

use std::collections::{HashMap, HashSet};

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

/// Lowercases, strips non-letters, and removes English stop words.
///
/// Built once per scorer; the regex and stop-word set are reused across
/// every description.
pub struct Normalizer {
    strip: Regex,
    stop_words: HashSet<String>,
}

impl Normalizer {
    pub fn new() -> Self {
        let strip = Regex::new(r"[^a-z]+").unwrap();
        let stop_words: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
        Self { strip, stop_words }
    }

    /// Tokenize a description: lowercase, split on non-letter runs, drop
    /// stop words and empty fragments.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.strip
            .split(&lower)
            .filter(|t| !t.is_empty() && !self.stop_words.contains(*t))
            .map(|t| t.to_string())
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Count character trigrams of `text`, padded with a leading and trailing
/// space so word boundaries participate in matching.
pub fn trigram_counts(text: &str) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    if text.is_empty() {
        return counts;
    }

    let padded = format!(" {text} ");
    let chars: Vec<char> = padded.chars().collect();
    for window in chars.windows(3) {
        let gram: String = window.iter().collect();
        *counts.entry(gram).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity between two trigram count vectors.
///
/// Returns 0.0 to 1.0. Empty vectors score 0.0 rather than erroring —
/// an unmatchable description simply has no similarity.
pub fn cosine_from_counts(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(gram, va)| b.get(gram).map(|vb| va * vb))
        .sum();
    let mag_a: f64 = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let mag_b: f64 = b.values().map(|v| v * v).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// Best similarity between an exemplar and any token window of a description.
///
/// The window size matches the exemplar's token count, so a two-word
/// exemplar like "child abuse" is compared against two-word slices of the
/// description rather than the whole string.
pub fn best_window_similarity(
    exemplar_trigrams: &HashMap<String, f64>,
    exemplar_tokens: usize,
    description_tokens: &[String],
) -> f64 {
    if description_tokens.is_empty() || exemplar_trigrams.is_empty() {
        return 0.0;
    }

    let window = exemplar_tokens.clamp(1, description_tokens.len());
    let mut best: f64 = 0.0;
    for slice in description_tokens.windows(window) {
        let sim = cosine_from_counts(exemplar_trigrams, &trigram_counts(&slice.join(" ")));
        if sim > best {
            best = sim;
        }
    }
    best
}
