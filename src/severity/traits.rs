// Severity scorer trait — swap-ready abstraction.
//
// The default implementation matches descriptions against a keyword lexicon,
// but the seam lets a different similarity backend replace it without
// touching the pipeline.

use super::Severity;

/// Trait for assigning a severity band to an incident description.
pub trait SeverityScorer {
    /// Score one description. Must always return a band (scoring never
    /// fails; unrecognizable text falls back to the lowest band).
    fn score(&self, description: &str) -> Severity;
}
