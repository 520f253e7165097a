// The severity lexicon — reference exemplars for each band.
//
// Each band is anchored by a handful of exemplar phrases. A description is
// assigned the band whose exemplars it most resembles. The default set
// covers the common LAPD incident vocabulary; callers can supply their own
// for other jurisdictions.

use super::Severity;

/// Reference exemplars per severity band.
pub struct SeverityLexicon {
    entries: Vec<(Severity, Vec<&'static str>)>,
}

impl Default for SeverityLexicon {
    fn default() -> Self {
        Self {
            entries: vec![
                (
                    Severity::Severe,
                    vec![
                        "murder",
                        "homicide",
                        "rape",
                        "sexual",
                        "kidnap",
                        "child abuse",
                        "arson",
                    ],
                ),
                (
                    Severity::Serious,
                    vec![
                        "robbery",
                        "weapon",
                        "assault",
                        "intimate partner",
                        "battery",
                        "shots fired",
                    ],
                ),
                (Severity::Moderate, vec!["burglary", "stolen", "theft", "break"]),
                (
                    Severity::Low,
                    vec![
                        "vandalism",
                        "threat",
                        "trespassing",
                        "forge",
                        "fraud",
                        "shoplifting",
                        "stalking",
                    ],
                ),
                (Severity::Minor, vec!["disturb", "drunk", "minor", "petty"]),
            ],
        }
    }
}

impl SeverityLexicon {
    /// Build a lexicon from explicit band/exemplar pairs.
    pub fn new(entries: Vec<(Severity, Vec<&'static str>)>) -> Self {
        Self { entries }
    }

    /// Bands and their exemplars, highest band first.
    pub fn bands(&self) -> &[(Severity, Vec<&'static str>)] {
        &self.entries
    }
}
