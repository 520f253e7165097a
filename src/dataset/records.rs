// Incident records — the types that flow through the pipeline.
//
// `RawIncident` is a typed view of the open-data CSV: only the columns we
// keep are named here, so the export's administrative columns (record
// numbers, report districts, crime codes, MO codes, status codes) are
// dropped by never being deserialized. `Incident` is the cleaned record
// that lands in the artifact.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the raw LAPD-style incident export.
///
/// Coordinates and victim fields are optional because the portal emits
/// empty cells for unknown values.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIncident {
    /// Occurrence date with a vestigial midnight time component,
    /// e.g. "01/08/2023 12:00:00 AM".
    #[serde(rename = "DATE OCC")]
    pub date_occurred: String,
    #[serde(rename = "AREA NAME")]
    pub area_name: String,
    /// Free-text crime-type label, e.g. "BURGLARY FROM VEHICLE".
    #[serde(rename = "Crm Cd Desc")]
    pub description: String,
    #[serde(rename = "Vict Age", default)]
    pub victim_age: Option<i32>,
    #[serde(rename = "Vict Sex", default)]
    pub victim_sex: Option<String>,
    #[serde(rename = "Vict Descent", default)]
    pub victim_descent: Option<String>,
    #[serde(rename = "Premis Desc", default)]
    pub premise: Option<String>,
    #[serde(rename = "Weapon Desc", default)]
    pub weapon: Option<String>,
    #[serde(rename = "LAT", default)]
    pub lat: Option<f64>,
    #[serde(rename = "LON", default)]
    pub lon: Option<f64>,
}

/// A cleaned incident — what the clean stage writes and the map stage reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub date_occurred: NaiveDate,
    pub area_name: String,
    pub description: String,
    pub victim_age: Option<i32>,
    pub victim_sex: String,
    pub victim_descent: String,
    pub premise: Option<String>,
    pub weapon: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Incident {
    pub fn year(&self) -> i32 {
        use chrono::Datelike;
        self.date_occurred.year()
    }
}

/// Expand a single-letter victim sex code to a word.
pub fn expand_sex(code: Option<&str>) -> &'static str {
    match code.map(str::trim) {
        Some("F") => "Female",
        Some("M") => "Male",
        _ => "Unknown",
    }
}

/// Expand a single-letter victim descent code using the LAPD code table.
pub fn expand_descent(code: Option<&str>) -> &'static str {
    match code.map(str::trim) {
        Some("A") => "Other Asian",
        Some("B") => "Black",
        Some("C") => "Chinese",
        Some("D") => "Cambodian",
        Some("F") => "Filipino",
        Some("G") => "Guamanian",
        Some("H") => "Hispanic/Latin/Mexican",
        Some("I") => "American Indian/Alaskan Native",
        Some("J") => "Japanese",
        Some("K") => "Korean",
        Some("L") => "Laotian",
        Some("O") => "Other",
        Some("P") => "Pacific Islander",
        Some("S") => "Samoan",
        Some("U") => "Hawaiian",
        Some("V") => "Vietnamese",
        Some("W") => "White",
        Some("Z") => "Asian Indian",
        _ => "Unknown",
    }
}
