// The cleaning pass — per-record validation and normalization.
//
// The raw export carries a vestigial midnight time on every occurrence date,
// single-letter victim codes, and 0,0 coordinates for unknown locations.
// Cleaning parses the date (discarding the time), expands the codes, and
// drops rows that cannot be placed on a map or a calendar. The pipeline
// module drives file I/O; everything here is per-record and pure.

use chrono::{NaiveDate, NaiveDateTime};

use super::records::{expand_descent, expand_sex, Incident, RawIncident};

/// Why a raw row was dropped during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Occurrence date missing or unparseable.
    BadDate,
    /// Coordinates missing, non-finite, or the portal's 0,0 placeholder.
    MissingCoords,
}

/// Counters for a full cleaning pass. Printed as the stage summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct CleanSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub dropped_bad_date: usize,
    pub dropped_missing_coords: usize,
    /// Rows the CSV reader could not deserialize at all.
    pub dropped_malformed: usize,
}

impl CleanSummary {
    pub fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::BadDate => self.dropped_bad_date += 1,
            DropReason::MissingCoords => self.dropped_missing_coords += 1,
        }
    }

    pub fn dropped_total(&self) -> usize {
        self.dropped_bad_date + self.dropped_missing_coords + self.dropped_malformed
    }
}

/// Parse an occurrence date, discarding the export's time-of-day suffix.
///
/// Accepts "01/08/2023 12:00:00 AM" (the portal format), bare "01/08/2023",
/// and ISO "2023-01-08" so re-cleaned artifacts keep working.
pub fn parse_occurrence_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%m/%d/%Y %I:%M:%S %p") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Some(d);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Clean a single raw row, or report why it must be dropped.
pub fn clean_record(raw: RawIncident) -> Result<Incident, DropReason> {
    let date_occurred = parse_occurrence_date(&raw.date_occurred).ok_or(DropReason::BadDate)?;

    let (lat, lon) = match (raw.lat, raw.lon) {
        (Some(lat), Some(lon)) if usable_coords(lat, lon) => (lat, lon),
        _ => return Err(DropReason::MissingCoords),
    };

    Ok(Incident {
        date_occurred,
        area_name: raw.area_name.trim().to_string(),
        description: raw.description.trim().to_string(),
        victim_age: raw.victim_age.filter(|age| *age > 0),
        victim_sex: expand_sex(raw.victim_sex.as_deref()).to_string(),
        victim_descent: expand_descent(raw.victim_descent.as_deref()).to_string(),
        premise: non_empty(raw.premise),
        weapon: non_empty(raw.weapon),
        lat,
        lon,
    })
}

/// The export writes 0,0 for incidents it could not geocode.
fn usable_coords(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && !(lat == 0.0 && lon == 0.0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
