// Spatial aggregation — snapping incidents to grid cells for the heatmap.
//
// Rendering every incident individually drowns the map in markers, so
// incidents are folded into square cells (default edge 0.005 degrees,
// roughly 500 m). Each cell carries its incident count and mean severity;
// the heat weight combines both so a cell of many serious incidents burns
// hotter than one of many petty ones.

use std::collections::HashMap;

use crate::severity::Severity;

/// One aggregated heatmap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Cell-center latitude (snapped).
    pub lat: f64,
    /// Cell-center longitude (snapped).
    pub lon: f64,
    pub count: usize,
    /// Mean severity level of the cell's incidents, in [1, 5].
    pub mean_severity: f64,
    /// Normalized heat weight in (0, 1]; the hottest cell is exactly 1.
    pub weight: f64,
}

/// Snap a coordinate to the center of its grid cell.
pub fn snap(coord: f64, cell_size: f64) -> f64 {
    (coord / cell_size).round() * cell_size
}

/// Aggregate scored points into grid cells.
///
/// Cells are returned hottest first; ties break on coordinates so the
/// output is deterministic for a given input set.
pub fn aggregate(points: &[(f64, f64, Severity)], cell_size: f64) -> Vec<GridCell> {
    // Key on integer cell indices — f64 keys don't hash
    let mut cells: HashMap<(i64, i64), (usize, u64)> = HashMap::new();
    for (lat, lon, severity) in points {
        let key = (
            (lat / cell_size).round() as i64,
            (lon / cell_size).round() as i64,
        );
        let entry = cells.entry(key).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += severity.level() as u64;
    }

    let mut aggregated: Vec<GridCell> = cells
        .into_iter()
        .map(|((lat_idx, lon_idx), (count, severity_sum))| {
            let mean_severity = severity_sum as f64 / count as f64;
            GridCell {
                lat: lat_idx as f64 * cell_size,
                lon: lon_idx as f64 * cell_size,
                count,
                mean_severity,
                // Raw heat before normalization below
                weight: count as f64 * mean_severity,
            }
        })
        .collect();

    let max_weight = aggregated.iter().map(|c| c.weight).fold(0.0, f64::max);
    if max_weight > 0.0 {
        for cell in &mut aggregated {
            cell.weight /= max_weight;
        }
    }

    aggregated.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.lat.partial_cmp(&b.lat).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a.lon.partial_cmp(&b.lon).unwrap_or(std::cmp::Ordering::Equal))
    });

    aggregated
}

/// Geographic center of a set of cells, for centering the rendered map.
pub fn center(cells: &[GridCell]) -> Option<(f64, f64)> {
    if cells.is_empty() {
        return None;
    }
    let n = cells.len() as f64;
    let lat = cells.iter().map(|c| c.lat).sum::<f64>() / n;
    let lon = cells.iter().map(|c| c.lon).sum::<f64>() / n;
    Some((lat, lon))
}
