// Static heatmap generation — a self-contained HTML file with a Leaflet map.
//
// The aggregated cells are inlined as a JSON array and fed to leaflet.heat,
// so the output opens in any browser with no server and no build step. The
// only external fetches are the Leaflet CSS/JS from the CDN.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::grid::{self, GridCell};
use crate::severity::Severity;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_HEAT_JS: &str = "https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js";

/// Context rendered into the page header and footer.
pub struct MapMeta {
    pub title: String,
    pub incident_count: usize,
    pub generated_at: String,
}

/// Generate the complete heatmap page.
pub fn generate_heatmap(cells: &[GridCell], meta: &MapMeta) -> Result<String> {
    let (center_lat, center_lon) = grid::center(cells)
        .ok_or_else(|| anyhow::anyhow!("No grid cells to render — nothing survived filtering"))?;

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n");
    page.push_str(&generate_head(meta));
    page.push_str("<body>\n");
    page.push_str(&generate_header(meta));
    page.push_str("<div id=\"map\"></div>\n");
    page.push_str(&generate_legend());
    page.push_str(&generate_script(cells, center_lat, center_lon)?);
    page.push_str("</body>\n</html>\n");

    Ok(page)
}

/// Generate the page and write it to `path`, creating parent directories.
pub fn write_heatmap(cells: &[GridCell], meta: &MapMeta, path: &str) -> Result<()> {
    let page = generate_heatmap(cells, meta)?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file =
        std::fs::File::create(path).with_context(|| format!("Failed to create {path}"))?;
    file.write_all(page.as_bytes())
        .with_context(|| format!("Failed to write {path}"))?;

    Ok(())
}

fn generate_head(meta: &MapMeta) -> String {
    let mut head = String::new();

    head.push_str("<head>\n<meta charset=\"utf-8\">\n");
    head.push_str(&format!("<title>{}</title>\n", meta.title));
    head.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\">\n"
    ));
    head.push_str(&format!("<script src=\"{LEAFLET_JS}\"></script>\n"));
    head.push_str(&format!("<script src=\"{LEAFLET_HEAT_JS}\"></script>\n"));
    head.push_str(
        "<style>\n\
         html, body { margin: 0; height: 100%; font-family: sans-serif; }\n\
         #map { height: calc(100% - 48px); }\n\
         header { height: 48px; display: flex; align-items: center; \
         justify-content: space-between; padding: 0 16px; box-sizing: border-box; \
         background: #1a1a1a; color: #eee; }\n\
         header small { color: #999; }\n\
         .legend { position: absolute; bottom: 24px; right: 12px; z-index: 1000; \
         background: rgba(255, 255, 255, 0.92); padding: 10px 14px; \
         border-radius: 4px; font-size: 12px; line-height: 1.7; }\n\
         .legend .swatch { display: inline-block; width: 12px; height: 12px; \
         margin-right: 6px; border-radius: 2px; vertical-align: middle; }\n\
         </style>\n</head>\n",
    );

    head
}

fn generate_header(meta: &MapMeta) -> String {
    format!(
        "<header><strong>{}</strong>\
         <small>{} incidents &middot; generated {}</small></header>\n",
        meta.title, meta.incident_count, meta.generated_at
    )
}

/// The legend explains what the heat means: cells are weighted by incident
/// count times mean severity, so color alone does not distinguish the two.
fn generate_legend() -> String {
    let mut legend = String::new();
    legend.push_str("<div class=\"legend\">\n<strong>Severity bands</strong><br>\n");

    for severity in Severity::descending() {
        let color = band_color(severity);
        legend.push_str(&format!(
            "<span class=\"swatch\" style=\"background:{color}\"></span>{} ({})<br>\n",
            severity.as_str(),
            severity.level()
        ));
    }

    legend.push_str("<small>Heat = incidents &times; mean severity</small>\n</div>\n");
    legend
}

fn generate_script(cells: &[GridCell], center_lat: f64, center_lon: f64) -> Result<String> {
    // [lat, lon, weight] triples — the shape leaflet.heat consumes directly
    let points: Vec<[f64; 3]> = cells.iter().map(|c| [c.lat, c.lon, c.weight]).collect();
    let payload = serde_json::to_string(&points).context("Failed to encode heat data")?;

    let mut script = String::new();
    script.push_str("<script>\n");
    script.push_str(&format!("const heat = {payload};\n"));
    script.push_str(&format!(
        "const map = L.map('map').setView([{center_lat:.5}, {center_lon:.5}], 11);\n"
    ));
    script.push_str(
        "L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {\n\
           maxZoom: 18,\n\
           attribution: '&copy; OpenStreetMap contributors'\n\
         }).addTo(map);\n",
    );
    script.push_str("L.heatLayer(heat, { radius: 18, blur: 14, maxZoom: 15 }).addTo(map);\n");
    script.push_str("</script>\n");

    Ok(script)
}

fn band_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Severe => "#b2182b",
        Severity::Serious => "#ef8a62",
        Severity::Moderate => "#fddbc7",
        Severity::Low => "#d1e5f0",
        Severity::Minor => "#67a9cf",
    }
}
