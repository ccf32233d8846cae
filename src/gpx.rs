use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::place::Place;
use crate::Result;

const CREATOR: &str = "Park4Night Extractor";

/// Renders the places that have coordinates as GPX 1.1 waypoints, in input order.
///
/// Coordinates go out exactly as scraped. Text is written as is, without XML escaping.
pub fn render_gpx(places: &[Place], folder_name: &str, time: DateTime<Utc>) -> String {
    let waypoints = places
        .iter()
        .filter_map(|place| {
            let coordinates = place.coordinates.as_ref()?;
            Some(format!(
                "    <wpt lat=\"{}\" lon=\"{}\">\n        <name>{}</name>\n        <desc>{}</desc>\n    </wpt>",
                coordinates.lat,
                coordinates.lng,
                place.name.as_deref().unwrap_or_default(),
                place.description.as_deref().unwrap_or_default(),
            ))
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="{CREATOR}" xmlns="http://www.topografix.com/GPX/1/1">
    <metadata>
        <name>{folder_name}</name>
        <time>{time}</time>
    </metadata>
{waypoints}
</gpx>"#,
        time = time.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

/// Writes the GPX document to `path`, replacing whatever was there.
pub async fn write_gpx(places: &[Place], folder_name: &str, path: &Path) -> Result<()> {
    let content = render_gpx(places, folder_name, Utc::now());
    tokio::fs::write(path, content).await?;
    Ok(())
}

/// Lower-cased file stem: punctuation dropped, whitespace and dash runs become `_`.
pub fn sanitize_filename(name: &str) -> Result<String> {
    let stripped = Regex::new(r"[^\w\s-]")?.replace_all(name, "");
    let joined = Regex::new(r"[-\s]+")?.replace_all(stripped.trim(), "_");
    Ok(joined.to_lowercase())
}

/// Output file inside `output_dir`. An empty answer falls back to the folder name.
pub fn resolve_output_path(output_dir: &Path, answer: &str, folder_name: &str) -> Result<PathBuf> {
    let answer = answer.trim();
    let mut file_name = if answer.is_empty() {
        default_file_name(folder_name)?
    } else {
        answer.to_string()
    };
    if !file_name.to_lowercase().ends_with(".gpx") {
        file_name.push_str(".gpx");
    }
    Ok(output_dir.join(file_name))
}

pub fn default_file_name(folder_name: &str) -> Result<String> {
    Ok(format!("{}.gpx", sanitize_filename(folder_name)?))
}
