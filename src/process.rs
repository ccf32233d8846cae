use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;

use crate::bookmarks::{choose_folder, list_folders};
use crate::config::Config;
use crate::credential::resolve_session;
use crate::gpx::{default_file_name, resolve_output_path, write_gpx};
use crate::parse::parse_place;
use crate::place::Place;
use crate::prompt::Prompt;
use crate::request::Site;
use crate::{info_time, warn_time, Result};

/// Pause between two place requests.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    delay: Duration,
}

impl Pacing {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl From<&Config> for Pacing {
    fn from(config: &Config) -> Self {
        Self::new(config.request_delay)
    }
}

/// Fetches and parses one place. Failures are logged and yield `None`.
pub async fn fetch_place(site: &dyn Site, config: &Config, id: &str) -> Option<Place> {
    let html = match site.fetch_place_page(id).await {
        Ok(html) => html,
        Err(e) => {
            warn_time!("Error fetching place {id}: {e}");
            return None;
        }
    };
    Some(parse_place(id, &html, &config.place_url(id)))
}

/// Fetches every id in order, one at a time, pausing between requests.
/// Places that fail to load are skipped.
pub async fn process_all(
    site: &dyn Site,
    config: &Config,
    pacing: Pacing,
    ids: &[String],
) -> Vec<Place> {
    let total = ids.len();
    let mut places = Vec::with_capacity(total);

    info_time!("Processing {} bookmarks...", total);
    for (i, id) in ids.iter().enumerate() {
        info_time!("Processing place {}/{}: {}", i + 1, total, id);

        if let Some(place) = fetch_place(site, config, id).await {
            places.push(place);
        }

        if i + 1 < total {
            pacing.pause().await;
        }
    }
    places
}

/// One full export: session, folder choice, scraping and the GPX file.
///
/// Returns the written path, or `None` when no place could be processed.
/// Errors from the bookmark listing end the run.
pub async fn process_site(
    config: &Config,
    site: &dyn Site,
    pacing: Pacing,
    prompt: &mut dyn Prompt,
) -> Result<Option<PathBuf>> {
    let start_time = Local::now();

    let session = resolve_session(config, prompt)?;
    let folders = list_folders(site, &session).await?;
    let (ids, folder_name) = choose_folder(prompt, &folders)?;

    let places = process_all(site, config, pacing, &ids).await;
    info_time!(start_time, "Finished processing {} of {} places.", places.len(), ids.len());
    if places.is_empty() {
        prompt.tell("\nNo places were successfully processed.");
        return Ok(None);
    }

    tokio::fs::create_dir_all(&config.output_dir).await?;
    let default_name = default_file_name(&folder_name)?;
    let answer = prompt.ask(&format!("\nEnter GPX file name (default: {default_name}): "))?;
    let path = resolve_output_path(&config.output_dir, &answer, &folder_name)?;

    write_gpx(&places, &folder_name, &path).await?;
    prompt.tell(&format!("\nGPX file created: {}", path.display()));
    prompt.tell("\nExtraction completed successfully!");

    Ok(Some(path))
}
