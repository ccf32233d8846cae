use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::credential::CredentialStore;
use crate::Result;

pub const BASE_URL: &str = "https://park4night.com";
pub const STORE_PATH: &str = ".env";
pub const SESSION_KEY: &str = "PARK4NIGHT_SESSION";
pub const OUTPUT_DIR: &str = "gpx";
pub const REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Everything a run needs, loaded once at startup and handed to each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub store_path: PathBuf,
    pub session_key: String,
    pub output_dir: PathBuf,
    pub request_delay: Duration,
    /// Session token found in the environment or the store at load time.
    pub saved_session: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.into(),
            store_path: STORE_PATH.into(),
            session_key: SESSION_KEY.into(),
            output_dir: OUTPUT_DIR.into(),
            request_delay: REQUEST_DELAY,
            saved_session: None,
        }
    }
}

impl Config {
    /// Loads the default config. A `PARK4NIGHT_SESSION` environment variable
    /// wins over the value persisted in the store.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(STORE_PATH)?;
        if let Some(token) = std::env::var(SESSION_KEY)
            .ok()
            .filter(|t| !t.trim().is_empty())
        {
            config.saved_session = Some(token);
        }
        Ok(config)
    }

    /// Loads the default config against an explicit store file, ignoring the environment.
    pub fn load_from(store_path: impl AsRef<Path>) -> Result<Self> {
        let store_path = store_path.as_ref().to_path_buf();
        let store = CredentialStore::open(&store_path)?;
        let saved_session = store.lookup(SESSION_KEY).map(str::to_owned);
        Ok(Self {
            store_path,
            saved_session,
            ..Self::default()
        })
    }

    pub fn user_url(&self) -> String {
        format!("{}/api/user", self.base_url)
    }

    pub fn place_url(&self, id: &str) -> String {
        format!("{}/de/place/{id}", self.base_url)
    }

    pub fn bookmarks_referer(&self) -> String {
        format!("{}/de/search?bookmarks=1", self.base_url)
    }
}
