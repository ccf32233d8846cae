use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, REFERER, USER_AGENT};
use reqwest::Client;

use crate::config::Config;
use crate::{Error, Result};

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const COOKIE_CONSENT: &str =
    r#"{"status":"accepted","acceptedCategories":["essentials","analytics"]}"#;

/// The API refuses requests that don't look like they come from its own web app.
const BROWSER_HEADERS: [(&str, &str); 14] = [
    ("accept", "application/json, text/plain, */*"),
    ("accept-language", "de-DE,de;q=0.7"),
    ("axios-ajax", "true"),
    ("cache-control", "no-cache"),
    ("pragma", "no-cache"),
    ("priority", "u=1, i"),
    ("sec-ch-ua", r#""Chromium";v="134", "Not:A-Brand";v="24", "Brave";v="134""#),
    ("sec-ch-ua-mobile", "?1"),
    ("sec-ch-ua-platform", r#""Android""#),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-origin"),
    ("sec-gpc", "1"),
    ("user-agent", "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Mobile Safari/537.36"),
];

/// The two pages the exporter reads from the site.
#[async_trait]
pub trait Site: Send + Sync {
    /// Raw JSON of the logged-in user, bookmark folders included.
    async fn fetch_user(&self, session: &str) -> Result<String>;

    /// Raw HTML of a place's detail page.
    async fn fetch_place_page(&self, id: &str) -> Result<String>;
}

/// `Site` backed by real HTTP requests.
pub struct HttpSite {
    client: Client,
    config: Config,
}

impl HttpSite {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn bookmark_headers(&self, session: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in BROWSER_HEADERS {
            headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        headers.insert(
            REFERER,
            HeaderValue::from_str(&self.config.bookmarks_referer())?,
        );
        let cookie = format!("PHPSESSID={session}; cookie_consent_v2={COOKIE_CONSENT}");
        headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
        Ok(headers)
    }

    /// Sends the GET and returns the body, turning non-2xx answers into errors.
    async fn get_text(&self, url: String, headers: HeaderMap) -> Result<String> {
        let res = self.client.get(&url).headers(headers).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }
        Ok(res.text().await?)
    }
}

#[async_trait]
impl Site for HttpSite {
    async fn fetch_user(&self, session: &str) -> Result<String> {
        let headers = self.bookmark_headers(session)?;
        self.get_text(self.config.user_url(), headers).await
    }

    async fn fetch_place_page(&self, id: &str) -> Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DESKTOP_USER_AGENT));
        self.get_text(self.config.place_url(id), headers).await
    }
}
