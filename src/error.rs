use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseMissingSelector(String),
    #[error("Regex Error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input closed while waiting for an answer.")]
    PromptClosed,

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The account has no bookmark folders.")]
    NoFolders,
}
