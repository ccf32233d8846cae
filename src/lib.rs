//! Exports a park4night bookmark folder as a GPX waypoint file.
//!
//! The flow is strictly sequential: resolve the session, list the bookmark
//! folders, let the user pick one, scrape each place page with a pause in
//! between, and write the located places to `gpx/<folder>.gpx`.

pub mod bookmarks;
pub mod config;
pub mod credential;
mod error;
pub mod gpx;
mod macros;
pub mod parse;
pub mod place;
pub mod process;
pub mod prompt;
pub mod request;

pub use error::{Error, Result};
