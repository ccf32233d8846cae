use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::place::{Coordinates, Place};
use crate::{warn_time, Error, Result};

const NAME: &str = "h1";
const LOCATION_ITEM: &str = ".place-info-location li";
const SPAN: &str = "span";
const DESCRIPTION: &str = r#".place-info-description p[lang="de"]"#;
const RATING: &str = ".place-feedback-average";
const RATING_TEXT: &str = ".text-gray";
const DETAILS: &str = ".place-info-details";

const COORDINATE_PAIR: &str = r"^(-?\d+\.\d+),\s*(-?\d+\.\d+)";
const PARKING_FEE: &str = r"Parkgebühren(\d+)€";

pub const NO_PRICE_INFO: &str = "Keine Preisangaben";

/// Builds a `Place` from a detail page.
///
/// Every field is extracted on its own. A field whose extraction fails is logged
/// and left empty, the rest of the record is still built.
pub fn parse_place(id: &str, html: &str, url: &str) -> Place {
    let doc = Html::parse_document(html);

    let name = recover(id, "name", extract_name(&doc));
    let coordinates = recover(id, "coordinates", extract_coordinates(&doc));
    let description = recover(id, "description", extract_description(&doc));
    let rating = recover(id, "rating", extract_rating(&doc));
    let prices = recover(id, "prices", extract_prices(&doc));

    let description = compose_description(
        description.as_deref(),
        prices.as_deref(),
        rating.as_deref(),
        url,
    );

    Place {
        id: id.to_string(),
        name,
        coordinates,
        description: Some(description),
        prices,
    }
}

fn recover<T>(id: &str, field: &str, extracted: Result<Option<T>>) -> Option<T> {
    extracted.unwrap_or_else(|e| {
        warn_time!("Could not extract {field} for place {id}: {e}");
        None
    })
}

/// Trimmed text of the first `<h1>`.
pub fn extract_name(doc: &Html) -> Result<Option<String>> {
    Ok(doc.select(&create_selector(NAME)?).next().map(trimmed_text))
}

/// First `lat, lng` pair found in the spans of the location item.
pub fn extract_coordinates(doc: &Html) -> Result<Option<Coordinates>> {
    let Some(location) = doc.select(&create_selector(LOCATION_ITEM)?).next() else {
        return Ok(None);
    };
    let pair = Regex::new(COORDINATE_PAIR)?;

    let span_selector = create_selector(SPAN)?;
    let coordinates = location.select(&span_selector).find_map(|span| {
        let text = trimmed_text(span);
        let caps = pair.captures(&text)?;
        Some(Coordinates {
            lat: caps[1].to_string(),
            lng: caps[2].to_string(),
        })
    });
    Ok(coordinates)
}

/// The German paragraph of the description block.
pub fn extract_description(doc: &Html) -> Result<Option<String>> {
    Ok(doc
        .select(&create_selector(DESCRIPTION)?)
        .next()
        .map(trimmed_text))
}

pub fn extract_rating(doc: &Html) -> Result<Option<String>> {
    let Some(rating) = doc.select(&create_selector(RATING)?).next() else {
        return Ok(None);
    };
    Ok(rating
        .select(&create_selector(RATING_TEXT)?)
        .next()
        .map(trimmed_text))
}

/// Price summary mined from the details block, `None` if the page has no such block.
pub fn extract_prices(doc: &Html) -> Result<Option<String>> {
    match doc.select(&create_selector(DETAILS)?).next() {
        Some(details) => Ok(Some(summarize_prices(&trimmed_text(details))?)),
        None => Ok(None),
    }
}

/// Turns the free text of the details block into German price lines.
///
/// The electricity and water amounts are fixed strings, the page's own numbers
/// are not read.
pub fn summarize_prices(details: &str) -> Result<String> {
    let mut lines = Vec::new();

    if details.contains("Preis der Dienstleistungen") {
        lines.push("Servicegebühren:".to_string());
        if details.contains("/6h electricity") {
            lines.push("- Strom: 1,00€/6h".to_string());
        }
        if details.contains("/25l water") {
            lines.push("- Wasser: 1€/25l".to_string());
        }
    }

    if details.contains("Parkgebühren") {
        if let Some(caps) = Regex::new(PARKING_FEE)?.captures(details) {
            lines.push(format!("Stellplatzgebühr: {}€", &caps[1]));
        }
    }

    if lines.is_empty() {
        return Ok(NO_PRICE_INFO.to_string());
    }
    Ok(lines.join("\n"))
}

/// Description text shown in the waypoint, always ending with the place link.
pub fn compose_description(
    description: Option<&str>,
    prices: Option<&str>,
    rating: Option<&str>,
    url: &str,
) -> String {
    let mut parts = Vec::with_capacity(5);
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        parts.push(description.to_string());
    }
    if let Some(prices) = prices.filter(|p| !p.is_empty()) {
        parts.push("\nPreise:".to_string());
        parts.push(prices.to_string());
    }
    if let Some(rating) = rating.filter(|r| !r.is_empty()) {
        parts.push(format!("\nBewertung: {rating}"));
    }
    parts.push(format!("\nLink: {url}"));
    parts.join("\n")
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

#[inline]
fn trimmed_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
