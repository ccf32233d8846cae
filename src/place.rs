/// Latitude/longitude exactly as the page printed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub lat: String,
    pub lng: String,
}

/// One bookmarked place, scraped from its detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub id: String,
    pub name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub description: Option<String>,
    pub prices: Option<String>,
}
