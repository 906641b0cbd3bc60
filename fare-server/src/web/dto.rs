//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Yen;
use crate::fare::FareQuote;

/// Query for station name search.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Text to look for in station names
    pub q: String,

    /// Maximum number of results (defaults to 10)
    pub limit: Option<usize>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    /// Station name
    pub name: String,

    /// Lines serving the station
    pub lines: Vec<String>,
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// Request to price a route.
#[derive(Debug, Deserialize)]
pub struct FareRequest {
    /// Route text, e.g. `Tokyo,Tokaido,Shinagawa,Yamanote,Shibuya`
    pub route: String,
}

/// A priced route.
#[derive(Debug, Serialize)]
pub struct FareResponse {
    /// The route as priced, after merging contiguous travel on one line
    pub route: String,

    /// Amount due
    pub total: Yen,

    /// Mileage-based part of the fare
    pub distance_fare: Yen,

    /// Flat charges of the primary group
    pub group_fare: Yen,

    /// Flat charges of other companies
    pub other_fare: Yen,

    /// Tariff branch the mileage was priced on
    pub branch: &'static str,

    /// Total distance in kilometres, one decimal place
    pub kilo: String,
}

impl FareResponse {
    /// Create from a quote and the canonical route text.
    pub fn from_quote(route: String, quote: &FareQuote) -> Self {
        Self {
            route,
            total: quote.total,
            distance_fare: quote.distance_fare,
            group_fare: quote.group_fare,
            other_fare: quote.other_fare,
            branch: quote.branch.name(),
            kilo: quote.mileage_total.to_string(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
