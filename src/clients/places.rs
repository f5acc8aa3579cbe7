//! Places search through the SerpAPI `google_maps` engine.

use std::future::Future;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::lead::Lead;
use crate::domain::location::Location;
use crate::domain::types::{ApiKey, Keyword};

pub const SEARCH_ENGINE: &str = "google_maps";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Error message reported by the search service itself.
    #[error("{0}")]
    Service(String),
    #[error("search service responded with status {0}")]
    Status(StatusCode),
    #[error("unexpected search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Everything needed to run one search.
#[derive(Clone, Debug)]
pub struct PlacesQuery {
    pub api_key: ApiKey,
    pub keyword: Keyword,
    pub location: Location,
}

impl PlacesQuery {
    pub fn new(api_key: ApiKey, keyword: Keyword, location: Location) -> Self {
        Self {
            api_key,
            keyword,
            location,
        }
    }

    /// Free-text query, e.g. `Barbershop di Kebayoran Baru, Kota Jakarta Selatan`.
    pub fn text(&self) -> String {
        format!("{} di {}", self.keyword, self.location.describe())
    }
}

/// A service able to turn a query into lead records.
pub trait PlacesSearch {
    fn search(&self, query: &PlacesQuery) -> impl Future<Output = Result<Vec<Lead>, SearchError>>;
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    rating: serde_json::Value,
    #[serde(default)]
    reviews: serde_json::Value,
}

impl TryFrom<Place> for Lead {
    type Error = serde_json::Error;

    fn try_from(place: Place) -> Result<Self, Self::Error> {
        // Numeric fields go through the lenient `Lead` decoder.
        serde_json::from_value(serde_json::json!({
            "name": place.title,
            "address": place.address,
            "phone": place.phone,
            "website": place.website,
            "rating": place.rating,
            "reviews": place.reviews,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    local_results: Vec<Place>,
}

/// Interprets a raw search response.
///
/// A non-success status is always an error; the service's own message is
/// preferred when the body carries one. A success body may still carry an
/// `error` field instead of results.
pub fn decode_search_response(status: StatusCode, body: &[u8]) -> Result<Vec<Lead>, SearchError> {
    let parsed = serde_json::from_slice::<SearchResponse>(body);

    if !status.is_success() {
        return Err(match parsed {
            Ok(SearchResponse {
                error: Some(message),
                ..
            }) => SearchError::Service(message),
            _ => SearchError::Status(status),
        });
    }

    let response = parsed?;
    if let Some(message) = response.error {
        return Err(SearchError::Service(message));
    }

    response
        .local_results
        .into_iter()
        .map(Lead::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(SearchError::from)
}

/// [`PlacesSearch`] backed by a SerpAPI-compatible endpoint.
#[derive(Clone)]
pub struct SerpApiClient {
    http: Client,
    endpoint: String,
}

impl SerpApiClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

impl PlacesSearch for SerpApiClient {
    async fn search(&self, query: &PlacesQuery) -> Result<Vec<Lead>, SearchError> {
        let text = query.text();
        log::info!("Searching places for '{text}'");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("engine", SEARCH_ENGINE),
                ("q", text.as_str()),
                ("type", "search"),
                ("api_key", query.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let leads = decode_search_response(status, &body)?;

        log::info!("Search for '{text}' returned {} leads", leads.len());
        Ok(leads)
    }
}
