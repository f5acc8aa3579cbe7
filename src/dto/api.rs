//! DTOs exposed by the JSON API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::lead::Lead;
use crate::dto::main::LeadRow;

/// Payload returned by `GET /api/v1/leads`.
#[derive(Debug, Serialize)]
pub struct LeadsResponse {
    /// Number of stored leads before filtering.
    pub total: usize,
    /// Number of leads left after filtering.
    pub filtered: usize,
    pub page: usize,
    pub total_pages: usize,
    pub leads: Vec<LeadRow>,
}

/// Body accepted by `POST /api/scrape`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
}

/// Either the found leads or an error message, serialized untagged so the
/// body is a bare array on success and `{"error": ...}` otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScrapeResponse {
    Leads(Vec<Lead>),
    Error { error: String },
}

impl ScrapeResponse {
    pub fn error(message: impl Into<String>) -> Self {
        ScrapeResponse::Error {
            error: message.into(),
        }
    }
}
