//! Cascading lookups against the public Indonesian administrative regions
//! dataset (`provinces.json`, `regencies/<id>.json`, ...).

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("region lookup failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("region data unavailable: {0}")]
    Unavailable(String),
}

/// One selectable region.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    pub name: String,
}

/// Level of the cascade together with the parent it is scoped to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionScope {
    Provinces,
    Regencies { province_id: String },
    Districts { regency_id: String },
    Villages { district_id: String },
}

impl RegionScope {
    /// Path of the dataset file relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            RegionScope::Provinces => "provinces.json".to_string(),
            RegionScope::Regencies { province_id } => format!("regencies/{province_id}.json"),
            RegionScope::Districts { regency_id } => format!("districts/{regency_id}.json"),
            RegionScope::Villages { district_id } => format!("villages/{district_id}.json"),
        }
    }
}

pub trait RegionDirectory {
    fn list(&self, scope: &RegionScope) -> impl Future<Output = Result<Vec<Region>, RegionError>>;
}

/// [`RegionDirectory`] reading the static JSON files over HTTP.
#[derive(Clone)]
pub struct RegionApiClient {
    http: Client,
    base_url: String,
}

impl RegionApiClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn url(&self, scope: &RegionScope) -> String {
        format!("{}/{}", self.base_url, scope.path())
    }
}

impl RegionDirectory for RegionApiClient {
    async fn list(&self, scope: &RegionScope) -> Result<Vec<Region>, RegionError> {
        let response = self.http.get(self.url(scope)).send().await?;
        if !response.status().is_success() {
            return Err(RegionError::Unavailable(format!(
                "{} returned {}",
                scope.path(),
                response.status()
            )));
        }
        Ok(response.json::<Vec<Region>>().await?)
    }
}
