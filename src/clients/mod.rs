//! Outbound HTTP clients for the places-search API and the region dataset.

use std::time::Duration;

use reqwest::Client;

pub mod places;
pub mod regions;

/// Shared `reqwest` client used by both outbound services.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
