use crate::clients::places::{PlacesQuery, PlacesSearch};
use crate::domain::lead::Lead;
use crate::domain::location::Location;
use crate::domain::types::{ApiKey, Keyword, LocationName, SessionKey};
use crate::dto::api::{LeadsResponse, ScrapeRequest};
use crate::dto::main::IndexQuery;
use crate::repository::{LeadSetReader, SessionReader};
use crate::services::main::lead_rows;
use crate::services::{ServiceError, ServiceResult};

pub const MISSING_FIELDS: &str = "Missing required fields";

/// Returns the requested page of the session's leads as JSON-ready rows.
pub fn list_leads<R>(repo: &R, key: &SessionKey, query: &IndexQuery) -> ServiceResult<LeadsResponse>
where
    R: SessionReader + LeadSetReader + ?Sized,
{
    let settings = repo.get_session_settings(key)?.unwrap_or_default();
    let leads = repo
        .get_lead_set(key)?
        .map(|set| set.leads)
        .unwrap_or_default();

    let rows = lead_rows(&leads, query, &settings.message_template);

    Ok(LeadsResponse {
        total: leads.len(),
        filtered: rows.total,
        page: rows.page,
        total_pages: rows.total_pages,
        leads: rows.items,
    })
}

fn optional_name(value: Option<String>) -> Option<LocationName> {
    value.and_then(|v| LocationName::new(v).ok())
}

/// Stateless search by location names: nothing is stored.
///
/// `apiKey`, `keyword` and `city` are required; a missing one is reported as
/// [`ServiceError::Form`] with [`MISSING_FIELDS`].
pub async fn scrape<P>(places: &P, request: ScrapeRequest) -> ServiceResult<Vec<Lead>>
where
    P: PlacesSearch,
{
    let required = (
        request.api_key.and_then(|v| ApiKey::new(v).ok()),
        request.keyword.and_then(|v| Keyword::new(v).ok()),
        optional_name(request.city),
    );
    let (Some(api_key), Some(keyword), Some(city)) = required else {
        return Err(ServiceError::Form(MISSING_FIELDS.to_string()));
    };

    let location = Location {
        province: optional_name(request.province),
        city,
        district: optional_name(request.district),
        village: optional_name(request.village),
    };

    places
        .search(&PlacesQuery::new(api_key, keyword, location))
        .await
        .map_err(|err| {
            log::error!("Scrape request failed: {err}");
            ServiceError::Search(err.to_string())
        })
}
