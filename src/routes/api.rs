use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};

use crate::clients::places::SerpApiClient;
use crate::clients::regions::{RegionApiClient, RegionScope};
use crate::dto::api::{ScrapeRequest, ScrapeResponse};
use crate::dto::main::IndexQuery;
use crate::repository::DieselRepository;
use crate::routes::{parse_query, session_key};
use crate::services::ServiceError;
use crate::services::api as api_service;
use crate::services::regions::list_regions;

#[get("/v1/leads")]
pub async fn api_v1_leads(
    req: HttpRequest,
    session: Session,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let key = session_key(&session);
    let query: IndexQuery = parse_query(&req);

    match api_service::list_leads(repo.get_ref(), &key, &query) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => {
            log::error!("Failed to list leads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Stateless places search taking location names instead of region ids.
#[post("/scrape")]
pub async fn api_scrape(places: web::Data<SerpApiClient>, body: web::Bytes) -> impl Responder {
    let request: ScrapeRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            log::warn!("Rejecting unreadable scrape request: {err}");
            return HttpResponse::InternalServerError().json(ScrapeResponse::error(err.to_string()));
        }
    };

    match api_service::scrape(places.get_ref(), request).await {
        Ok(leads) => HttpResponse::Ok().json(ScrapeResponse::Leads(leads)),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(ScrapeResponse::error(message))
        }
        Err(err) => HttpResponse::InternalServerError().json(ScrapeResponse::error(err.to_string())),
    }
}

#[get("/v1/regions/provinces")]
pub async fn api_v1_provinces(regions: web::Data<RegionApiClient>) -> impl Responder {
    HttpResponse::Ok().json(list_regions(regions.get_ref(), RegionScope::Provinces).await)
}

#[get("/v1/regions/{level}/{parent_id}")]
pub async fn api_v1_regions(
    path: web::Path<(String, String)>,
    regions: web::Data<RegionApiClient>,
) -> impl Responder {
    let (level, parent_id) = path.into_inner();

    if parent_id.is_empty() || !parent_id.chars().all(|c| c.is_ascii_digit()) {
        return HttpResponse::Ok().json(Vec::<()>::new());
    }

    let scope = match level.as_str() {
        "regencies" => RegionScope::Regencies {
            province_id: parent_id,
        },
        "districts" => RegionScope::Districts {
            regency_id: parent_id,
        },
        "villages" => RegionScope::Villages {
            district_id: parent_id,
        },
        _ => return HttpResponse::NotFound().finish(),
    };

    HttpResponse::Ok().json(list_regions(regions.get_ref(), scope).await)
}
