use actix_session::Session;
use actix_web::http::header::ContentDisposition;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::clients::places::SerpApiClient;
use crate::clients::regions::RegionApiClient;
use crate::domain::lead::LeadField;
use crate::dto::main::IndexQuery;
use crate::dto::regions::RegionSelection;
use crate::forms::main::SearchForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, parse_query, redirect, render_template, session_key};
use crate::services::main as main_service;
use crate::services::regions::load_region_options;
use crate::services::ServiceError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_FAILED: &str = "Failed to generate Excel file";

#[get("/")]
pub async fn show_index(
    req: HttpRequest,
    session: Session,
    repo: web::Data<DieselRepository>,
    regions: web::Data<RegionApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let key = session_key(&session);
    let query: IndexQuery = parse_query(&req);

    let requested = RegionSelection::new(
        query.province.clone(),
        query.regency.clone(),
        query.district.clone(),
        query.village.clone(),
    );
    let region_options = load_region_options(regions.get_ref(), &requested).await;

    let data = match main_service::load_index_page(repo.get_ref(), &key, query) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load index page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, "index");
    context.insert("api_key", &data.settings.api_key);
    context.insert("message_template", data.settings.message_template.as_str());
    context.insert("lead_set", &data.lead_set);
    context.insert("total", &data.total);
    context.insert("leads", &data.leads);
    context.insert("headers", &data.headers);
    context.insert("page_links", &data.page_links);
    context.insert("filter", &data.query.filter());
    context.insert("sort", &data.query.sort.map(LeadField::as_str));
    context.insert("dir", &data.query.dir.map(|dir| dir.as_str()));
    context.insert("export_url", &data.export_url);
    context.insert("regions", &region_options);

    render_template(&tera, "main/index.html", &context)
}

#[post("/search")]
pub async fn search(
    session: Session,
    repo: web::Data<DieselRepository>,
    places: web::Data<SerpApiClient>,
    regions: web::Data<RegionApiClient>,
    web::Form(form): web::Form<SearchForm>,
) -> impl Responder {
    let key = session_key(&session);
    let back = IndexQuery {
        province: Some(form.province.clone()),
        regency: Some(form.regency.clone()),
        district: form.district.clone(),
        village: form.village.clone(),
        ..IndexQuery::default()
    };

    match main_service::run_search(repo.get_ref(), places.get_ref(), regions.get_ref(), &key, form)
        .await
    {
        Ok(lead_set) => {
            FlashMessage::success(format!(
                "Found {} leads for {} in {}.",
                lead_set.leads.len(),
                lead_set.keyword,
                lead_set.location.describe()
            ))
            .send();
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::Search(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to run search: {err}");
            FlashMessage::error("Failed to run the search.").send();
        }
    }

    let query_string = back.to_query_string();
    redirect(&format!("/?{query_string}"))
}

#[post("/leads/clear")]
pub async fn clear_leads(session: Session, repo: web::Data<DieselRepository>) -> impl Responder {
    let key = session_key(&session);

    match main_service::clear_leads(repo.get_ref(), &key) {
        Ok(()) => FlashMessage::success("Results cleared.").send(),
        Err(err) => {
            log::error!("Failed to clear results: {err}");
            FlashMessage::error("Failed to clear results.").send();
        }
    }

    redirect("/")
}

#[get("/leads/export")]
pub async fn export_leads(
    req: HttpRequest,
    session: Session,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let key = session_key(&session);
    let query: IndexQuery = parse_query(&req);

    match main_service::export_leads(repo.get_ref(), &key, &query) {
        Ok(Some(file)) => HttpResponse::Ok()
            .content_type(XLSX_CONTENT_TYPE)
            .insert_header(ContentDisposition::attachment(file.filename))
            .body(file.bytes),
        Ok(None) => {
            FlashMessage::warning("There are no results to export.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to export leads: {err}");
            FlashMessage::error(EXPORT_FAILED).send();
            redirect("/")
        }
    }
}
