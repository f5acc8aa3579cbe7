//! HTTP handlers and the helpers they share.

use actix_session::Session;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::de::DeserializeOwned;
use tera::{Context, Tera};

use crate::domain::types::SessionKey;

pub mod api;
pub mod main;
pub mod settings;

/// Cookie-session entry holding the [`SessionKey`] of the browser.
pub const SESSION_KEY: &str = "session_key";

/// Maps flash message levels onto Bootstrap alert classes.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context every page starts from: pending alerts and the active menu entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Returns the key of the browser session, issuing a new one when the cookie
/// carries none or an invalid one.
pub fn session_key(session: &Session) -> SessionKey {
    match session.get::<String>(SESSION_KEY) {
        Ok(Some(raw)) => match raw.parse() {
            Ok(key) => return key,
            Err(err) => log::warn!("Discarding invalid session key: {err}"),
        },
        Ok(None) => {}
        Err(err) => log::warn!("Failed to read session key: {err}"),
    }

    let key = SessionKey::new();
    if let Err(err) = session.insert(SESSION_KEY, key.to_string()) {
        log::error!("Failed to store session key: {err}");
    }
    key
}

/// Parses the query string, falling back to defaults when it is malformed.
/// Empty values (`page=`) read as absent.
pub fn parse_query<T>(req: &HttpRequest) -> T
where
    T: DeserializeOwned + Default,
{
    serde_html_form::from_str(req.query_string()).unwrap_or_else(|err| {
        log::warn!("Ignoring malformed query '{}': {err}", req.query_string());
        T::default()
    })
}

/// Registers every route of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(api::api_v1_leads)
            .service(api::api_scrape)
            .service(api::api_v1_provinces)
            .service(api::api_v1_regions),
    )
    .service(main::show_index)
    .service(main::search)
    .service(main::clear_leads)
    .service(main::export_leads)
    .service(settings::save_settings);
}
