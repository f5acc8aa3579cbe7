use std::net::TcpListener;
use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpResponse, HttpServer, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use pushkind_leads::clients::build_http_client;
use pushkind_leads::clients::places::SerpApiClient;
use pushkind_leads::clients::regions::RegionApiClient;
use pushkind_leads::repository::DieselRepository;
use pushkind_leads::routes::{alert_level_to_str, configure};
use serde_json::{Value, json};
use tera::Tera;

mod common;

/// Nothing listens on the discard port, so every outbound call fails fast.
const UNREACHABLE: &str = "http://127.0.0.1:9";

macro_rules! test_app {
    ($test_db:expr) => {
        test_app!($test_db, UNREACHABLE)
    };
    ($test_db:expr, $upstream:expr) => {{
        let upstream: &str = $upstream;
        let key = Key::generate();
        let http = build_http_client(Duration::from_secs(2)).unwrap();
        let message_store = CookieMessageStore::builder(key.clone()).build();
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
                .configure(configure)
                .app_data(web::Data::new(Tera::new("templates/**/*").unwrap()))
                .app_data(web::Data::new(DieselRepository::new($test_db.pool())))
                .app_data(web::Data::new(SerpApiClient::new(
                    http.clone(),
                    format!("{upstream}/search.json"),
                )))
                .app_data(web::Data::new(RegionApiClient::new(
                    http,
                    format!("{upstream}/regions"),
                ))),
        )
        .await
    }};
}

/// Starts a local server answering like the search service and the region
/// dataset for Bandung, and returns its base URL.
fn spawn_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let server = HttpServer::new(|| {
        App::new()
            .route(
                "/search.json",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "local_results": [
                            {"title": "Kopi A", "address": "Jl. Dago 1",
                             "website": "https://kopi-a.example", "rating": 4.8, "reviews": 10},
                            {"title": "Kopi B", "address": "Jl. Riau 2",
                             "phone": "0812-3456-789", "rating": "4.2", "reviews": 50}
                        ]
                    }))
                }),
            )
            .route(
                "/regions/provinces.json",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!([{"id": "32", "name": "JAWA BARAT"}]))
                }),
            )
            .route(
                "/regions/regencies/32.json",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!([{"id": "3273", "name": "KOTA BANDUNG"}]))
                }),
            )
            .route(
                "/regions/districts/3273.json",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!([{"id": "3273010", "name": "COBLONG"}]))
                }),
            )
    })
    .workers(1)
    .disable_signals()
    .listen(listener)
    .unwrap()
    .run();
    actix_web::rt::spawn(server);

    base
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "id")
        .expect("session cookie")
        .into_owned()
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn index_renders_without_results() {
    let test_db = common::TestDb::new("routes_index.db");
    let app = test_app!(test_db);

    for uri in ["/", "/?page=&sort=bogus", "/?province=32&regency=3273"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");

        let body = test::read_body(resp).await;
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("Pick a location"), "{uri}");
    }
}

#[actix_web::test]
async fn settings_persist_across_requests() {
    let test_db = common::TestDb::new("routes_settings.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/settings")
        .set_form([("api_key", "secret"), ("message_template", "Salam {name} dari kami")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8_lossy(&body);

    assert!(body.contains("Salam {name} dari kami"));
    assert!(body.contains("Stored for this session"));
}

#[actix_web::test]
async fn clear_redirects_home() {
    let test_db = common::TestDb::new("routes_clear.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post().uri("/leads/clear").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

#[actix_web::test]
async fn export_without_results_redirects() {
    let test_db = common::TestDb::new("routes_export.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/leads/export?sort=rating&dir=desc")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn failed_search_redirects_back_to_location() {
    let test_db = common::TestDb::new("routes_search.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/search")
        .set_form([
            ("api_key", "secret"),
            ("keyword", "Barbershop"),
            ("province", "32"),
            ("regency", "3273"),
            ("district", ""),
            ("village", ""),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.starts_with("/?province=32&regency=3273"));
}

#[actix_web::test]
async fn leads_api_is_empty_for_new_session() {
    let test_db = common::TestDb::new("routes_api_leads.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/v1/leads?has_phone=true")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({"total": 0, "filtered": 0, "page": 1, "total_pages": 0, "leads": []})
    );
}

#[actix_web::test]
async fn region_api_degrades_to_empty_lists() {
    let test_db = common::TestDb::new("routes_api_regions.db");
    let app = test_app!(test_db);

    for uri in [
        "/api/v1/regions/provinces",
        "/api/v1/regions/regencies/32",
        "/api/v1/regions/villages/abc",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!([]), "{uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/regions/countries/1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn scrape_contract() {
    let test_db = common::TestDb::new("routes_api_scrape.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/scrape")
        .set_json(json!({"apiKey": "k", "keyword": "Cafe"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Missing required fields"}));

    let req = test::TestRequest::post()
        .uri("/api/scrape")
        .set_json(json!({"apiKey": "k", "keyword": "Cafe", "city": "Kota Bandung"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/scrape")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[actix_web::test]
async fn stored_results_can_be_sorted_filtered_exported_and_cleared() {
    let test_db = common::TestDb::new("routes_results.db");
    let upstream = spawn_upstream();
    let app = test_app!(test_db, &upstream);

    let req = test::TestRequest::post()
        .uri("/search")
        .set_form([
            ("api_key", "secret"),
            ("keyword", "Kopi Shop"),
            ("province", "32"),
            ("regency", "3273"),
            ("district", ""),
            ("village", ""),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&resp);

    let page = |uri: &'static str| test::TestRequest::get().uri(uri).cookie(cookie.clone());

    let body = test::call_and_read_body(&app, page("/?sort=reviews&dir=desc").to_request()).await;
    let body = String::from_utf8_lossy(&body);
    let a = body.find("<td>Kopi A</td>").expect("row A");
    let b = body.find("<td>Kopi B</td>").expect("row B");
    assert!(b < a, "more reviewed lead comes first");
    assert!(body.contains("628123456789?text="));
    assert!(body.contains("sort=reviews&amp;dir=asc"));

    let body = test::call_and_read_body(&app, page("/?has_website=true").to_request()).await;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("<td>Kopi A</td>"));
    assert!(!body.contains("<td>Kopi B</td>"));
    assert!(body.contains("checked"));

    let resp = test::call_service(&app, page("/?page=18446744073709551615").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("No leads match the current filters."));

    let resp = test::call_service(&app, page("/leads/export").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains("leads_Kopi_Shop_KOTA_BANDUNG.xlsx"), "{disposition}");

    let body: Value = test::call_and_read_body_json(&app, page("/api/v1/leads").to_request()).await;
    assert_eq!(body["total"], 2);

    let req = test::TestRequest::post()
        .uri("/leads/clear")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = test::call_and_read_body(&app, page("/").to_request()).await;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("Pick a location"));
    assert!(!body.contains("<td>Kopi A</td>"));

    let body: Value = test::call_and_read_body_json(&app, page("/api/v1/leads").to_request()).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["leads"], json!([]));
}
