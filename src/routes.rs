//! HTTP surface: the default site at the root, other sites under `/{source}`

use crate::app_state::AppState;
use crate::pipeline;
use crate::response::{self, Shaped};
use crate::sources::Site;
use actix_web::middleware::DefaultHeaders;
use actix_web::{get, guard, web, HttpResponse, Responder};
use log::error;

/// Permissive CORS headers added to every response
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
        .add(("Access-Control-Allow-Credentials", "true"))
        .add(("Access-Control-Max-Age", "86400"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(search)
        .service(read)
        .service(detail)
        .service(source_search)
        .service(source_read)
        .service(source_detail)
        .service(web::resource("/{tail:.*}").guard(guard::Options()).to(preflight));
}

async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[get("/")]
async fn index(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("manhwa_scraper_api: {}", data.sites.names().join(", ")))
}

async fn run_search(data: &AppState, site: &Site, query: &str) -> Shaped {
    match pipeline::search(&data.fetcher, site, query).await {
        Ok(results) => response::search_ok(&site.schema, &results),
        Err(e) => {
            error!("Search error ({}, '{}'): {}", site.name, query, e);
            response::search_err(e.kind())
        }
    }
}

async fn run_read(data: &AppState, site: &Site, chapter_id: &str) -> Shaped {
    match pipeline::read_chapter(&data.fetcher, site, chapter_id).await {
        Ok(chapter) => response::read_ok(&site.schema, &chapter),
        Err(e) => {
            error!("Reader error ({}, '{}'): {}", site.name, chapter_id, e);
            response::read_err(&site.schema, e.kind())
        }
    }
}

async fn run_detail(data: &AppState, site: &Site, id: &str) -> Shaped {
    match pipeline::detail(&data.fetcher, site, id).await {
        Ok(title) => response::detail_ok(&title),
        Err(e) => {
            error!("Manga detail error ({}, '{}'): {}", site.name, id, e);
            response::detail_err(e.kind())
        }
    }
}

#[get("/search/{query}")]
async fn search(data: web::Data<AppState>, query: web::Path<String>) -> HttpResponse {
    run_search(&data, data.sites.default_site(), &query).await.into_response()
}

#[get("/read/{chapter_id:.*}")]
async fn read(data: web::Data<AppState>, chapter_id: web::Path<String>) -> HttpResponse {
    run_read(&data, data.sites.default_site(), &chapter_id).await.into_response()
}

#[get("/detail/{id}")]
async fn detail(data: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    run_detail(&data, data.sites.default_site(), &id).await.into_response()
}

#[get("/{source}/search/{query}")]
async fn source_search(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (source, query) = path.into_inner();
    match data.sites.get(&source) {
        Some(site) => run_search(&data, site, &query).await.into_response(),
        None => response::unknown_source().into_response(),
    }
}

#[get("/{source}/read/{chapter_id:.*}")]
async fn source_read(data: web::Data<AppState>, path: web::Path<(String, String)>) -> HttpResponse {
    let (source, chapter_id) = path.into_inner();
    match data.sites.get(&source) {
        Some(site) => run_read(&data, site, &chapter_id).await.into_response(),
        None => response::unknown_source().into_response(),
    }
}

#[get("/{source}/detail/{id}")]
async fn source_detail(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (source, id) = path.into_inner();
    match data.sites.get(&source) {
        Some(site) => run_detail(&data, site, &id).await.into_response(),
        None => response::unknown_source().into_response(),
    }
}
