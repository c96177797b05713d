// Library interface for manhwa_scraper_api
// This allows tests and the server binary to share the extraction pipeline

pub mod app_state;
pub mod browser_client;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod http_client;
pub mod ids;
pub mod models;
pub mod pipeline;
pub mod response;
pub mod routes;
pub mod sources;
