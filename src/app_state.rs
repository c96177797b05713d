//! Application state for the Actix-web server
//!
//! Everything here is immutable after startup: the outbound fetcher and the
//! site registry. Requests share no mutable state.

use crate::browser_client::BrowserConfig;
use crate::config::Config;
use crate::error::FetchError;
use crate::http_client::PageFetcher;
use crate::sources::{InvalidBaseUrl, SiteRegistry};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("could not build HTTP client: {0}")]
    Client(#[from] FetchError),

    #[error(transparent)]
    Site(#[from] InvalidBaseUrl),
}

/// Shared application state for Actix-web handlers
pub struct AppState {
    pub fetcher: PageFetcher,
    pub sites: SiteRegistry,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let fetcher = PageFetcher::with_config(
            config.fetch.http_client_config(),
            BrowserConfig::from(&config.browser),
        )?;
        let sites = SiteRegistry::from_config(config)?;
        Ok(Self { fetcher, sites })
    }
}
