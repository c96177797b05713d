use crate::browser_client::{BrowserConfig, BrowserSession};
use crate::error::FetchError;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::sleep;

/// Endpoint category; each has its own pre-request delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    Read,
    Detail,
}

/// Pause applied before each upstream call, per endpoint category
#[derive(Debug, Clone)]
pub struct DelayConfig {
    pub search: Duration,
    pub read: Duration,
    pub detail: Duration,
}

impl DelayConfig {
    pub fn none() -> Self {
        Self {
            search: Duration::ZERO,
            read: Duration::ZERO,
            detail: Duration::ZERO,
        }
    }

    pub fn for_kind(&self, kind: RequestKind) -> Duration {
        match kind {
            RequestKind::Search => self.search,
            RequestKind::Read => self.read,
            RequestKind::Detail => self.detail,
        }
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            search: Duration::from_millis(1500),
            read: Duration::from_millis(1000),
            detail: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub delays: DelayConfig,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
            delays: DelayConfig::default(),
        }
    }
}

/// How a page is retrieved for one request
#[derive(Debug, Clone, Copy)]
pub enum FetchPlan {
    Http,
    /// Headless browser, returning once `wait_for` matches
    Browser { wait_for: &'static str },
}

/// Outbound page fetcher: one GET (or one browser session) per call, no retries
pub struct PageFetcher {
    client: Client,
    config: HttpClientConfig,
    browser: BrowserConfig,
}

impl PageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(HttpClientConfig::default(), BrowserConfig::default())
    }

    pub fn with_config(
        config: HttpClientConfig,
        browser: BrowserConfig,
    ) -> Result<Self, FetchError> {
        // No idle connections are kept, so nothing is shared between requests
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client, config, browser })
    }

    /// Wait the configured delay for `kind`, then fetch `url` as text
    pub async fn fetch(&self, url: &str, kind: RequestKind) -> Result<String, FetchError> {
        self.fetch_with(url, kind, FetchPlan::Http).await
    }

    pub async fn fetch_with(
        &self,
        url: &str,
        kind: RequestKind,
        plan: FetchPlan,
    ) -> Result<String, FetchError> {
        let delay = self.config.delays.for_kind(kind);
        if !delay.is_zero() {
            sleep(delay).await;
        }

        log::info!("Fetching {:?} page: {}", kind, url);
        match plan {
            FetchPlan::Http => self.get_text(url).await,
            FetchPlan::Browser { wait_for } => {
                let mut browser = self.browser.clone();
                browser.user_agent = Some(self.config.user_agent.clone());
                BrowserSession::fetch_html(browser, url.to_string(), wait_for).await
            }
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
