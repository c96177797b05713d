use crate::error::FetchError;
use headless_chrome::util::Timeout;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for headless browser
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// How long to wait for the expected selector after navigation
    pub wait_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            wait_timeout: Duration::from_secs(15),
            user_agent: None,
        }
    }
}

impl From<&crate::config::BrowserSettings> for BrowserConfig {
    fn from(settings: &crate::config::BrowserSettings) -> Self {
        Self {
            headless: settings.headless,
            wait_timeout: Duration::from_secs(settings.wait_timeout_secs),
            ..Self::default()
        }
    }
}

/// One isolated Chrome process, used for a single extraction.
///
/// Dropping the session kills the browser, so every exit path of the
/// owning scope tears it down.
pub struct BrowserSession {
    browser: Browser,
    config: BrowserConfig,
}

impl BrowserSession {
    pub fn launch(config: BrowserConfig) -> Result<Self, FetchError> {
        let user_agent_arg = config.user_agent.as_ref().map(|ua| format!("--user-agent={}", ua));

        let mut args: Vec<&OsStr> = vec![
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--no-sandbox"),
            OsStr::new("--blink-settings=imagesEnabled=false"),
        ];
        if let Some(ref ua) = user_agent_arg {
            args.push(OsStr::new(ua));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_width, config.window_height)))
            .args(args)
            .build()
            .map_err(|e| FetchError::Browser(format!("launch options: {}", e)))?;

        let browser = Browser::new(launch_options).map_err(|e| FetchError::Browser(e.to_string()))?;

        Ok(Self { browser, config })
    }

    fn navigate(&self, url: &str) -> Result<Arc<Tab>, FetchError> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| FetchError::Browser(format!("tab creation: {}", e)))?;

        tab.navigate_to(url)
            .and_then(|t| t.wait_until_navigated())
            .map_err(|e| FetchError::Browser(format!("navigation to {}: {}", url, e)))?;

        Ok(tab)
    }

    /// Wait until `selector` matches or the wait timeout elapses
    fn wait_for_selector(&self, tab: &Tab, selector: &str) -> Result<(), FetchError> {
        match tab.wait_for_element_with_custom_timeout(selector, self.config.wait_timeout) {
            Ok(_) => Ok(()),
            Err(e) => Err(wait_error(selector, e)),
        }
    }

    /// Navigate to a URL, wait for a selector, and return the page HTML
    pub fn get_html_wait_for(&self, url: &str, selector: &str) -> Result<String, FetchError> {
        log::info!("Browser navigating to: {}", url);
        let tab = self.navigate(url)?;
        self.wait_for_selector(&tab, selector)?;

        tab.get_content()
            .map_err(|e| FetchError::Browser(format!("html extraction: {}", e)))
    }

    /// Launch, fetch and tear down on a blocking worker
    pub async fn fetch_html(
        config: BrowserConfig,
        url: String,
        wait_for: &'static str,
    ) -> Result<String, FetchError> {
        tokio::task::spawn_blocking(move || {
            let session = BrowserSession::launch(config)?;
            session.get_html_wait_for(&url, wait_for)
        })
        .await
        .map_err(|e| FetchError::Browser(format!("browser worker failed: {}", e)))?
    }
}

/// Only an expired wait means the element is absent; anything else is a browser failure
fn wait_error(selector: &str, e: anyhow::Error) -> FetchError {
    if e.downcast_ref::<Timeout>().is_some() {
        FetchError::WaitTimeout(selector.to_string())
    } else {
        FetchError::Browser(format!("waiting for {}: {}", selector, e))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        log::debug!("Browser session closed");
    }
}
