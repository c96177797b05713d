use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Browser-like user agent sent with every outbound request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub browser: BrowserSettings,
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Port to listen on; the `PORT` environment variable takes precedence
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Timeout for upstream requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause before a search fetch, in milliseconds
    #[serde(default = "default_search_delay")]
    pub search_delay_ms: u64,

    /// Pause before a chapter fetch, in milliseconds
    #[serde(default = "default_page_delay")]
    pub read_delay_ms: u64,

    /// Pause before a title detail fetch, in milliseconds
    #[serde(default = "default_page_delay")]
    pub detail_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    #[serde(default = "default_true")]
    pub headless: bool,

    /// How long to wait for the expected selector before giving up
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    #[serde(default = "default_komikstation")]
    pub komikstation: SiteConfig,
    #[serde(default = "default_wp_manga")]
    pub wp_manga: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    #[serde(default)]
    pub strategy: FetchStrategy,
}

/// How a site's pages are retrieved
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Short-lived headless Chrome session per request
    Browser,
}

fn default_true() -> bool { true }
fn default_port() -> u16 { 3000 }
fn default_timeout() -> u64 { 30 }
fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }
fn default_search_delay() -> u64 { 1500 }
fn default_page_delay() -> u64 { 1000 }
fn default_wait_timeout() -> u64 { 15 }

fn default_komikstation() -> SiteConfig {
    SiteConfig {
        base_url: crate::sources::komikstation::BASE_URL.to_string(),
        strategy: FetchStrategy::Http,
    }
}

fn default_wp_manga() -> SiteConfig {
    SiteConfig {
        base_url: crate::sources::wp_manga::BASE_URL.to_string(),
        strategy: FetchStrategy::Http,
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            search_delay_ms: default_search_delay(),
            read_delay_ms: default_page_delay(),
            detail_delay_ms: default_page_delay(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            wait_timeout_secs: default_wait_timeout(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            komikstation: default_komikstation(),
            wp_manga: default_wp_manga(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match Self::from_toml_str(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => log::warn!("Ignoring invalid config.toml: {}", e),
                },
                Err(e) => log::warn!("Could not read config.toml: {}", e),
            }
        }
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }

    /// Listen port, honouring a `PORT` override
    pub fn listen_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(self.server.port)
    }
}

impl FetchConfig {
    /// Build the HTTP client configuration from this section
    pub fn http_client_config(&self) -> crate::http_client::HttpClientConfig {
        use crate::http_client::{DelayConfig, HttpClientConfig};
        use std::time::Duration;

        HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            delays: DelayConfig {
                search: Duration::from_millis(self.search_delay_ms),
                read: Duration::from_millis(self.read_delay_ms),
                detail: Duration::from_millis(self.detail_delay_ms),
            },
        }
    }
}
