//! Site profiles.
//!
//! A [`Site`] bundles everything needed to scrape one upstream: URL layout,
//! selector maps, reader strategy, navigation rule and output schema.
//! Adding an upstream means adding a module here that builds its own `Site`.

pub mod komikstation;
pub mod wp_manga;

use crate::config::{Config, FetchStrategy};
use crate::extract::{DetailSelectors, NavRule, ReaderSelectors, ReaderStrategy, SearchSelectors};
use crate::http_client::{FetchPlan, RequestKind};
use crate::response::WireSchema;
use regex::Regex;
use reqwest::Url;

#[derive(Debug, thiserror::Error)]
#[error("invalid base url '{url}' for {site}: {reason}")]
pub struct InvalidBaseUrl {
    pub site: &'static str,
    pub url: String,
    pub reason: String,
}

/// URL layout relative to the site base; `{id}` is substituted verbatim
#[derive(Debug, Clone, Copy)]
pub struct SitePaths {
    /// Query pairs appended after `s=<query>` on the site root
    pub search_params: &'static [(&'static str, &'static str)],
    pub read: &'static str,
    pub detail: &'static str,
}

/// Selectors a browser session waits for, per endpoint
#[derive(Debug, Clone, Copy)]
pub struct WaitSelectors {
    pub search: &'static str,
    pub read: &'static str,
    pub detail: &'static str,
}

pub struct Site {
    pub name: &'static str,
    pub base_url: Url,
    pub paths: SitePaths,
    pub strategy: FetchStrategy,
    pub wait_for: WaitSelectors,
    pub search: SearchSelectors,
    pub id_pattern: Regex,
    pub reader: ReaderSelectors,
    pub reader_strategy: Box<dyn ReaderStrategy>,
    pub nav: NavRule,
    pub detail: DetailSelectors,
    pub schema: WireSchema,
}

pub(crate) fn parse_base(site: &'static str, url: &str) -> Result<Url, InvalidBaseUrl> {
    Url::parse(url).map_err(|e| InvalidBaseUrl {
        site,
        url: url.to_string(),
        reason: e.to_string(),
    })
}

impl Site {
    fn root(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn search_url(&self, query: &str) -> String {
        let mut url = self.base_url.clone();
        url.set_path("/");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("s", query);
            for (k, v) in self.paths.search_params {
                pairs.append_pair(k, v);
            }
        }
        url.to_string()
    }

    pub fn read_url(&self, chapter_id: &str) -> String {
        format!("{}/{}", self.root(), self.paths.read.replace("{id}", chapter_id))
    }

    pub fn detail_url(&self, id: &str) -> String {
        format!("{}/{}", self.root(), self.paths.detail.replace("{id}", id))
    }

    pub fn plan(&self, kind: RequestKind) -> FetchPlan {
        match self.strategy {
            FetchStrategy::Http => FetchPlan::Http,
            FetchStrategy::Browser => FetchPlan::Browser {
                wait_for: match kind {
                    RequestKind::Search => self.wait_for.search,
                    RequestKind::Read => self.wait_for.read,
                    RequestKind::Detail => self.wait_for.detail,
                },
            },
        }
    }
}

/// All configured sites; the first one is served at the root routes
pub struct SiteRegistry {
    sites: Vec<Site>,
}

impl SiteRegistry {
    pub fn from_config(config: &Config) -> Result<Self, InvalidBaseUrl> {
        Ok(Self {
            sites: vec![
                komikstation::site(&config.sources.komikstation)?,
                wp_manga::site(&config.sources.wp_manga)?,
            ],
        })
    }

    pub fn default_site(&self) -> &Site {
        &self.sites[0]
    }

    pub fn get(&self, name: &str) -> Option<&Site> {
        let key = name.to_lowercase().replace('-', "_");
        self.sites.iter().find(|s| s.name == key)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.sites.iter().map(|s| s.name).collect()
    }
}
