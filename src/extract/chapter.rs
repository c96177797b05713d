use crate::document::{Document, Field, Read};
use crate::error::ExtractError;
use crate::ids::{derive_id, resolve_path_id};
use crate::models::{ChapterDetail, ChapterImage};
use regex::Regex;
use reqwest::Url;
use serde_json::Value;

/// How a site exposes the page images of a chapter
pub trait ReaderStrategy: Send + Sync {
    fn images(&self, doc: &Document) -> Result<Vec<ChapterImage>, ExtractError>;
}

/// Images listed in a JSON literal passed to an inline script call,
/// e.g. `ts_reader.run({"sources":[{"images":[...]}]});`
pub struct ScriptPayload {
    marker: &'static str,
}

impl ScriptPayload {
    pub fn new(marker: &'static str) -> Self {
        Self { marker }
    }

    /// Text following `marker(` in the first script mentioning the marker
    fn argument<'a>(&self, scripts: &'a [String]) -> Option<&'a str> {
        let script = scripts.iter().find(|s| s.contains(self.marker))?;
        script
            .match_indices(self.marker)
            .find_map(|(at, _)| script[at + self.marker.len()..].trim_start().strip_prefix('('))
    }
}

impl ReaderStrategy for ScriptPayload {
    fn images(&self, doc: &Document) -> Result<Vec<ChapterImage>, ExtractError> {
        let scripts: Vec<String> = doc.query_all("script").iter().map(|s| s.text()).collect();
        let argument = self
            .argument(&scripts)
            .ok_or_else(|| ExtractError::NotFound(format!("no {} call in page", self.marker)))?;

        // Only the first JSON value is read; whatever follows the call is ignored
        let data: Value = serde_json::Deserializer::from_str(argument)
            .into_iter::<Value>()
            .next()
            .ok_or_else(|| ExtractError::NotFound(format!("empty {} call", self.marker)))?
            .map_err(|e| ExtractError::Parse(e.to_string()))?;

        let images = data
            .get("sources")
            .and_then(|s| s.get(0))
            .and_then(|s| s.get("images"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ExtractError::NotFound("reader payload has no sources[0].images".into())
            })?;

        Ok(images
            .iter()
            .enumerate()
            .map(|(i, v)| ChapterImage {
                index: i + 1,
                url: v.as_str().map(str::to_string),
            })
            .collect())
    }
}

/// Images taken straight from `<img>` elements, honouring lazy-load attributes
pub struct DomImages {
    pub selector: &'static str,
    pub url_attrs: &'static [&'static str],
}

impl ReaderStrategy for DomImages {
    fn images(&self, doc: &Document) -> Result<Vec<ChapterImage>, ExtractError> {
        let read = Field {
            selector: self.selector,
            read: Read::FirstAttr(self.url_attrs),
        };
        let images: Vec<ChapterImage> = doc
            .query_all(self.selector)
            .iter()
            .enumerate()
            .map(|(i, img)| ChapterImage {
                index: i + 1,
                url: read.read_node(img).map(|u| u.trim().to_string()),
            })
            .collect();

        if images.is_empty() {
            return Err(ExtractError::NotFound(format!("no images match {}", self.selector)));
        }
        Ok(images)
    }
}

/// Turns a prev/next href into a navigation id
pub enum NavRule {
    /// Resolve against the site base and use the path minus its leading slash
    ResolvePath(Url),
    /// First capture group of a chapter-path pattern
    Pattern(Regex),
}

impl NavRule {
    pub fn navigation_id(&self, href: &str) -> Option<String> {
        match self {
            NavRule::ResolvePath(base) => resolve_path_id(href, base),
            NavRule::Pattern(re) => derive_id(href, re),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReaderSelectors {
    pub title: Field,
    pub prev: Field,
    pub next: Field,
}

pub fn extract_chapter(
    doc: &Document,
    selectors: &ReaderSelectors,
    strategy: &dyn ReaderStrategy,
    nav: &NavRule,
) -> Result<ChapterDetail, ExtractError> {
    let images = strategy.images(doc)?;

    Ok(ChapterDetail {
        title: selectors.title.or_default(doc),
        images,
        prev_chapter_id: selectors
            .prev
            .extract(doc)
            .and_then(|href| nav.navigation_id(&href)),
        next_chapter_id: selectors
            .next
            .extract(doc)
            .and_then(|href| nav.navigation_id(&href)),
    })
}
