//! Fetch -> parse -> extract, one call per endpoint.
//!
//! Each call builds its URL from the site profile, fetches with the site's
//! plan and endpoint delay, and extracts a fresh record from a freshly parsed
//! document. Nothing is cached between calls.

use crate::document::Document;
use crate::error::ScrapeError;
use crate::extract::{extract_chapter, extract_detail, extract_search};
use crate::http_client::{PageFetcher, RequestKind};
use crate::models::{ChapterDetail, SearchResult, TitleDetail};
use crate::sources::Site;
use percent_encoding::percent_decode_str;

async fn fetch_document(
    fetcher: &PageFetcher,
    site: &Site,
    url: &str,
    kind: RequestKind,
) -> Result<Document, ScrapeError> {
    let html = fetcher.fetch_with(url, kind, site.plan(kind)).await?;
    Ok(Document::parse(&html))
}

pub async fn search(
    fetcher: &PageFetcher,
    site: &Site,
    query: &str,
) -> Result<Vec<SearchResult>, ScrapeError> {
    let url = site.search_url(query);
    let doc = fetch_document(fetcher, site, &url, RequestKind::Search).await?;
    let results = extract_search(&doc, &site.search, &site.id_pattern);
    log::info!("{}: {} search results for '{}'", site.name, results.len(), query);
    Ok(results)
}

pub async fn read_chapter(
    fetcher: &PageFetcher,
    site: &Site,
    chapter_id: &str,
) -> Result<ChapterDetail, ScrapeError> {
    let decoded = percent_decode_str(chapter_id).decode_utf8_lossy();
    let url = site.read_url(&decoded);
    let doc = fetch_document(fetcher, site, &url, RequestKind::Read).await?;
    let chapter = extract_chapter(&doc, &site.reader, site.reader_strategy.as_ref(), &site.nav)?;
    log::info!("{}: {} images in {}", site.name, chapter.images.len(), url);
    Ok(chapter)
}

pub async fn detail(
    fetcher: &PageFetcher,
    site: &Site,
    id: &str,
) -> Result<TitleDetail, ScrapeError> {
    let url = site.detail_url(id);
    let doc = fetch_document(fetcher, site, &url, RequestKind::Detail).await?;
    let detail = extract_detail(&doc, &site.detail);
    log::info!("{}: {} chapters listed for {}", site.name, detail.chapters.len(), id);
    Ok(detail)
}
