use crate::document::{Document, Field};
use crate::ids::listing_id;
use crate::models::SearchResult;
use regex::Regex;

/// Where each search-result field lives inside a card
#[derive(Debug, Clone, Copy)]
pub struct SearchSelectors {
    pub card: &'static str,
    /// Anchor carrying the detail link
    pub link: &'static str,
    pub title: Field,
    pub image: Field,
    pub latest_chapter: Field,
    pub rating: Field,
}

/// One record per card, in document order; partial cards are kept
pub fn extract_search(
    doc: &Document,
    selectors: &SearchSelectors,
    id_pattern: &Regex,
) -> Vec<SearchResult> {
    doc.query_all(selectors.card)
        .iter()
        .map(|card| {
            let href = card
                .query(selectors.link)
                .and_then(|a| a.attr("href"))
                .unwrap_or("");

            SearchResult {
                title: selectors.title.or_default(card),
                id: listing_id(href, id_pattern),
                image_url: selectors.image.or_default(card),
                latest_chapter: selectors.latest_chapter.or_default(card),
                rating: selectors.rating.or_default(card),
            }
        })
        .collect()
}
