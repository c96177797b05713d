use crate::document::{Document, Field};
use crate::models::{ChapterEntry, TitleDetail};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy)]
pub struct DetailSelectors {
    pub title: Field,
    pub image: Field,
    pub synopsis: Field,
    /// Each label/value pair of the info block
    pub info_item: &'static str,
    pub info_label: Field,
    pub info_value: Field,
    pub chapter_item: &'static str,
    pub chapter_title: Field,
    pub chapter_url: Field,
    pub chapter_date: Field,
}

/// Metadata key for a label: trimmed, lowercased, one trailing colon removed
pub fn normalize_label(label: &str) -> String {
    let lower = label.trim().to_lowercase();
    lower.strip_suffix(':').unwrap_or(&lower).trim().to_string()
}

pub fn extract_detail(doc: &Document, selectors: &DetailSelectors) -> TitleDetail {
    let mut metadata = IndexMap::new();
    for item in doc.query_all(selectors.info_item) {
        let key = normalize_label(&selectors.info_label.or_default(&item));
        if key.is_empty() {
            continue;
        }
        // IndexMap keeps the first position and takes the later value
        metadata.insert(key, selectors.info_value.or_default(&item));
    }

    let chapters = doc
        .query_all(selectors.chapter_item)
        .iter()
        .map(|li| ChapterEntry {
            title: selectors.chapter_title.or_default(li),
            url: selectors.chapter_url.or_default(li),
            date: selectors.chapter_date.or_default(li),
        })
        .collect();

    TitleDetail {
        title: selectors.title.or_default(doc),
        image_url: selectors.image.or_default(doc),
        synopsis: selectors.synopsis.or_default(doc),
        metadata,
        chapters,
    }
}
