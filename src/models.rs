use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One search result card
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub id: String,
    pub image_url: String,
    pub latest_chapter: String,
    pub rating: String,
}

/// A page image; `index` is 1-based in document order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChapterImage {
    pub index: usize,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ChapterDetail {
    pub title: String,
    pub images: Vec<ChapterImage>,
    pub prev_chapter_id: Option<String>,
    pub next_chapter_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ChapterEntry {
    pub title: String,
    pub url: String,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TitleDetail {
    pub title: String,
    pub image_url: String,
    pub synopsis: String,
    /// Lowercased label -> value, in document order
    pub metadata: IndexMap<String, String>,
    pub chapters: Vec<ChapterEntry>,
}
