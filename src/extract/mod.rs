//! Field extractors: one per output record, parameterized by a site's selector map

pub mod chapter;
pub mod detail;
pub mod search;

pub use chapter::{
    extract_chapter, DomImages, NavRule, ReaderSelectors, ReaderStrategy, ScriptPayload,
};
pub use detail::{extract_detail, normalize_label, DetailSelectors};
pub use search::{extract_search, SearchSelectors};
