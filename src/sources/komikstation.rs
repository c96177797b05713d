//! Komikstation (MangaReader theme): reader images come from an inline
//! `ts_reader.run(...)` payload.

use super::{parse_base, InvalidBaseUrl, Site, SitePaths, WaitSelectors};
use crate::config::SiteConfig;
use crate::document::Field;
use crate::extract::{DetailSelectors, NavRule, ReaderSelectors, ScriptPayload, SearchSelectors};
use crate::ids::{pattern, LISTING_ID_PATTERN};
use crate::response::WireSchema;

pub const NAME: &str = "komikstation";
pub const BASE_URL: &str = "https://komikstation.org";
pub const READER_MARKER: &str = "ts_reader.run";

pub const SEARCH: SearchSelectors = SearchSelectors {
    card: ".bsx",
    link: "a",
    title: Field::attr("a", "title"),
    image: Field::attr("img", "src"),
    latest_chapter: Field::text(".epxs"),
    rating: Field::text(".numscore"),
};

pub const READER: ReaderSelectors = ReaderSelectors {
    title: Field::text("h1.entry-title"),
    prev: Field::attr(".ch-prev-btn", "href"),
    next: Field::attr(".ch-next-btn", "href"),
};

pub const DETAIL: DetailSelectors = DetailSelectors {
    title: Field::text(".entry-title"),
    image: Field::attr(".thumb img", "src"),
    synopsis: Field::text(".entry-content p"),
    info_item: ".infox .info-content",
    info_label: Field::text(".info-label"),
    info_value: Field::text(".info-value"),
    chapter_item: "#chapterlist li",
    chapter_title: Field::text("a"),
    chapter_url: Field::attr("a", "href"),
    chapter_date: Field::text(".chapterdate"),
};

pub const SCHEMA: WireSchema = WireSchema {
    id_key: "manhwa_id",
    prev_key: "prev_chapter",
    next_key: "next_chapter",
    null_nav_on_error: false,
};

pub fn site(config: &SiteConfig) -> Result<Site, InvalidBaseUrl> {
    let base_url = parse_base(NAME, &config.base_url)?;

    Ok(Site {
        name: NAME,
        nav: NavRule::ResolvePath(base_url.clone()),
        base_url,
        paths: SitePaths {
            search_params: &[],
            read: "{id}",
            detail: "manga/{id}",
        },
        strategy: config.strategy,
        wait_for: WaitSelectors {
            search: "body",
            read: "h1.entry-title",
            detail: ".entry-title",
        },
        search: SEARCH,
        id_pattern: pattern(LISTING_ID_PATTERN),
        reader: READER,
        reader_strategy: Box::new(ScriptPayload::new(READER_MARKER)),
        detail: DETAIL,
        schema: SCHEMA,
    })
}
