//! WP-Manga (Madara theme) sites. Page images are plain `<img>` nodes in the
//! reading area, often lazy-loaded, and navigation ids are `slug/chapter`.

use super::{parse_base, InvalidBaseUrl, Site, SitePaths, WaitSelectors};
use crate::config::SiteConfig;
use crate::document::Field;
use crate::extract::{DetailSelectors, DomImages, NavRule, ReaderSelectors, SearchSelectors};
use crate::ids::{pattern, LISTING_ID_PATTERN};
use crate::response::WireSchema;

pub const NAME: &str = "wp_manga";
pub const BASE_URL: &str = "https://firescans.xyz";

/// `manga/<slug>/<chapter>/` -> `<slug>/<chapter>`
pub const CHAPTER_ID_PATTERN: &str = r"manga/([^/]+/[^/?#]+)/?$";

const IMAGE_ATTRS: &[&str] = &["src", "data-src", "data-lazy-src"];

pub const SEARCH: SearchSelectors = SearchSelectors {
    card: "div.c-tabs-item__content, div.page-item-detail",
    link: ".post-title a, h3 a",
    title: Field::text(".post-title a, h3 a"),
    image: Field::first_attr("img", IMAGE_ATTRS),
    latest_chapter: Field::text(".latest-chap .chapter a, .chapter-item .chapter a"),
    rating: Field::text(".score"),
};

pub const READER: ReaderSelectors = ReaderSelectors {
    title: Field::text("h1#chapter-heading"),
    prev: Field::attr(".nav-previous a, a.prev_page", "href"),
    next: Field::attr(".nav-next a, a.next_page", "href"),
};

pub const READER_IMAGES: &str = "div.reading-content img";

pub const DETAIL: DetailSelectors = DetailSelectors {
    title: Field::text(".post-title h1"),
    image: Field::first_attr(".summary_image img", IMAGE_ATTRS),
    synopsis: Field::text(".description-summary .summary__content"),
    info_item: ".post-content_item",
    info_label: Field::text(".summary-heading"),
    info_value: Field::text(".summary-content"),
    chapter_item: "li.wp-manga-chapter",
    chapter_title: Field::text("a"),
    chapter_url: Field::attr("a", "href"),
    chapter_date: Field::text(".chapter-release-date"),
};

pub const SCHEMA: WireSchema = WireSchema {
    id_key: "manga_id",
    prev_key: "prevLink",
    next_key: "nextLink",
    null_nav_on_error: true,
};

pub fn site(config: &SiteConfig) -> Result<Site, InvalidBaseUrl> {
    Ok(Site {
        name: NAME,
        base_url: parse_base(NAME, &config.base_url)?,
        paths: SitePaths {
            search_params: &[("post_type", "wp-manga")],
            read: "manga/{id}/",
            detail: "manga/{id}/",
        },
        strategy: config.strategy,
        wait_for: WaitSelectors {
            search: "div.c-tabs-item, div.page-item-detail",
            read: READER_IMAGES,
            detail: ".post-title h1",
        },
        search: SEARCH,
        id_pattern: pattern(LISTING_ID_PATTERN),
        reader: READER,
        reader_strategy: Box::new(DomImages {
            selector: READER_IMAGES,
            url_attrs: IMAGE_ATTRS,
        }),
        nav: NavRule::Pattern(pattern(CHAPTER_ID_PATTERN)),
        detail: DETAIL,
        schema: SCHEMA,
    })
}
