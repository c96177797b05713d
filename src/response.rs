//! JSON response contract.
//!
//! Records are mapped onto each site's wire keys here. Error bodies carry a
//! fixed message per route; underlying causes are only logged.

use crate::error::FailureKind;
use crate::models::{ChapterDetail, SearchResult, TitleDetail};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::{json, Map, Value};

pub const SEARCH_FAILED: &str = "An error occurred during the search.";
pub const SEARCH_NOT_FOUND: &str = "Search results not found.";
pub const READ_FAILED: &str = "An error occurred while fetching the chapter.";
pub const READ_PARSE_FAILED: &str = "Error parsing reader data";
pub const READ_NOT_FOUND: &str = "Reader data not found";
pub const DETAIL_FAILED: &str = "An error occurred while fetching manga details.";
pub const DETAIL_NOT_FOUND: &str = "Manga details not found.";
pub const UNKNOWN_SOURCE: &str = "Unknown source";

/// Output field names that differ between site profiles
#[derive(Debug, Clone, Copy)]
pub struct WireSchema {
    pub id_key: &'static str,
    pub prev_key: &'static str,
    pub next_key: &'static str,
    /// Whether reader error bodies also carry null navigation keys
    pub null_nav_on_error: bool,
}

#[derive(Debug)]
pub struct Shaped {
    pub status: StatusCode,
    pub body: Value,
}

impl Shaped {
    fn ok(body: Value) -> Self {
        Self { status: StatusCode::OK, body }
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status).json(self.body)
    }
}

fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::Fetch | FailureKind::Parse => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn search_ok(schema: &WireSchema, results: &[SearchResult]) -> Shaped {
    let results: Vec<Value> = results
        .iter()
        .map(|r| {
            let mut obj = Map::new();
            obj.insert("title".into(), json!(r.title));
            obj.insert(schema.id_key.into(), json!(r.id));
            obj.insert("image".into(), json!(r.image_url));
            obj.insert("latest_chapter".into(), json!(r.latest_chapter));
            obj.insert("rating".into(), json!(r.rating));
            Value::Object(obj)
        })
        .collect();
    Shaped::ok(json!({ "results": results }))
}

pub fn search_err(kind: FailureKind) -> Shaped {
    let message = match kind {
        FailureKind::NotFound => SEARCH_NOT_FOUND,
        FailureKind::Fetch | FailureKind::Parse => SEARCH_FAILED,
    };
    Shaped {
        status: status_for(kind),
        body: json!({ "error": message }),
    }
}

pub fn read_ok(schema: &WireSchema, chapter: &ChapterDetail) -> Shaped {
    let mut obj = Map::new();
    obj.insert("title".into(), json!(chapter.title));
    obj.insert("images".into(), json!(chapter.images));
    obj.insert(schema.prev_key.into(), json!(chapter.prev_chapter_id));
    obj.insert(schema.next_key.into(), json!(chapter.next_chapter_id));
    Shaped::ok(Value::Object(obj))
}

pub fn read_err(schema: &WireSchema, kind: FailureKind) -> Shaped {
    let message = match kind {
        FailureKind::Fetch => READ_FAILED,
        FailureKind::Parse => READ_PARSE_FAILED,
        FailureKind::NotFound => READ_NOT_FOUND,
    };
    let mut obj = Map::new();
    obj.insert("error".into(), json!(message));
    obj.insert("images".into(), json!([]));
    if schema.null_nav_on_error {
        obj.insert(schema.prev_key.into(), Value::Null);
        obj.insert(schema.next_key.into(), Value::Null);
    }
    Shaped {
        status: status_for(kind),
        body: Value::Object(obj),
    }
}

pub fn detail_ok(detail: &TitleDetail) -> Shaped {
    Shaped::ok(json!({
        "title": detail.title,
        "image": detail.image_url,
        "synopsis": detail.synopsis,
        "metadata": detail.metadata,
        "chapters": detail.chapters,
    }))
}

pub fn detail_err(kind: FailureKind) -> Shaped {
    let message = match kind {
        FailureKind::NotFound => DETAIL_NOT_FOUND,
        FailureKind::Fetch | FailureKind::Parse => DETAIL_FAILED,
    };
    Shaped {
        status: status_for(kind),
        body: json!({ "error": message }),
    }
}

pub fn unknown_source() -> Shaped {
    Shaped {
        status: StatusCode::NOT_FOUND,
        body: json!({ "error": UNKNOWN_SOURCE }),
    }
}
