/// End-to-end route tests against a mocked upstream site
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use httpmock::prelude::*;
use manhwa_scraper_api::app_state::AppState;
use manhwa_scraper_api::config::Config;
use manhwa_scraper_api::response;
use manhwa_scraper_api::routes;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

fn config_for(base_url: &str, timeout_secs: u64) -> Config {
    let mut config = Config::default();
    config.fetch.search_delay_ms = 0;
    config.fetch.read_delay_ms = 0;
    config.fetch.detail_delay_ms = 0;
    config.fetch.timeout_secs = timeout_secs;
    config.sources.komikstation.base_url = base_url.to_string();
    config.sources.wp_manga.base_url = base_url.to_string();
    config
}

fn state(config: &Config) -> web::Data<AppState> {
    web::Data::new(AppState::from_config(config).expect("test state"))
}

fn state_for(base_url: &str, timeout_secs: u64) -> web::Data<AppState> {
    state(&config_for(base_url, timeout_secs))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .wrap(routes::cors_headers())
                .configure(routes::configure),
        )
        .await
    };
}

const SEARCH_PAGE: &str = r#"<html><body><div class="listupd">
  <div class="bs"><div class="bsx"><a href="https://komikstation.org/manga/solo-leveling/" title="Solo Leveling">
    <img src="https://cdn/sl.jpg"><div class="epxs">Chapter 200</div><div class="numscore">9.10</div></a></div></div>
  <div class="bs"><div class="bsx"><a href="https://komikstation.org/manga/solo-max-level-newbie/" title="Solo Max-Level Newbie">
    <img src="https://cdn/smln.jpg"><div class="epxs">Chapter 150</div></a></div></div>
</div></body></html>"#;

#[actix_web::test]
async fn test_search_route() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("s", "solo leveling");
            then.status(200).header("content-type", "text/html").body(SEARCH_PAGE);
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get().uri("/search/solo%20leveling").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "results": [
                {
                    "title": "Solo Leveling",
                    "manhwa_id": "solo-leveling",
                    "image": "https://cdn/sl.jpg",
                    "latest_chapter": "Chapter 200",
                    "rating": "9.10"
                },
                {
                    "title": "Solo Max-Level Newbie",
                    "manhwa_id": "solo-max-level-newbie",
                    "image": "https://cdn/smln.jpg",
                    "latest_chapter": "Chapter 150",
                    "rating": ""
                }
            ]
        })
    );
    upstream.assert_async().await;
}

#[actix_web::test]
async fn test_search_without_results_is_success() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("<html><body><div class=\"listupd\"></div></body></html>");
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get().uri("/search/nothing").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "results": [] }));
}

#[actix_web::test]
async fn test_search_upstream_error_status() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(503).body("Service Unavailable");
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get().uri("/search/solo").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": response::SEARCH_FAILED }));
    // A failed fetch is not retried
    upstream.assert_hits_async(1).await;
}

#[actix_web::test]
async fn test_search_waits_before_fetching() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(SEARCH_PAGE);
        })
        .await;

    let mut config = config_for(&server.base_url(), 5);
    config.fetch.search_delay_ms = 200;
    let app = app!(state(&config));

    let started = Instant::now();
    let req = test::TestRequest::get().uri("/search/solo").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(200));
    upstream.assert_hits_async(1).await;
}

#[actix_web::test]
async fn test_read_route_with_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/solo-leveling-chapter-1");
            then.status(200).body(
                r#"<html><body><h1 class="entry-title">Solo Leveling Chapter 1</h1>
                   <script>ts_reader.run({"sources":[{"images":["a.jpg","b.jpg"]}]})</script></body></html>"#,
            );
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get().uri("/read/solo-leveling-chapter-1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "title": "Solo Leveling Chapter 1",
            "images": [{ "index": 1, "url": "a.jpg" }, { "index": 2, "url": "b.jpg" }],
            "prev_chapter": null,
            "next_chapter": null
        })
    );
}

#[actix_web::test]
async fn test_read_navigation_ids() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/solo-leveling-chapter-2/");
            then.status(200).body(
                r#"<h1 class="entry-title">Chapter 2</h1>
                   <a class="ch-prev-btn" href="/solo-leveling-chapter-1/">Prev</a>
                   <a class="ch-next-btn" href="solo-leveling-chapter-3/">Next</a>
                   <script>ts_reader.run({"sources":[{"images":["c.jpg"]}]});</script>"#,
            );
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get().uri("/read/solo-leveling-chapter-2/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["prev_chapter"], "solo-leveling-chapter-1/");
    assert_eq!(body["next_chapter"], "solo-leveling-chapter-3/");
}

#[actix_web::test]
async fn test_read_without_reader_script_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/some-chapter");
            then.status(200).body("<html><body><h1 class=\"entry-title\">Chapter</h1></body></html>");
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get().uri("/read/some-chapter").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": response::READ_NOT_FOUND, "images": [] }));
}

#[actix_web::test]
async fn test_read_malformed_payload_is_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/broken-chapter");
            then.status(200).body(r#"<script>ts_reader.run({"sources":[{"images":['a.jpg']}]});</script>"#);
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get().uri("/read/broken-chapter").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": response::READ_PARSE_FAILED, "images": [] }));
}

#[actix_web::test]
async fn test_search_upstream_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).delay(Duration::from_secs(3)).body(SEARCH_PAGE);
        })
        .await;

    let app = app!(state_for(&server.base_url(), 1));
    let req = test::TestRequest::get().uri("/search/solo").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": response::SEARCH_FAILED }));
}

#[actix_web::test]
async fn test_detail_route() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manga/solo-leveling");
            then.status(200).body(
                r#"<div class="thumb"><img src="https://cdn/cover.jpg"></div>
                   <div class="infox"><h1 class="entry-title">Solo Leveling</h1>
                     <div class="info-content"><span class="info-label">Type:</span><span class="info-value">Manhwa</span></div>
                     <div class="info-content"><span class="info-label">Status:</span><span class="info-value">Completed</span></div>
                   </div>
                   <div class="entry-content"><p>Hunters and gates.</p></div>
                   <div id="chapterlist"><ul>
                     <li><a href="https://komikstation.org/solo-leveling-chapter-2/">Chapter 2</a><span class="chapterdate">May 2</span></li>
                     <li><a href="https://komikstation.org/solo-leveling-chapter-1/">Chapter 1</a></li>
                   </ul></div>"#,
            );
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get().uri("/detail/solo-leveling").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Solo Leveling");
    assert_eq!(body["image"], "https://cdn/cover.jpg");
    assert_eq!(body["synopsis"], "Hunters and gates.");
    assert_eq!(body["metadata"], json!({ "type": "Manhwa", "status": "Completed" }));
    let keys: Vec<_> = body["metadata"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["type", "status"]);
    assert_eq!(
        body["chapters"],
        json!([
            { "title": "Chapter 2", "url": "https://komikstation.org/solo-leveling-chapter-2/", "date": "May 2" },
            { "title": "Chapter 1", "url": "https://komikstation.org/solo-leveling-chapter-1/", "date": "" }
        ])
    );
}

#[actix_web::test]
async fn test_wp_manga_read_route() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manga/martial-peak/chapter-10/");
            then.status(200).body(
                r#"<h1 id="chapter-heading">Martial Peak - Chapter 10</h1>
                   <div class="reading-content"><img data-src="https://cdn/01.jpg"><img src="https://cdn/02.jpg"></div>
                   <div class="nav-next"><a href="https://firescans.xyz/manga/martial-peak/chapter-11/">Next</a></div>"#,
            );
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get()
        .uri("/wp_manga/read/martial-peak/chapter-10")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "title": "Martial Peak - Chapter 10",
            "images": [{ "index": 1, "url": "https://cdn/01.jpg" }, { "index": 2, "url": "https://cdn/02.jpg" }],
            "prevLink": null,
            "nextLink": "martial-peak/chapter-11"
        })
    );
}

#[actix_web::test]
async fn test_wp_manga_read_error_nulls_navigation() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manga/martial-peak/chapter-0/");
            then.status(404).body("Not Found");
        })
        .await;

    let app = app!(state_for(&server.base_url(), 5));
    let req = test::TestRequest::get().uri("/wp_manga/read/martial-peak/chapter-0").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "error": response::READ_FAILED, "images": [], "prevLink": null, "nextLink": null })
    );
}

#[actix_web::test]
async fn test_unknown_source() {
    let app = app!(state_for("http://127.0.0.1:9", 1));
    let req = test::TestRequest::get().uri("/mangadex/search/x").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": response::UNKNOWN_SOURCE }));
}

#[actix_web::test]
async fn test_cors_headers_and_preflight() {
    let app = app!(state_for("http://127.0.0.1:9", 1));

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/search/anything")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let headers = resp.headers();
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    assert_eq!(header("access-control-allow-origin").as_deref(), Some("*"));
    assert_eq!(
        header("access-control-allow-methods").as_deref(),
        Some("GET, POST, PUT, DELETE, OPTIONS")
    );
    assert_eq!(
        header("access-control-allow-headers").as_deref(),
        Some("Content-Type, Authorization")
    );
    assert_eq!(header("access-control-allow-credentials").as_deref(), Some("true"));
    assert_eq!(header("access-control-max-age").as_deref(), Some("86400"));

    let body = test::read_body(resp).await;
    assert!(body.is_empty());

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"manhwa_scraper_api: komikstation, wp_manga");
}
