//! MangaDex adapter tests against a loopback responder

use catalog::{CoverQuality, ErrorKind, MangaBrowser, MangaDexClient};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

mod common;
use common::{split_target, values, MockServer};

const POPULAR: &str = r#"{
    "result": "ok",
    "response": "collection",
    "data": [
        {
            "id": "801513ba-a712-498c-8f57-cae55b38cc92",
            "type": "manga",
            "attributes": {
                "title": {"en": "Berserk"},
                "altTitles": [{"ja": "ベルセルク"}],
                "description": {"en": "Guts, a former mercenary...", "pt-br": "Guts..."},
                "status": "hiatus",
                "year": 1989,
                "contentRating": "suggestive",
                "tags": [{"id": "t1", "type": "tag", "attributes": {"name": {"en": "Action"}, "group": "genre"}}]
            },
            "relationships": [
                {"id": "a1", "type": "author", "attributes": {"name": "Miura Kentarou"}},
                {"id": "a1", "type": "artist", "attributes": {"name": "Miura Kentarou"}},
                {"id": "c1", "type": "cover_art", "attributes": {"fileName": "cover.jpg"}},
                {"id": "r1", "type": "creator"}
            ]
        },
        {
            "id": "no-english-title",
            "type": "manga",
            "attributes": {"title": {"ja-ro": "Shingeki no Kyojin"}, "description": [], "status": "completed"},
            "relationships": []
        }
    ],
    "limit": 2,
    "offset": 4,
    "total": 95
}"#;

fn client(server: &MockServer) -> MangaDexClient {
    MangaDexClient::new(server.url("")).unwrap()
}

#[tokio::test]
async fn test_popular_listing_query_and_window() {
    let server = MockServer::fixed(200, POPULAR).await;

    let envelope = client(&server).list_popular(2, 4).await.unwrap();

    let window = envelope.offset_info().unwrap();
    assert_eq!((window.limit, window.offset, window.total), (2, 4, 95));
    assert!(window.has_next());
    assert_eq!(window.next_offset(), 6);

    let (path, query) = server.single_query();
    assert_eq!(path, "/manga");
    assert_eq!(values(&query, "limit"), vec!["2"]);
    assert_eq!(values(&query, "offset"), vec!["4"]);
    assert_eq!(values(&query, "order[followedCount]"), vec!["desc"]);
    assert_eq!(values(&query, "contentRating[]"), vec!["safe", "suggestive"]);
    assert_eq!(
        values(&query, "includes[]"),
        vec!["cover_art", "author", "artist"]
    );
}

#[tokio::test]
async fn test_listing_resolves_text_and_relationships() {
    let server = MockServer::fixed(200, POPULAR).await;

    let envelope = client(&server).list_popular(2, 4).await.unwrap();
    let berserk = &envelope.data[0];
    let titan = &envelope.data[1];

    assert_eq!(berserk.display_title(), "Berserk");
    assert_eq!(berserk.display_description(), "Guts, a former mercenary...");
    assert_eq!(berserk.authors(), vec!["Miura Kentarou"]);
    assert_eq!(berserk.artists(), vec!["Miura Kentarou"]);
    assert_eq!(berserk.tag_names(), vec!["Action"]);
    assert_eq!(berserk.cover_file(), Some("cover.jpg"));

    // No en/ja title: first available language wins
    assert_eq!(titan.display_title(), "Shingeki no Kyojin");
    assert_eq!(titan.display_description(), "No description available.");
    assert_eq!(titan.cover_file(), None);
}

#[tokio::test]
async fn test_search_puts_title_first() {
    let server = MockServer::fixed(
        200,
        r#"{"result": "ok", "data": [], "limit": 24, "offset": 0, "total": 0}"#,
    )
    .await;

    let envelope = client(&server).search("one piece", 24, 0).await.unwrap();
    assert!(envelope.data.is_empty());
    assert!(!envelope.offset_info().unwrap().has_next());

    let (path, query) = server.single_query();
    assert_eq!(path, "/manga");
    assert_eq!(query[0], ("title".to_string(), "one piece".to_string()));
    assert!(values(&query, "order[followedCount]").is_empty());
}

#[tokio::test]
async fn test_detail_and_cover_urls() {
    let server = MockServer::fixed(
        200,
        r#"{"result": "ok", "response": "entity", "data": {
            "id": "m1",
            "type": "manga",
            "attributes": {"title": {"ja": "ワンピース"}},
            "relationships": [{"id": "c", "type": "cover_art", "attributes": {"fileName": "f.png"}}]
        }}"#,
    )
    .await;
    let client = client(&server);

    let envelope = client.get_by_id("m1").await.unwrap();
    let manga = envelope.data;

    assert!(envelope.pagination.is_none());
    assert_eq!(manga.display_title(), "ワンピース");
    assert_eq!(
        manga.cover_url(client.uploads_url(), CoverQuality::Medium).as_deref(),
        Some("https://uploads.mangadex.org/covers/m1/f.png.512.jpg")
    );

    let (path, query) = server.single_query();
    assert_eq!(path, "/manga/m1");
    assert_eq!(
        values(&query, "includes[]"),
        vec!["cover_art", "author", "artist"]
    );
}

#[tokio::test]
async fn test_chapters_come_back_in_numeric_order() {
    let server = MockServer::fixed(
        200,
        r#"{"result": "ok", "data": [
            {"id": "c10", "attributes": {"chapter": "10", "translatedLanguage": "en"}},
            {"id": "os", "attributes": {"chapter": null, "translatedLanguage": "en"}},
            {"id": "c2", "attributes": {"chapter": "2", "translatedLanguage": "en"}},
            {"id": "c10.5", "attributes": {"chapter": "10.5", "translatedLanguage": "en"}},
            {"id": "c1", "attributes": {"chapter": "1", "title": "The Black Swordsman", "translatedLanguage": "en", "pages": 48}}
        ], "limit": 100, "offset": 0, "total": 5}"#,
    )
    .await;

    let envelope = client(&server).get_chapters("m1", 100, 0).await.unwrap();

    let ids: Vec<_> = envelope.data.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c10", "c10.5", "os"]);
    assert_eq!(envelope.data[4].display_number(), "Oneshot");
    assert_eq!(envelope.data[0].display_number(), "Chapter 1");

    let (path, query) = server.single_query();
    assert_eq!(path, "/manga/m1/feed");
    assert_eq!(values(&query, "translatedLanguage[]"), vec!["en"]);
    assert_eq!(values(&query, "order[chapter]"), vec!["asc"]);
}

#[tokio::test]
async fn test_unknown_manga_is_not_found() {
    let server = MockServer::fixed(
        404,
        r#"{"result": "error", "errors": [{"status": 404, "title": "Not found"}]}"#,
    )
    .await;

    let err = client(&server).get_by_id("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::fixed(429, "").await;

    let err = client(&server).list_popular(24, 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);
}

#[tokio::test]
async fn test_missing_data_is_malformed() {
    let server = MockServer::fixed(200, r#"{"result": "ok"}"#).await;

    let err = client(&server).list_popular(24, 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

/// Offset window echoing the requested limit and offset over 50 results
fn fifty_results(target: &str) -> (u16, String) {
    let (_, query) = split_target(target);
    let limit = values(&query, "limit").first().copied().unwrap_or("0").to_string();
    let offset = values(&query, "offset").first().copied().unwrap_or("0").to_string();
    let body = format!(
        r#"{{"result": "ok", "data": [], "limit": {}, "offset": {}, "total": 50}}"#,
        limit, offset
    );
    (200, body)
}

#[tokio::test]
async fn test_browser_pages_through_popular_listing() {
    let server = MockServer::start(fifty_results).await;
    let client = client(&server);
    let token = CancellationToken::new();
    let mut browser = MangaBrowser::default();

    browser.fetch(&client, &token).await.unwrap();
    assert_eq!(browser.total(), 50);
    assert!(browser.has_next());
    assert!(browser.next_page());
    assert_eq!(browser.offset(), 24);

    browser.fetch(&client, &token).await.unwrap();
    assert_eq!(browser.page(), 2);
    assert!(browser.has_next());

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    let (path, query) = split_target(&requests[1]);
    assert_eq!(path, "/manga");
    assert_eq!(values(&query, "offset"), vec!["24"]);
    assert_eq!(values(&query, "limit"), vec!["24"]);
    assert_eq!(values(&query, "order[followedCount]"), vec!["desc"]);
}

#[tokio::test]
async fn test_browser_search_and_blank_query_fallback() {
    let server = MockServer::start(fifty_results).await;
    let client = client(&server);
    let token = CancellationToken::new();
    let mut browser = MangaBrowser::default();

    browser.search("berserk");
    browser.fetch(&client, &token).await.unwrap();
    assert_eq!(browser.total(), 50);

    browser.search("");
    assert_eq!(browser.total(), 0);
    browser.fetch(&client, &token).await.unwrap();

    let requests = server.requests();
    let (_, query) = split_target(&requests[0]);
    assert_eq!(values(&query, "title"), vec!["berserk"]);
    assert!(values(&query, "order[followedCount]").is_empty());

    let (_, query) = split_target(&requests[1]);
    assert!(values(&query, "title").is_empty());
    assert_eq!(values(&query, "order[followedCount]"), vec!["desc"]);
    assert_eq!(values(&query, "offset"), vec!["0"]);
}

#[tokio::test]
async fn test_requests_are_not_delayed() {
    let server = MockServer::fixed(
        200,
        r#"{"result": "ok", "data": [], "limit": 24, "offset": 0, "total": 0}"#,
    )
    .await;
    let client = client(&server);

    let start = Instant::now();
    client.list_popular(24, 0).await.unwrap();
    client.list_popular(24, 24).await.unwrap();

    assert!(start.elapsed() < Duration::from_millis(250));
    assert_eq!(server.requests().len(), 2);
}
