mod common;

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use serde_json::json;

fn server() -> TestServer {
    common::create_test_server(common::create_test_state())
}

#[tokio::test]
async fn test_reaction_end_to_end() {
    let server = server();

    let response = server
        .post("/example.com")
        .json(&json!({ "emoji": "😀" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.assert_text("OK");

    let response = server
        .post("/example.com")
        .json(&json!({ "emoji": "😀" }))
        .await;
    response.assert_status_ok();

    let response = server.get("/example.com").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "😀": 2 }));

    let response = server.get("/example.com/%F0%9F%A5%B0").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_page_url_and_hostname_share_counters() {
    let server = server();

    server
        .post("/https%3A%2F%2Fexample.com%2Fposts%2Fhello%3Fref%3Dx")
        .text("🎉")
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/Example.COM")
        .text("🎉")
        .await
        .assert_status_ok();

    server
        .get("/example.com")
        .await
        .assert_json(&json!({ "🎉": 2 }));
}

#[tokio::test]
async fn test_form_payload() {
    let server = server();

    server
        .post("/example.com")
        .form(&[("emoji", "👍🏽")])
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/example.com/%F0%9F%91%8D%F0%9F%8F%BD").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "👍🏽": 1 }));
}

#[tokio::test]
async fn test_raw_payload_takes_first_emoji() {
    let server = server();

    server
        .post("/example.com")
        .bytes(Bytes::from("🥰🥰🥰 lovely"))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .get("/example.com")
        .await
        .assert_json(&json!({ "🥰": 1 }));
}

#[tokio::test]
async fn test_json_acknowledgement() {
    let server = server();

    let response = server
        .post("/example.com")
        .add_header(header::ACCEPT, HeaderValue::from_static("application/json"))
        .text("😀")
        .await;

    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({ "emoji": "😀", "count": 1, "created": true }));

    let response = server
        .post("/example.com")
        .add_header(header::ACCEPT, HeaderValue::from_static("application/json"))
        .text("😀")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["count"], 2);
    assert_eq!(json["created"], false);
}

#[tokio::test]
async fn test_rejects_body_without_emoji() {
    let server = server();

    let response = server.post("/example.com").text("hello").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "no emoji found");

    server
        .get("/example.com")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_rejects_invalid_json() {
    let server = server();

    server
        .post("/example.com")
        .json(&json!({ "emoji": "" }))
        .await
        .assert_status_bad_request();

    server
        .post("/example.com")
        .json(&json!({ "reaction": "😀" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_rejects_path_without_hostname() {
    let server = server();

    let response = server.post("/not%20a%20url").text("😀").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "no hostname found");
}

#[tokio::test]
async fn test_invalid_subdomain_does_not_count_for_parent() {
    let server = server();

    let response = server
        .post("/https%3A%2F%2Fmy_site.example.com%2F")
        .text("😀")
        .await;
    response.assert_status_bad_request();

    server
        .post("/https%3A%2F%2Fsite.example.com%2F")
        .text("😀")
        .await
        .assert_status(StatusCode::CREATED);

    server
        .get("/site.example.com")
        .await
        .assert_json(&json!({ "😀": 1 }));
}

#[tokio::test]
async fn test_rejects_oversized_body() {
    let server = server();

    let body = "😀".repeat(common::MAX_PAYLOAD_BYTES);
    let response = server.post("/example.com").text(body).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

    server
        .get("/example.com")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_read_unknown_site() {
    let server = server();

    let response = server.get("/unknown.example.org").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_read_single_emoji_rejects_text() {
    let server = server();

    server.post("/example.com").text("😀").await;

    server
        .get("/example.com/heart")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_reads_are_cacheable() {
    let server = server();

    server.post("/example.com").text("😀").await;

    let response = server.get("/example.com").await;
    assert_eq!(
        response.header(header::CACHE_CONTROL),
        format!("public, max-age={}", common::READ_MAX_AGE_SECS)
    );

    let response = server.get("/example.com/%F0%9F%98%80").await;
    assert_eq!(
        response.header(header::CACHE_CONTROL),
        format!("public, max-age={}", common::READ_MAX_AGE_SECS)
    );
}

#[tokio::test]
async fn test_emojis_counted_separately() {
    let server = server();

    for emoji in ["😀", "😀", "🎉", "🇳🇱"] {
        server.post("/example.com").text(emoji).await;
    }

    server
        .get("/example.com")
        .await
        .assert_json(&json!({ "😀": 2, "🎉": 1, "🇳🇱": 1 }));
}
