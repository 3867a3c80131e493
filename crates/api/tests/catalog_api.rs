//! Catalog and prompt enhancement endpoints. Neither touches the database.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_app, get, lazy_pool, post_json, send, test_config, StubImages, StubText, ENHANCED};
use serde_json::json;

fn app(text_fails: bool) -> axum::Router {
    build_app(
        lazy_pool(),
        test_config(),
        Arc::new(StubText { fail: text_fails }),
        StubImages::working(),
    )
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_full_catalog() {
    let response = get(app(false), "/api/characters").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let characters = json.as_array().unwrap();
    assert_eq!(characters.len(), 16);
    assert_eq!(characters[0]["id"], "naruto");
    assert!(characters[0]["imageUrl"].is_string());
    assert!(characters[0]["basePrompt"].is_string());
}

#[tokio::test]
async fn filters_catalog_by_category() {
    let json = body_json(get(app(false), "/api/characters?category=games").await).await;
    let characters = json.as_array().unwrap();
    assert!(!characters.is_empty());
    assert!(characters.iter().all(|c| c["category"] == "games"));
    assert!(characters.iter().any(|c| c["id"] == "mario"));
}

#[tokio::test]
async fn unknown_category_returns_400() {
    let response = get(app(false), "/api/characters?category=cartoons").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Prompt enhancement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn enhance_prompt_returns_provider_text() {
    let response = post_json(
        app(false),
        "/api/enhance-prompt",
        json!({"prompt": "a plumber", "characters": ["mario"], "style": "chibi"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["enhancedPrompt"], ENHANCED);
}

#[tokio::test]
async fn enhance_prompt_falls_back_to_input_on_provider_error() {
    let response = post_json(
        app(true),
        "/api/enhance-prompt",
        json!({"prompt": "a plumber", "characters": ["mario"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["enhancedPrompt"], "a plumber");
}

#[tokio::test]
async fn enhance_prompt_without_prompt_returns_400() {
    for body in [json!({"characters": ["mario"]}), json!({"prompt": "  "})] {
        let response = post_json(app(false), "/api/enhance-prompt", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/enhance-prompt")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = send(app(false), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
