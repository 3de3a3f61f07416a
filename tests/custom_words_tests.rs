use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_add_and_list_custom_words() {
    let app = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/api/words/custom/english",
        json!({ "word": "  dog ", "translation": " pies " }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([{ "word": "dog", "translation": "pies" }]));

    let (status, body) = common::get(&app, "/api/words/custom/english").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_rejects_blank_fields() {
    let app = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/api/words/custom/english",
        json!({ "word": "dog", "translation": "   " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_adding_same_word_overwrites_case_insensitively() {
    let app = common::create_test_app().await;

    common::post_json(
        &app,
        "/api/words/custom/english",
        json!({ "word": "Dog", "translation": "pies" }),
    )
    .await;
    let (_, body) = common::post_json(
        &app,
        "/api/words/custom/english",
        json!({ "word": "dog", "translation": "piesek" }),
    )
    .await;

    assert_eq!(body["data"], json!([{ "word": "dog", "translation": "piesek" }]));
}

#[tokio::test]
async fn test_bulk_import_parses_valid_lines() {
    let app = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/api/words/custom/spanish/import",
        json!({ "text": "gato,kot\nperro-pies\nbad line" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imported"], 2);
    let words = body["data"]["words"].as_array().unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0]["word"], "gato");
    assert_eq!(words[1]["translation"], "pies");
}

#[tokio::test]
async fn test_bulk_import_with_no_valid_lines_is_rejected() {
    let app = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/api/words/custom/spanish/import",
        json!({ "text": "no separators at all\nanother bad line" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Nothing was partially imported.
    let (_, body) = common::get(&app, "/api/words/custom/spanish").await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_delete_custom_word_is_case_insensitive() {
    let app = common::create_test_app().await;

    common::post_json(
        &app,
        "/api/words/custom/english",
        json!({ "word": "dog", "translation": "pies" }),
    )
    .await;
    let (status, body) = common::delete(&app, "/api/words/custom/english/DOG").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}
