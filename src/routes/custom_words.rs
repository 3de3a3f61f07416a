use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fiszki_core::{import, Word};
use serde::{Deserialize, Serialize};

use crate::response::AppError;
use crate::state::AppState;
use crate::store::ListKind;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWordRequest {
    word: String,
    translation: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportResponse {
    imported: usize,
    words: Vec<Word>,
}

pub async fn list(State(state): State<AppState>, Path(language): Path<String>) -> Response {
    let language = match super::parse_language(&language) {
        Ok(language) => language,
        Err(err) => return err.into_response(),
    };

    Json(SuccessResponse {
        success: true,
        data: state.store().get(language, ListKind::Custom),
    })
    .into_response()
}

pub async fn add(
    State(state): State<AppState>,
    Path(language): Path<String>,
    Json(req): Json<AddWordRequest>,
) -> Response {
    let language = match super::parse_language(&language) {
        Ok(language) => language,
        Err(err) => return err.into_response(),
    };

    let text = req.word.trim();
    let translation = req.translation.trim();
    if text.is_empty() || translation.is_empty() {
        return AppError::validation("Słowo i tłumaczenie nie mogą być puste").into_response();
    }

    let store = state.store();
    store.add(language, ListKind::Custom, &[Word::new(text, translation)]);

    Json(SuccessResponse {
        success: true,
        data: store.get(language, ListKind::Custom),
    })
    .into_response()
}

/// Bulk import: one entry per line, fields separated by a comma,
/// semicolon or hyphen. An import yielding no valid entries is rejected
/// wholesale.
pub async fn import(
    State(state): State<AppState>,
    Path(language): Path<String>,
    Json(req): Json<ImportRequest>,
) -> Response {
    let language = match super::parse_language(&language) {
        Ok(language) => language,
        Err(err) => return err.into_response(),
    };

    let words = import::parse_word_list(&req.text);
    if words.is_empty() {
        return AppError::validation(
            "Nie znaleziono poprawnych par \"słowo - tłumaczenie\". \
             Użyj formatu: słowo,tłumaczenie (jedno na linię).",
        )
        .into_response();
    }

    let store = state.store();
    store.add(language, ListKind::Custom, &words);

    Json(SuccessResponse {
        success: true,
        data: ImportResponse {
            imported: words.len(),
            words: store.get(language, ListKind::Custom),
        },
    })
    .into_response()
}

pub async fn remove(
    State(state): State<AppState>,
    Path((language, word)): Path<(String, String)>,
) -> Response {
    let language = match super::parse_language(&language) {
        Ok(language) => language,
        Err(err) => return err.into_response(),
    };

    let store = state.store();
    store.remove(language, ListKind::Custom, &[Word::new(word, "")]);

    Json(SuccessResponse {
        success: true,
        data: store.get(language, ListKind::Custom),
    })
    .into_response()
}
