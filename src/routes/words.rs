use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fiszki_core::{Language, Level, Word, WordCategory};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWordsRequest {
    language: Language,
    level: Level,
    category: Option<WordCategory>,
}

/// Generates a word list for the selection. Generation failures are
/// absorbed by the fallback list, so this never errors.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateWordsRequest>,
) -> Response {
    let words = state
        .word_source()
        .generate(req.language, req.level, req.category)
        .await;

    Json(SuccessResponse {
        success: true,
        data: words,
    })
    .into_response()
}

pub async fn unknown_words(
    State(state): State<AppState>,
    Path(language): Path<String>,
) -> Response {
    let language = match super::parse_language(&language) {
        Ok(language) => language,
        Err(err) => return err.into_response(),
    };

    let words: Vec<Word> = state
        .store()
        .get(language, crate::store::ListKind::Unknown);

    Json(SuccessResponse {
        success: true,
        data: words,
    })
    .into_response()
}
