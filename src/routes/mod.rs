mod custom_words;
mod health;
mod sessions;
mod words;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;

use fiszki_core::Language;

use crate::response::{json_error, AppError};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .route("/api/words/generate", post(words::generate))
        .route("/api/words/unknown/:language", get(words::unknown_words))
        .route(
            "/api/words/custom/:language",
            get(custom_words::list).post(custom_words::add),
        )
        .route(
            "/api/words/custom/:language/import",
            post(custom_words::import),
        )
        .route(
            "/api/words/custom/:language/:word",
            delete(custom_words::remove),
        )
        .route("/api/sessions", post(sessions::create))
        .route(
            "/api/sessions/:id",
            get(sessions::snapshot).delete(sessions::discard),
        )
        .route("/api/sessions/:id/judge", post(sessions::judge))
        .route("/api/sessions/:id/flip", post(sessions::flip))
        .route("/api/sessions/:id/advance", post(sessions::advance))
        .route("/api/sessions/:id/next-block", post(sessions::next_block))
        .route("/api/sessions/:id/next-round", post(sessions::next_round))
        .route("/api/sessions/:id/review", post(sessions::review))
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Nie znaleziono zasobu").into_response()
}

/// Path-segment language lookup shared by the word-list routes.
fn parse_language(raw: &str) -> Result<Language, AppError> {
    Language::from_id(raw).ok_or_else(|| AppError::not_found("Nieznany język"))
}
