use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fiszki_core::{Language, Level, TranslationDirection, WordCategory};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::response::AppError;
use crate::services::trainer::{SessionMode, SessionSnapshot, TrainerError};
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    mode: SessionMode,
    language: Language,
    direction: TranslationDirection,
    level: Option<Level>,
    category: Option<WordCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRequest {
    known: bool,
}

fn map_trainer_error(err: TrainerError) -> AppError {
    match err {
        TrainerError::SessionNotFound => AppError::not_found("Sesja nie istnieje"),
        TrainerError::EmptyDeck => AppError::validation("Brak słówek do wyświetlenia"),
        TrainerError::NothingToReview => AppError::validation("Brak słówek do powtórzenia"),
        TrainerError::PassInProgress => {
            AppError::conflict("Bieżąca runda nie została jeszcze ukończona")
        }
        TrainerError::NoMoreBlocks => AppError::conflict("To była ostatnia część listy"),
        TrainerError::WrongMode => {
            AppError::validation("Operacja niedostępna w tym trybie sesji")
        }
    }
}

fn respond(result: Result<SessionSnapshot, TrainerError>) -> Response {
    match result {
        Ok(snapshot) => Json(SuccessResponse {
            success: true,
            data: snapshot,
        })
        .into_response(),
        Err(err) => map_trainer_error(err).into_response(),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let trainer = state.trainer();
    match req.mode {
        SessionMode::Generated => {
            let Some(level) = req.level else {
                return AppError::validation("Poziom jest wymagany dla sesji generowanej")
                    .into_response();
            };
            let snapshot = trainer
                .start_generated(req.language, level, req.category, req.direction)
                .await;
            respond(Ok(snapshot))
        }
        SessionMode::Custom => respond(trainer.start_custom(req.language, req.direction).await),
        SessionMode::Review => respond(trainer.start_review(req.language, req.direction).await),
    }
}

pub async fn snapshot(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.trainer().snapshot(id).await)
}

pub async fn judge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JudgeRequest>,
) -> Response {
    respond(state.trainer().judge(id, req.known).await)
}

pub async fn flip(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.trainer().flip(id).await)
}

pub async fn advance(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.trainer().advance(id).await)
}

pub async fn next_block(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.trainer().next_block(id).await)
}

pub async fn next_round(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.trainer().next_round(id).await)
}

pub async fn review(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.trainer().review_unknown(id).await)
}

pub async fn discard(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.trainer().discard(id).await {
        Ok(()) => Json(SuccessResponse {
            success: true,
            data: serde_json::json!({ "deleted": true }),
        })
        .into_response(),
        Err(err) => map_trainer_error(err).into_response(),
    }
}
