use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppError;
use crate::services::answer_service::EMPTY_QUESTION;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub pergunta: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub resposta: String,
}

pub async fn ask_question(
    State(state): State<AppState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<QuestionResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected question payload");
        AppError::BadRequest(EMPTY_QUESTION.to_string())
    })?;

    let question = request.pergunta.unwrap_or_default();
    if question.trim().is_empty() {
        return Err(AppError::BadRequest(EMPTY_QUESTION.to_string()));
    }

    let resposta = state.service.answer_formatted(&question).await?;

    Ok(Json(QuestionResponse { resposta }))
}
