use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::AppError;
use crate::web::AppState;

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let entries = state
        .service
        .repository()
        .count()
        .map_err(|e| AppError::Internal(format!("Failed to read knowledge base: {e}")))?;

    Ok(Json(json!({
        "status": "ok",
        "entries": entries,
    })))
}
