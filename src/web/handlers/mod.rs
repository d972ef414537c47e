pub mod health;
pub mod question;

pub use health::health_check;
pub use question::ask_question;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::error::SaberError;

pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<SaberError> for AppError {
    fn from(err: SaberError) -> Self {
        match err {
            SaberError::Validation { message, .. } => AppError::BadRequest(message),
            other => {
                error!(category = other.category(), error = %other, "Request failed");
                AppError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "erro": message,
        }));

        (status, body).into_response()
    }
}
