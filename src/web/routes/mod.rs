use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::web::{handlers, AppState};

pub fn create_routes(state: AppState) -> Router {
    let api_routes = Router::new().route("/health", get(handlers::health_check));

    // Landing page and script, resolved at compile time
    let static_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("web")
        .join("static");

    Router::new()
        .route("/pergunta", post(handlers::ask_question))
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
