use anyhow::{Context, Result};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::web::{routes, AppState};

pub async fn run_server(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = routes::create_routes(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "HTTP server listening");
    println!("🌐 Saber running at http://{addr}");
    println!("❓ Questions: POST http://{addr}/pergunta");
    println!("🏥 Health check: http://{addr}/api/health");
    println!();
    println!("Press Ctrl+C to stop the server");

    axum::serve(listener, app).await?;

    Ok(())
}
