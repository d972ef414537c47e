use anyhow::Result;
use tracing::warn;

use crate::config::Config;
use crate::services::AnswerService;
use crate::web::{run_server, AppState};

pub async fn handle_serve_command(host: Option<String>, port: Option<u16>, open: bool) -> Result<()> {
    let config = Config::load()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let service = AnswerService::from_config(&config)?;

    if open {
        open_browser(&format!("http://{host}:{port}"));
    }

    run_server(AppState::new(service), &host, port).await
}

fn open_browser(url: &str) {
    println!("🚀 Opening browser at {url}");

    #[cfg(not(target_os = "windows"))]
    let spawned = std::process::Command::new("open")
        .arg(url)
        .spawn()
        .or_else(|_| std::process::Command::new("xdg-open").arg(url).spawn());

    #[cfg(target_os = "windows")]
    let spawned = std::process::Command::new("cmd")
        .args(["/C", "start", url])
        .spawn();

    if let Err(e) = spawned {
        warn!(error = %e, "Could not open browser");
    }
}
