use anyhow::{Context, Result};

use crate::config::Config;
use crate::database::{DatabaseManager, KnowledgeRepository};

pub async fn handle_init_command() -> Result<()> {
    let config = Config::load()?;
    let db_path = config.database_path()?;
    let existed = db_path.exists();

    let db_manager = DatabaseManager::new(&db_path)
        .with_context(|| format!("Failed to initialize database at {}", db_path.display()))?;

    if !db_manager.check_integrity()? {
        anyhow::bail!(
            "Integrity check failed for {}",
            db_manager.get_db_path().display()
        );
    }

    let size = db_manager.get_database_size()?;
    let entries = KnowledgeRepository::new(db_manager.clone()).count()?;
    let location = db_manager.get_db_path().display();

    if existed {
        println!("✓ Database already exists at: {location}");
        println!("  {entries} stored answers, {} on disk", human_size(size));
    } else {
        println!("✓ Database initialized successfully at: {location}");
    }

    println!();
    println!("Next steps:");
    println!("  saber ask \"Qual é a capital do Brasil?\"");
    println!("  saber serve --open");

    Ok(())
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
