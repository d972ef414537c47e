use anyhow::Result;

use crate::config::Config;
use crate::database::{DatabaseManager, KnowledgeRepository};
use crate::models::KnowledgeEntry;

const PREVIEW_CHARS: usize = 80;

fn open_repository() -> Result<KnowledgeRepository> {
    let config = Config::load()?;
    let db_manager = DatabaseManager::new(config.database_path()?)?;
    Ok(KnowledgeRepository::new(db_manager))
}

pub fn handle_list_command(limit: Option<usize>) -> Result<()> {
    let entries = open_repository()?.list(limit)?;

    if entries.is_empty() {
        println!("No stored answers yet");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", describe(entry));
    }

    Ok(())
}

pub fn handle_count_command() -> Result<()> {
    println!("{}", open_repository()?.count()?);
    Ok(())
}

fn describe(entry: &KnowledgeEntry) -> String {
    format!(
        "#{:<5} {:<40} [{} dims] {}",
        entry.id,
        entry.question,
        entry.dimensions(),
        preview(&entry.answer)
    )
}

fn preview(answer: &str) -> String {
    let flat = answer.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }

    let truncated: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{truncated}...")
}
