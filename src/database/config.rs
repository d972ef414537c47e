use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::env::database as env_vars;

/// Get the default database path in the user's home directory
/// Can be overridden by SABER_DB environment variable
pub fn get_default_db_path() -> Result<PathBuf> {
    if let Ok(db_path) = std::env::var(env_vars::SABER_DB) {
        if !db_path.trim().is_empty() {
            return Ok(PathBuf::from(db_path));
        }
    }

    let home_dir = dirs::home_dir().context("Could not find home directory")?;
    Ok(home_dir.join(".saber").join("saber.db"))
}
