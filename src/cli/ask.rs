use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::models::LookupOutcome;
use crate::services::{format_answer, AnswerService};

pub async fn handle_ask_command(question: String) -> Result<()> {
    let config = Config::load()?;
    let service = AnswerService::from_config(&config)?;

    let processed = service.answer(&question).await?;

    match &processed.outcome {
        LookupOutcome::Hit {
            score,
            matched_question,
        } => info!(score, %matched_question, "Cached answer"),
        LookupOutcome::Miss { best_score } => {
            info!(best_score = ?best_score, "Answer gathered from external sources")
        }
    }

    println!("{}", format_answer(&processed.answer, &processed.links));
    Ok(())
}
