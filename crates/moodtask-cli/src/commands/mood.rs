//! Mood classification commands for CLI.

use clap::Subcommand;
use moodtask_core::{Config, TaskDb};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Classify the mood expressed in a piece of text
    Analyze {
        /// Free text describing how you feel
        text: String,
        /// Use the keyword classifier only
        #[arg(long)]
        offline: bool,
        /// Do not record the assessment in the mood log
        #[arg(long)]
        no_log: bool,
    },
    /// Show recent mood assessments
    History {
        /// Maximum number of entries (newest first)
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

pub fn run(action: MoodAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MoodAction::Analyze {
            text,
            offline,
            no_log,
        } => {
            let config = Config::load()?;
            let assessment = super::classify(&config, &text, offline)?;
            if !no_log {
                TaskDb::open()?.record_mood(&assessment, &text)?;
            }
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
        MoodAction::History { limit } => {
            let db = TaskDb::open()?;
            let entries = db.mood_history(limit)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
