//! Classify-then-reorganize in one step.

use clap::Args;
use moodtask_core::{Config, MoodAssessment, Task, TaskDb};
use serde::Serialize;

#[derive(Args)]
pub struct PlanArgs {
    /// Free text describing how you feel
    text: String,
    /// Use the keyword classifier only
    #[arg(long)]
    offline: bool,
    /// Print the new order without saving it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Serialize)]
struct PlanOutput {
    assessment: MoodAssessment,
    tasks: Vec<Task>,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = TaskDb::open()?;

    let assessment = super::classify(&config, &args.text, args.offline)?;
    db.record_mood(&assessment, &args.text)?;

    let tasks = super::task::reorganize_stored(&db, &config, assessment.mood, args.dry_run)?;
    let output = PlanOutput { assessment, tasks };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
