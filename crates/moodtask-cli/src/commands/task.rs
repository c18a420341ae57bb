//! Task management commands for CLI.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Subcommand;
use moodtask_core::{Config, Mood, Priority, ReorganizationEngine, Task, TaskDb, TaskStatus};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Due date (RFC 3339 or YYYY-MM-DD)
        #[arg(long, value_parser = parse_due)]
        due: DateTime<Utc>,
        /// Low, Medium or High (default: Medium)
        #[arg(long, default_value = "Medium")]
        priority: Priority,
        /// Todo, "In Progress" or Completed (default: Todo)
        #[arg(long, default_value = "Todo")]
        status: TaskStatus,
        /// Importance 1-10 (default: 5)
        #[arg(long, default_value = "5")]
        importance: u8,
        /// Progress 0-100 (default: 0)
        #[arg(long, default_value = "0")]
        progress: u8,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Never move this task when reorganizing
        #[arg(long)]
        fixed: bool,
        /// Mark the task as strict
        #[arg(long)]
        strict: bool,
    },
    /// List tasks in their current order
    List,
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// New due date (RFC 3339 or YYYY-MM-DD)
        #[arg(long, value_parser = parse_due)]
        due: Option<DateTime<Utc>>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        importance: Option<u8>,
        #[arg(long)]
        progress: Option<u8>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Whether the task may be moved when reorganizing
        #[arg(long)]
        reorganizable: Option<bool>,
        #[arg(long)]
        strict: Option<bool>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Reorder tasks for a mood
    Reorganize {
        /// Happy, Tired, Stressed, Focused or Energetic
        #[arg(long)]
        mood: Mood,
        /// Print the new order without saving it
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = TaskDb::open()?;

    match action {
        TaskAction::Add {
            title,
            due,
            priority,
            status,
            importance,
            progress,
            category,
            description,
            notes,
            fixed,
            strict,
        } => {
            let mut task = Task::new(title, due);
            task.priority = priority;
            task.status = status;
            task.importance = importance;
            task.progress = progress;
            task.category = category.unwrap_or_default();
            task.description = description.unwrap_or_default();
            task.notes = notes.unwrap_or_default();
            task.reorganizable = !fixed;
            task.strict = strict;
            db.create_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List => {
            let tasks = db.list_tasks()?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => {
            let task = db
                .get_task(&id)?
                .ok_or_else(|| format!("task not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Update {
            id,
            title,
            due,
            priority,
            status,
            importance,
            progress,
            category,
            description,
            notes,
            reorganizable,
            strict,
        } => {
            let mut task = db
                .get_task(&id)?
                .ok_or_else(|| format!("task not found: {id}"))?;

            if let Some(title) = title {
                task.title = title;
            }
            if let Some(due) = due {
                task.due_date = due;
            }
            if let Some(priority) = priority {
                task.priority = priority;
            }
            if let Some(status) = status {
                task.status = status;
            }
            if let Some(importance) = importance {
                task.importance = importance;
            }
            if let Some(progress) = progress {
                task.progress = progress;
            }
            if let Some(category) = category {
                task.category = category;
            }
            if let Some(description) = description {
                task.description = description;
            }
            if let Some(notes) = notes {
                task.notes = notes;
            }
            if let Some(reorganizable) = reorganizable {
                task.reorganizable = reorganizable;
            }
            if let Some(strict) = strict {
                task.strict = strict;
            }
            task.updated_at = Utc::now();

            db.update_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            if !db.delete_task(&id)? {
                return Err(format!("task not found: {id}").into());
            }
            println!("Task deleted: {id}");
        }
        TaskAction::Reorganize { mood, dry_run } => {
            let config = Config::load()?;
            let tasks = reorganize_stored(&db, &config, mood, dry_run)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
    }
    Ok(())
}

/// Reorder the stored tasks for `mood`, saving the order unless `dry_run`
/// is set or `reorganize.persist_order` is off.
pub(crate) fn reorganize_stored(
    db: &TaskDb,
    config: &Config,
    mood: Mood,
    dry_run: bool,
) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    let engine = ReorganizationEngine::with_options((&config.reorganize).into());
    let tasks = engine.reorganize(&db.list_tasks()?, mood);
    if dry_run || !config.reorganize.persist_order {
        tracing::debug!(dry_run, %mood, "not persisting task order");
    } else {
        db.save_order(&tasks)?;
    }
    Ok(tasks)
}

fn parse_due(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("invalid date '{s}' (expected RFC 3339 or YYYY-MM-DD)"))
}
