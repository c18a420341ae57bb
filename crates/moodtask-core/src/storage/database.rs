//! SQLite-based task store and mood log.
//!
//! Provides persistent storage for:
//! - Tasks, including their persisted reorganization order
//! - Mood assessments (the mood log)

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use super::{data_dir, migrations};
use crate::error::{DatabaseError, Result};
use crate::mood::{AssessmentSource, Mood, MoodAssessment};
use crate::task::{Priority, Task, TaskStatus};

const TASK_COLUMNS: &str = "id, title, description, category, priority, status, due_date,
     importance, progress, reorganizable, strict, notes, created_at, updated_at";

/// One row of the mood log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodLogEntry {
    pub id: i64,
    pub mood: Mood,
    pub confidence: f64,
    pub source: AssessmentSource,
    pub text_input: String,
    pub created_at: DateTime<Utc>,
}

/// SQLite database holding tasks and the mood log.
pub struct TaskDb {
    conn: Connection,
}

impl TaskDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/moodtask/moodtask.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("moodtask.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Insert a task at the end of the current order.
    ///
    /// # Errors
    /// Returns a validation error for out-of-range fields, or a database
    /// error if the insert fails (e.g. duplicate id).
    pub fn create_task(&self, task: &Task) -> Result<()> {
        task.validate()?;
        self.conn.execute(
            "INSERT INTO tasks (id, title, description, category, priority, status, due_date,
                                importance, progress, reorganizable, strict, notes,
                                created_at, updated_at, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM tasks))",
            params![
                task.id,
                task.title,
                task.description,
                task.category,
                task.priority.as_str(),
                task.status.as_str(),
                task.due_date.to_rfc3339(),
                task.importance,
                task.progress,
                task.reorganizable,
                task.strict,
                task.notes,
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch a task by id.
    pub fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        let task = self
            .conn
            .query_row(&sql, params![id], row_to_task)
            .optional()?;
        Ok(task)
    }

    /// All tasks in persisted order.
    ///
    /// Tasks without a position (created before ordering was tracked) come
    /// last, oldest first.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             ORDER BY position IS NULL, position, created_at"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Overwrite every field of an existing task. Returns false if no task
    /// has that id.
    ///
    /// # Errors
    /// Returns a validation error for out-of-range fields, or a database
    /// error if the update fails.
    pub fn update_task(&self, task: &Task) -> Result<bool> {
        task.validate()?;
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, category = ?4, priority = ?5,
                 status = ?6, due_date = ?7, importance = ?8, progress = ?9,
                 reorganizable = ?10, strict = ?11, notes = ?12, updated_at = ?13
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.category,
                task.priority.as_str(),
                task.status.as_str(),
                task.due_date.to_rfc3339(),
                task.importance,
                task.progress,
                task.reorganizable,
                task.strict,
                task.notes,
                task.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a task. Returns false if no task had that id.
    pub fn delete_task(&self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Persist `tasks` order: each task's index becomes its position.
    ///
    /// Ids not present in the store are ignored.
    pub fn save_order(&self, tasks: &[Task]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare("UPDATE tasks SET position = ?1 WHERE id = ?2")?;
            for (position, task) in tasks.iter().enumerate() {
                stmt.execute(params![position as i64, task.id])?;
            }
        }
        tx.commit()?;
        tracing::info!(count = tasks.len(), "persisted task order");
        Ok(())
    }

    // ── Mood log ─────────────────────────────────────────────────────

    /// Record an assessment together with the text that produced it.
    pub fn record_mood(&self, assessment: &MoodAssessment, text: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO mood_logs (mood, confidence, source, text_input, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                assessment.mood.as_str(),
                assessment.confidence,
                assessment.source.as_str(),
                text,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent mood log entries, newest first.
    pub fn mood_history(&self, limit: usize) -> Result<Vec<MoodLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mood, confidence, source, text_input, created_at
             FROM mood_logs
             ORDER BY created_at DESC, id DESC
             LIMIT ?1",
        )?;
        let entries = stmt
            .query_map(params![limit as i64], |row| {
                Ok(MoodLogEntry {
                    id: row.get(0)?,
                    mood: parse_column(row, 1)?,
                    confidence: row.get(2)?,
                    source: parse_column(row, 3)?,
                    text_input: row.get(4)?,
                    created_at: parse_timestamp(row, 5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        priority: parse_column::<Priority>(row, 4)?,
        status: parse_column::<TaskStatus>(row, 5)?,
        due_date: parse_timestamp(row, 6)?,
        importance: row.get(7)?,
        progress: row.get(8)?,
        reorganizable: row.get(9)?,
        strict: row.get(10)?,
        notes: row.get(11)?,
        created_at: parse_timestamp(row, 12)?,
        updated_at: parse_timestamp(row, 13)?,
    })
}

/// Read a TEXT column through `FromStr`.
fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
