//! Task model.
//!
//! Tasks are owned by the task store ([`crate::storage::TaskDb`]). The
//! reorganization engine only reads and reorders them and assumes they have
//! already passed [`Task::validate`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Allowed range for [`Task::importance`].
pub const IMPORTANCE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Allowed range for [`Task::progress`].
pub const PROGRESS_RANGE: std::ops::RangeInclusive<u8> = 0..=100;

/// Task priority, also used as a proxy for difficulty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sortable rank: Low=1, Medium=2, High=3.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ValidationError::UnknownPriority(s.to_string())),
        }
    }
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    /// Accepts "Todo", "In Progress" / "in-progress" / "in_progress" and
    /// "Completed", ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// A unit of work that can be reordered by mood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    /// 1..=10
    pub importance: u8,
    /// 0..=100
    pub progress: u8,
    /// When false the task never moves relative to other tasks
    pub reorganizable: bool,
    /// Advisory unless `reorganize.pin_strict` is enabled
    pub strict: bool,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new reorganizable `Todo` task with default values.
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            due_date,
            importance: 5,
            progress: 0,
            reorganizable: true,
            strict: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the numeric invariants.
    ///
    /// # Errors
    /// Returns `OutOfRange` for importance outside 1..=10 or progress
    /// outside 0..=100, and `InvalidValue` for a blank title.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        check_range("importance", self.importance, &IMPORTANCE_RANGE)?;
        check_range("progress", self.progress, &PROGRESS_RANGE)?;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

fn check_range(
    field: &str,
    value: u8,
    range: &std::ops::RangeInclusive<u8>,
) -> Result<(), ValidationError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: i64::from(value),
            min: i64::from(*range.start()),
            max: i64::from(*range.end()),
        })
    }
}
