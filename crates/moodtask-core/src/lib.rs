//! # Moodtask Core Library
//!
//! This library provides the core logic for moodtask, a task list that
//! reorders itself around how the user feels. All operations are available
//! through the standalone `moodtask` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Mood classification**: a remote chat-completion strategy with a
//!   deterministic keyword fallback. Classification always yields an assessment.
//! - **Reorganization**: a stable, mood-specific sort over eligible tasks that
//!   leaves every other task where it was
//! - **Storage**: SQLite task store and mood log, TOML configuration
//!
//! ## Key Components
//!
//! - [`MoodClassifier`]: Turns free text into a [`MoodAssessment`]
//! - [`ReorganizationEngine`]: Reorders [`Task`]s for a [`Mood`]
//! - [`TaskDb`]: Task and mood log persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod mood;
pub mod reorganize;
pub mod storage;
pub mod task;

pub use error::{ClassifyError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use mood::{AssessmentSource, Mood, MoodAssessment, MoodClassifier};
pub use reorganize::{ReorganizationEngine, ReorganizeOptions};
pub use storage::{Config, MoodLogEntry, TaskDb};
pub use task::{Priority, Task, TaskStatus};
