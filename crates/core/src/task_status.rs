//! Task status values and the percent-to-status derivation rule.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

pub const STATUS_TO_DO: &str = "To Do";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_COMPLETED: &str = "Completed";

/// Filter value for tasks that are past their end date but not completed.
/// Never stored; resolved to a date comparison at query time.
pub const STATUS_FAILED_FILTER: &str = "Failed";

/// Stored task status. `Failed` is deliberately absent: it is a derived
/// condition, not a state a task can be put into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Database / wire representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::ToDo => STATUS_TO_DO,
            TaskStatus::InProgress => STATUS_IN_PROGRESS,
            TaskStatus::Completed => STATUS_COMPLETED,
        }
    }

    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            STATUS_TO_DO => Some(TaskStatus::ToDo),
            STATUS_IN_PROGRESS => Some(TaskStatus::InProgress),
            STATUS_COMPLETED => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a completion percentage to its status.
///
/// The three arms are exhaustive and non-overlapping over all of f64:
/// p >= 100 is Completed, 0 < p < 100 is In Progress, p <= 0 is To Do.
pub fn derive_status(percent: f64) -> TaskStatus {
    if percent >= 100.0 {
        TaskStatus::Completed
    } else if percent > 0.0 {
        TaskStatus::InProgress
    } else {
        TaskStatus::ToDo
    }
}

/// Reject completion percentages outside [0, 100].
pub fn validate_success_percent(percent: f64) -> Result<(), CoreError> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(CoreError::Validation(format!(
            "success_percent must be between 0 and 100, got {percent}"
        )));
    }
    Ok(())
}

/// A task has failed when its end date has passed without completion.
/// Computed at read time; never stored.
pub fn is_failed(end_date: Option<Date>, status: &str, today: Date) -> bool {
    match end_date {
        Some(end) => end < today && status != STATUS_COMPLETED,
        None => false,
    }
}
