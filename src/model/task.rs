use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::date_range::DateRange;

/// Workflow lane a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Todo,
    InProgress,
    Review,
    Completed,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Todo,
        Category::InProgress,
        Category::Review,
        Category::Completed,
    ];

    /// Human-readable label for toggles and table rows.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Todo => "To Do",
            Category::InProgress => "In Progress",
            Category::Review => "Review",
            Category::Completed => "Completed",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Todo
    }
}

/// Why a task write was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task name is empty")]
    EmptyName,
}

/// A single task on the board: an inclusive day range plus workflow state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Set once at creation, never updated afterwards.
    pub created: DateTime<Utc>,
}

impl Task {
    /// Build a task with a fresh id. The name is trimmed and the dates
    /// ordered; an empty name is caught by `validate` at the store boundary.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        let range = DateRange::new(start, end);
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            category: Category::Todo,
            start: range.start,
            end: range.end,
            created: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        if self.name.trim().is_empty() {
            return Err(TaskError::EmptyName);
        }
        Ok(())
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }

    /// Adopt a resolved range, keeping everything else.
    pub fn set_range(&mut self, range: DateRange) {
        self.start = range.start;
        self.end = range.end;
    }

    /// Restore `start <= end`, swapping if a caller handed them inverted.
    pub fn normalize_dates(&mut self) {
        if self.start > self.end {
            std::mem::swap(&mut self.start, &mut self.end);
        }
    }
}
