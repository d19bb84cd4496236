use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::filter::{filter_tasks, FilterState, FilterUpdate};
use super::task::{Task, TaskError};

/// The owning, synchronous source of truth for one board.
///
/// Tasks, the active filter, and the selection live here; every mutation
/// is visible to the very next read. Writes re-trim names and re-normalize
/// date order even though constructors already do, so no path can leave a
/// padded name or an inverted pair behind. This struct is also the on-disk
/// snapshot; the selection is transient and skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStore {
    pub name: String,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub filter: FilterState,
    #[serde(skip)]
    pub selected: Option<Uuid>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            name: "Untitled Board".to_string(),
            tasks: Vec::new(),
            filter: FilterState::default(),
            selected: None,
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl TaskStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Mark the board as changed now.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task. Invalid input is refused without touching anything.
    pub fn create(&mut self, mut task: Task) -> Result<(), TaskError> {
        task.validate()?;
        task.name = task.name.trim().to_string();
        task.normalize_dates();
        self.tasks.push(task);
        self.touch();
        Ok(())
    }

    /// Replace the task carrying the same id wholesale, keeping its
    /// position. Unknown ids are a silent no-op (`Ok(false)`); invalid
    /// input is refused up front and the stored task keeps its old state.
    pub fn update(&mut self, mut task: Task) -> Result<bool, TaskError> {
        task.validate()?;
        task.name = task.name.trim().to_string();
        task.normalize_dates();
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                self.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a task; unknown ids are a silent no-op. A selection pointing
    /// at the removed task is cleared.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            if self.selected == Some(id) {
                self.selected = None;
            }
            self.touch();
        }
        removed
    }

    /// Apply the provided parts of a filter update, keeping the rest.
    pub fn set_filters(&mut self, update: FilterUpdate) {
        if let Some(categories) = update.categories {
            self.filter.categories = categories;
        }
        if let Some(duration) = update.duration {
            self.filter.duration = duration;
        }
        if let Some(search_query) = update.search_query {
            self.filter.search_query = search_query;
        }
        self.touch();
    }

    /// Point the selection at a task; ids not on the board clear it.
    pub fn set_selected(&mut self, id: Option<Uuid>) {
        self.selected = id.filter(|id| self.tasks.iter().any(|t| t.id == *id));
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|id| self.get(id))
    }

    /// The read path the views render from: the current filter applied,
    /// input order preserved.
    pub fn visible_tasks(&self, today: NaiveDate) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.filter, today)
    }

    /// Repair whatever a hand-edited or stale snapshot may carry: inverted
    /// date pairs are swapped, blank-named tasks dropped. Returns how many
    /// tasks were dropped so the load path can log it.
    pub fn sanitize(&mut self) -> usize {
        for task in &mut self.tasks {
            task.name = task.name.trim().to_string();
            task.normalize_dates();
        }
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.name.is_empty());
        before - self.tasks.len()
    }
}
