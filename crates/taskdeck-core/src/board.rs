//! Kanban task board.
//!
//! Tasks live in memory only. The board keeps insertion order; columns and
//! filtered views preserve it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::dice::Candidate;
use crate::error::ValidationError;
use crate::task::{Priority, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    /// Free-form estimate such as "2 hours".
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub category: String,
}

impl BoardTask {
    fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

impl Candidate for BoardTask {
    fn candidate_id(&self) -> &str {
        &self.id
    }

    fn candidate_label(&self) -> &str {
        &self.title
    }
}

/// Input for [`TaskBoard::create`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub estimated_time: String,
    pub category: String,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    fn accepts(self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => s == status,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring of title or description.
    pub search: String,
    pub status: StatusFilter,
}

/// Filtered tasks bucketed by status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardColumns<'a> {
    pub pending: Vec<&'a BoardTask>,
    pub in_progress: Vec<&'a BoardTask>,
    pub completed: Vec<&'a BoardTask>,
}

impl BoardColumns<'_> {
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending.len(),
            TaskStatus::InProgress => self.in_progress.len(),
            TaskStatus::Completed => self.completed.len(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskBoard {
    tasks: Vec<BoardTask>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<BoardTask>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[BoardTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BoardTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a pending task.
    ///
    /// # Errors
    ///
    /// `MissingField("title")` when the title is blank.
    pub fn create(&mut self, new: NewTask) -> Result<&BoardTask, ValidationError> {
        if new.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".into()));
        }
        let task = BoardTask {
            id: format!("task-{}", Uuid::new_v4()),
            title: new.title,
            description: new.description,
            priority: new.priority,
            status: TaskStatus::Pending,
            due_date: new.due_date,
            estimated_time: new.estimated_time,
            category: new.category,
        };
        debug!(id = %task.id, "task created");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Advance a task to its next status. Returns the new status.
    pub fn toggle_status(&mut self, id: &str) -> Result<TaskStatus, ValidationError> {
        let task = self.get_mut(id)?;
        task.status = task.status.next();
        Ok(task.status)
    }

    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<(), ValidationError> {
        self.get_mut(id)?.status = status;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<BoardTask, ValidationError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ValidationError::not_found("task", id))?;
        Ok(self.tasks.remove(pos))
    }

    pub fn filter<'a>(&'a self, filter: &TaskFilter) -> Vec<&'a BoardTask> {
        let needle = filter.search.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.matches_search(&needle) && filter.status.accepts(t.status))
            .collect()
    }

    pub fn columns<'a>(&'a self, filter: &TaskFilter) -> BoardColumns<'a> {
        let mut columns = BoardColumns::default();
        for task in self.filter(filter) {
            match task.status {
                TaskStatus::Pending => columns.pending.push(task),
                TaskStatus::InProgress => columns.in_progress.push(task),
                TaskStatus::Completed => columns.completed.push(task),
            }
        }
        columns
    }

    /// Pending tasks, cloned for the dice roller.
    pub fn pending(&self) -> Vec<BoardTask> {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .cloned()
            .collect()
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut BoardTask, ValidationError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ValidationError::not_found("task", id))
    }
}
