use crate::command::{FieldEdit, ParsedCommand};
use crate::error::{Result, TodoError};
use crate::resolve::{TaskRef, TaskSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            tags: BTreeSet::new(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// First block of the uuid, for compact listings.
    pub fn short_id(&self) -> &str {
        self.id.split('-').next().unwrap_or(&self.id)
    }
}

// ---------------------------------------------------------------------------
// TaskStore
// ---------------------------------------------------------------------------

/// In-memory task list. Insertion order is the display order used for
/// numeric identifiers.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::TaskNotFound(id.to_string()))
    }

    /// Add a task from a parsed `add` command. Returns the new task's id.
    pub fn add(&mut self, cmd: &ParsedCommand) -> Result<String> {
        let title = cmd.title.value().ok_or(TodoError::EmptyTitle)?;
        let mut task = Task::new(title);
        task.description = cmd.description.value().map(str::to_string);
        task.tags = cmd.tags.clone();
        let id = task.id.clone();
        self.tasks.push(task);
        Ok(id)
    }

    /// Apply the provided fields of an `update` command. Tags, when given,
    /// replace the existing set.
    pub fn update(&mut self, id: &str, cmd: &ParsedCommand) -> Result<&Task> {
        let task = self.find_mut(id)?;
        match &cmd.title {
            FieldEdit::Omitted => {}
            FieldEdit::Cleared => return Err(TodoError::EmptyTitle),
            FieldEdit::Set(title) => task.title = title.clone(),
        }
        match &cmd.description {
            FieldEdit::Omitted => {}
            FieldEdit::Cleared => task.description = None,
            FieldEdit::Set(description) => task.description = Some(description.clone()),
        }
        if cmd.tags_provided() {
            task.tags = cmd.tags.clone();
        }
        task.updated_at = Utc::now();
        Ok(task)
    }

    pub fn remove(&mut self, id: &str) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TodoError::TaskNotFound(id.to_string()))?;
        Ok(self.tasks.remove(index))
    }

    pub fn set_completed(&mut self, id: &str, completed: bool) -> Result<&Task> {
        let task = self.find_mut(id)?;
        task.completed = completed;
        task.updated_at = Utc::now();
        Ok(task)
    }

    /// Human-readable summary: "2/5 completed"
    pub fn summarize(&self) -> String {
        let done = self.tasks.iter().filter(|t| t.completed).count();
        format!("{done}/{} completed", self.tasks.len())
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::TaskNotFound(id.to_string()))
    }
}

impl TaskSource for TaskStore {
    fn list_tasks(&self) -> Vec<TaskRef<'_>> {
        self.tasks.as_slice().list_tasks()
    }
}

impl TaskSource for [Task] {
    fn list_tasks(&self) -> Vec<TaskRef<'_>> {
        self.iter()
            .map(|t| TaskRef {
                id: &t.id,
                title: &t.title,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
