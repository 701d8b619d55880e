use crate::error::{Candidate, Result, TodoError};

/// One entry of the displayed task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRef<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

/// Read-only view of the task list, in display order.
pub trait TaskSource {
    fn list_tasks(&self) -> Vec<TaskRef<'_>>;
}

impl TaskSource for [TaskRef<'_>] {
    fn list_tasks(&self) -> Vec<TaskRef<'_>> {
        self.to_vec()
    }
}

/// Map a user-supplied identifier to a task id.
///
/// Tried in order: 1-based position, exact id, case-insensitive title. A
/// title made only of digits is always read as a position.
pub fn resolve_identifier<S>(identifier: &str, source: &S) -> Result<String>
where
    S: TaskSource + ?Sized,
{
    let identifier = identifier.trim();
    let tasks = source.list_tasks();

    if let Some(position) = parse_position(identifier) {
        return tasks
            .get(position - 1)
            .map(|t| t.id.to_string())
            .ok_or(TodoError::PositionOutOfRange {
                position,
                len: tasks.len(),
            });
    }

    if let Some(task) = tasks.iter().find(|t| t.id == identifier) {
        return Ok(task.id.to_string());
    }

    let needle = identifier.to_lowercase();
    let matches: Vec<&TaskRef<'_>> = tasks
        .iter()
        .filter(|t| t.title.to_lowercase() == needle)
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.id.to_string()),
        _ => Err(TodoError::AmbiguousIdentifier {
            identifier: identifier.to_string(),
            candidates: matches
                .iter()
                .map(|t| Candidate {
                    id: t.id.to_string(),
                    title: t.title.to_string(),
                })
                .collect(),
        }),
    }
}

/// Positive integers written with ASCII digits only (`usize::from_str` also
/// accepts a leading `+`). Values too large for `usize` saturate so they still
/// count as positions.
fn parse_position(identifier: &str) -> Option<usize> {
    if identifier.is_empty() || !identifier.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if identifier.bytes().all(|b| b == b'0') {
        return None;
    }
    Some(identifier.parse::<usize>().unwrap_or(usize::MAX))
}
