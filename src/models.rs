// Data models for the task list

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a task when it is added
///
/// Allocated from a monotonically increasing counter owned by the store; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        TaskId(id)
    }
}

/// A single entry in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// Soft-delete marker: the task sits in the trash until restored or purged
    pub deleted: bool,
}

impl Task {
    /// Fresh task with both flags cleared
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            deleted: false,
        }
    }

    /// Replacement record carrying a new title
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Replacement record with the completed flag set to `completed`
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            completed,
            ..self.clone()
        }
    }

    /// Replacement record with the deleted flag set to `deleted`
    pub fn with_deleted(&self, deleted: bool) -> Self {
        Self {
            deleted,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_flags_cleared() {
        let task = Task::new(TaskId(1), "Buy milk");
        assert_eq!(task.id, TaskId(1));
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert!(!task.deleted);
    }

    #[test]
    fn test_with_title_keeps_id_and_flags() {
        let task = Task::new(TaskId(7), "old").with_completed(true).with_deleted(true);
        let edited = task.with_title("new");

        assert_eq!(edited.id, TaskId(7));
        assert_eq!(edited.title, "new");
        assert!(edited.completed);
        assert!(edited.deleted);
        // Original record is untouched
        assert_eq!(task.title, "old");
    }

    #[test]
    fn test_flags_are_independent() {
        let task = Task::new(TaskId(1), "x").with_deleted(true);
        assert!(!task.completed);

        let task = task.with_completed(true);
        assert!(task.deleted);
        assert!(task.completed);
    }

    #[test]
    fn test_task_serialization() {
        let task = Task::new(TaskId(3), "Call Bob").with_completed(true);
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":3,"title":"Call Bob","completed":true,"deleted":false}"#);
    }

    #[test]
    fn test_task_id_display() {
        assert_eq!(TaskId(42).to_string(), "42");
        assert_eq!(TaskId::from(5), TaskId(5));
    }
}
