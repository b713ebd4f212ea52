// In-memory task store: ordered tasks, id sequence and active filter

use crate::filter::StatusFilter;
use crate::models::{Task, TaskId};
use std::collections::HashMap;
use tracing::{debug, info};

/// Authoritative task collection
///
/// Tasks are kept newest first. Every write replaces the stored record at its
/// position, so the relative order of tasks only changes on add (prepend) and
/// purge (removal). Targeting an id that is not present is a silent no-op for
/// the store state; the `bool` returned by the write operations tells callers
/// whether a task matched.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    active_filter: StatusFilter,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            active_filter: StatusFilter::default(),
        }
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store starting out with `filter` selected
    pub fn with_filter(filter: StatusFilter) -> Self {
        Self {
            active_filter: filter,
            ..Self::default()
        }
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Add a task titled `title` at the front of the list
    ///
    /// Only an exactly-empty title is rejected; whitespace-only titles are kept
    /// as typed. Returns the id of the new task.
    pub fn add(&mut self, title: &str) -> Option<TaskId> {
        if title.is_empty() {
            debug!("add: empty title, ignoring");
            return None;
        }

        let id = TaskId(self.next_id);
        self.tasks.insert(0, Task::new(id, title));
        self.next_id += 1;

        info!(%id, title, "Added task");
        Some(id)
    }

    /// Replace the title of task `id`, leaving its flags alone
    pub fn edit_title(&mut self, id: TaskId, title: &str) -> bool {
        self.replace(id, |task| task.with_title(title))
    }

    /// Set the completed flag of task `id`
    pub fn toggle_complete(&mut self, id: TaskId, completed: bool) -> bool {
        self.replace(id, |task| task.with_completed(completed))
    }

    /// Set the deleted flag of task `id`; `false` restores it from the trash
    pub fn toggle_delete(&mut self, id: TaskId, deleted: bool) -> bool {
        self.replace(id, |task| task.with_deleted(deleted))
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        debug!(from = %self.active_filter, to = %filter, "set_filter");
        self.active_filter = filter;
    }

    /// Permanently remove every task in the trash
    ///
    /// Returns the number of tasks removed. Ids of purged tasks are never handed
    /// out again.
    pub fn purge(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.deleted);
        let removed = before - self.tasks.len();

        info!(removed, remaining = self.tasks.len(), "Purged trash");
        removed
    }

    /// Swap the record for `id` with the one produced by `update`
    fn replace<F>(&mut self, id: TaskId, update: F) -> bool
    where
        F: FnOnce(&Task) -> Task,
    {
        match self.tasks.iter().position(|task| task.id == id) {
            Some(pos) => {
                let replacement = update(&self.tasks[pos]);
                debug!(%id, pos, ?replacement, "replace: updating task");
                self.tasks[pos] = replacement;
                true
            }
            None => {
                debug!(%id, "replace: no such task, ignoring");
                false
            }
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Tasks visible under the active filter
    pub fn filtered_view(&self) -> Vec<&Task> {
        self.view(self.active_filter)
    }

    /// Tasks visible under `filter`, without changing the active filter
    pub fn view(&self, filter: StatusFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    /// Number of tasks in each filter view
    pub fn counts(&self) -> HashMap<StatusFilter, usize> {
        StatusFilter::ALL
            .iter()
            .map(|&filter| (filter, self.tasks.iter().filter(|task| filter.matches(task)).count()))
            .collect()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Every stored task, newest first, including the trash
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Id the next successful add will receive
    pub fn next_id(&self) -> TaskId {
        TaskId(self.next_id)
    }

    pub fn active_filter(&self) -> StatusFilter {
        self.active_filter
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
