// Pending text entry feeding the store's add operation

use crate::models::TaskId;
use crate::store::TaskStore;
use tracing::debug;

/// Text typed but not yet submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the buffer contents
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Add the buffered text as a task
    ///
    /// The buffer is cleared only when the store accepted the title.
    pub fn submit(&mut self, store: &mut TaskStore) -> Option<TaskId> {
        let id = store.add(&self.text)?;
        debug!(%id, "submit: clearing input buffer");
        self.clear();
        Some(id)
    }
}
