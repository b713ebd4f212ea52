// Terminal rendering of the filtered view

use crate::filter::StatusFilter;
use crate::models::Task;
use crate::store::TaskStore;
use colored::{ColoredString, Colorize};

/// Turns store state into lines of text
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub color: bool,
    pub show_ids: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            color: true,
            show_ids: true,
        }
    }
}

impl Renderer {
    pub fn new(color: bool, show_ids: bool) -> Self {
        Self { color, show_ids }
    }

    /// Header, one line per visible task, and the counts footer
    pub fn render(&self, store: &TaskStore) -> String {
        let filter = store.active_filter();
        let view = store.filtered_view();

        let mut out = String::new();
        out.push_str(&self.paint(&format!("== {} ({}) ==", filter, view.len()), |s| s.bold()));
        out.push('\n');

        if view.is_empty() {
            out.push_str(&self.paint("  (no tasks)", |s| s.dimmed()));
            out.push('\n');
        }
        for task in &view {
            out.push_str(&self.task_line(task));
            out.push('\n');
        }

        out.push_str(&self.footer(store));
        out.push('\n');
        out
    }

    /// Single row: checkbox, optional id, title
    pub fn task_line(&self, task: &Task) -> String {
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        let mut line = format!("{} ", self.paint(checkbox, |s| s.cyan()));

        if self.show_ids {
            line.push_str(&self.paint(&format!("#{}", task.id), |s| s.yellow()));
            line.push(' ');
        }

        let title = if task.deleted {
            self.paint(&task.title, |s| s.dimmed().strikethrough())
        } else if task.completed {
            self.paint(&task.title, |s| s.green())
        } else {
            task.title.clone()
        };
        line.push_str(&title);
        line
    }

    fn footer(&self, store: &TaskStore) -> String {
        let counts = store.counts();
        let summary = StatusFilter::ALL
            .iter()
            .map(|filter| format!("{} {}", filter, counts.get(filter).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join(" | ");

        let mut footer = format!("-- {}", summary);
        if store.active_filter() == StatusFilter::Trash {
            footer.push_str(" -- `purge` empties the trash");
        }
        self.paint(&footer, |s| s.dimmed())
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}
