// Status filters selecting which tasks are visible

use crate::models::Task;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Named view over the task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Everything not in the trash
    #[default]
    All,
    /// Completed and not in the trash
    Completed,
    /// Not completed and not in the trash
    Unchecked,
    /// Soft-deleted, whether completed or not
    Trash,
}

impl StatusFilter {
    /// Every filter, in selector order
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Completed,
        StatusFilter::Unchecked,
        StatusFilter::Trash,
    ];

    /// Whether `task` belongs in this view
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => !task.deleted,
            StatusFilter::Completed => task.completed && !task.deleted,
            StatusFilter::Unchecked => !task.completed && !task.deleted,
            StatusFilter::Trash => task.deleted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Completed => "completed",
            StatusFilter::Unchecked => "unchecked",
            StatusFilter::Trash => "trash",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "unchecked" => Ok(StatusFilter::Unchecked),
            "trash" => Ok(StatusFilter::Trash),
            other => Err(eyre!(
                "Unknown filter: {} (expected one of all, completed, unchecked, trash)",
                other
            )),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
