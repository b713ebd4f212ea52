// tasklist - In-memory task list with soft-delete, status filters and a terminal session

pub mod config;
pub mod filter;
pub mod input;
pub mod models;
pub mod render;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use config::{Config, LoadedConfig, SkippedConfig};
pub use filter::StatusFilter;
pub use input::InputBuffer;
pub use models::{Task, TaskId};
pub use render::Renderer;
pub use session::{Command, Flow, Session};
pub use store::TaskStore;
