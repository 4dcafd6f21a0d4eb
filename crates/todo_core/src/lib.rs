//! Core domain logic for the to-do list manager.
//! This crate is the single source of truth for task invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod session;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::preferences::{FilterMode, SortMode, Theme};
pub use model::task::{ParseModeError, Priority, Task, TaskId, TaskValidationError};
pub use repo::kv_store::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use repo::todo_repo::{TodoRepository, THEME_KEY, TODOS_KEY};
pub use repo::{RepoError, RepoResult};
pub use search::debounce::{SearchDebouncer, SEARCH_DEBOUNCE_MS};
pub use service::task_store::{NewTask, TaskEdit, TaskStore};
pub use session::{EditDraft, TodoSession};
pub use view::counts::TaskCounts;
pub use view::filter::filter_tasks;
pub use view::model::{build_view, PriorityAccent, TaskRow, TodoView, ViewState};
pub use view::sort::sort_tasks;
