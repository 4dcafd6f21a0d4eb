//! Typed access to the two persisted values: the task list and the theme.
//!
//! # Responsibility
//! - Serialize the full task collection to JSON under `todos`.
//! - Read and write the theme name under `theme`.
//!
//! # Invariants
//! - Absent `todos` means an empty collection; absent `theme` means light.
//! - Loaded tasks must pass `Task::validate()` and carry unique ids.

use crate::model::preferences::Theme;
use crate::model::task::Task;
use crate::repo::kv_store::KeyValueStore;
use crate::repo::{RepoError, RepoResult};
use log::{debug, warn};
use std::collections::HashSet;

/// Storage key holding the JSON task array.
pub const TODOS_KEY: &str = "todos";
/// Storage key holding the theme name.
pub const THEME_KEY: &str = "theme";

/// Persistence adapter over any [`KeyValueStore`].
pub struct TodoRepository<K> {
    kv: K,
}

impl<K: KeyValueStore> TodoRepository<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Loads the stored task collection in storage order.
    pub fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        let Some(payload) = self.kv.get(TODOS_KEY)? else {
            debug!("event=todos_load module=repo status=ok count=0 source=absent");
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = serde_json::from_str(&payload).map_err(|err| {
            RepoError::InvalidData(format!("`{TODOS_KEY}` is not a valid task array: {err}"))
        })?;

        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            task.validate().map_err(|err| {
                RepoError::InvalidData(format!("task {} in `{TODOS_KEY}`: {err}", task.id))
            })?;
            if !seen.insert(task.id) {
                return Err(RepoError::InvalidData(format!(
                    "duplicate task id {} in `{TODOS_KEY}`",
                    task.id
                )));
            }
        }

        debug!(
            "event=todos_load module=repo status=ok count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    /// Replaces the stored collection with `tasks`.
    pub fn save_tasks(&mut self, tasks: &[Task]) -> RepoResult<()> {
        let payload = serde_json::to_string(tasks).map_err(RepoError::Encode)?;
        self.kv.set(TODOS_KEY, &payload)?;
        debug!(
            "event=todos_save module=repo status=ok count={} bytes={}",
            tasks.len(),
            payload.len()
        );
        Ok(())
    }

    /// Loads the persisted theme. Unknown values fall back to light.
    pub fn load_theme(&self) -> RepoResult<Theme> {
        let Some(raw) = self.kv.get(THEME_KEY)? else {
            return Ok(Theme::default());
        };
        match raw.parse::<Theme>() {
            Ok(theme) => Ok(theme),
            Err(_) => {
                warn!(
                    "event=theme_load module=repo status=fallback reason=unknown_value len={}",
                    raw.len()
                );
                Ok(Theme::default())
            }
        }
    }

    pub fn save_theme(&mut self, theme: Theme) -> RepoResult<()> {
        self.kv.set(THEME_KEY, theme.as_str())
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }
}
