//! Completion filter plus case-insensitive text search.
//!
//! # Invariants
//! - Output preserves input order.
//! - An empty query matches every task.

use crate::model::preferences::FilterMode;
use crate::model::task::Task;

/// Returns the tasks that match both `mode` and `query`.
///
/// `query` is matched as a case-insensitive substring of the title or the
/// description.
pub fn filter_tasks<'a>(tasks: &'a [Task], mode: FilterMode, query: &str) -> Vec<&'a Task> {
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|task| matches_mode(task, mode) && matches_query(task, &needle))
        .collect()
}

fn matches_mode(task: &Task, mode: FilterMode) -> bool {
    match mode {
        FilterMode::All => true,
        FilterMode::Active => !task.completed,
        FilterMode::Completed => task.completed,
    }
}

/// `needle` must already be lower-cased.
fn matches_query(task: &Task, needle: &str) -> bool {
    needle.is_empty()
        || task.title.to_lowercase().contains(needle)
        || task.description.to_lowercase().contains(needle)
}
