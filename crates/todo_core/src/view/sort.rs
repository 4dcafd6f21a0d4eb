//! Ordering by creation time.
//!
//! Uses a stable sort, so tasks with equal `created_at` keep their current
//! relative order in both directions.

use crate::model::preferences::SortMode;
use crate::model::task::Task;

/// Returns a newly ordered copy of `tasks`; the input is left untouched.
pub fn sort_tasks<'a>(tasks: &[&'a Task], mode: SortMode) -> Vec<&'a Task> {
    let mut ordered = tasks.to_vec();
    match mode {
        SortMode::Newest => ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Oldest => ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    ordered
}
