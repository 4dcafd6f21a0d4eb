//! Collection-wide completion counts.

use crate::model::task::Task;

/// Totals over the entire collection, independent of filter and search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }
}
