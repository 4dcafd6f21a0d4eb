//! Render-ready view model.
//!
//! # Responsibility
//! - Combine filter, search and sort into one ordered list of row
//!   descriptors that any front end can draw.
//! - Provide the empty-state message and collection counts.
//!
//! # Invariants
//! - Counts always cover the whole collection, not the visible rows.
//! - Rows carry plain data only; no markup.

use crate::model::preferences::{FilterMode, SortMode, Theme};
use crate::model::task::{Priority, Task, TaskId};
use crate::view::counts::TaskCounts;
use crate::view::filter::filter_tasks;
use crate::view::sort::sort_tasks;

/// Long-form due date, e.g. `January 5, 2025`.
const DUE_DATE_DISPLAY_FORMAT: &str = "%B %-d, %Y";

/// Current user intent for the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filter: FilterMode,
    /// Lower-cased search text; empty means no search.
    pub search: String,
    pub sort: SortMode,
}

/// Visual accent derived from priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityAccent {
    None,
    Green,
    Yellow,
    Red,
}

impl From<Priority> for PriorityAccent {
    fn from(value: Priority) -> Self {
        match value {
            Priority::None => Self::None,
            Priority::Low => Self::Green,
            Priority::Medium => Self::Yellow,
            Priority::High => Self::Red,
        }
    }
}

/// One visible task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    /// `None` when the task has no description.
    pub description: Option<String>,
    /// Long-form due date, `None` when unset.
    pub due_label: Option<String>,
    pub priority: Priority,
    pub accent: PriorityAccent,
    pub completed: bool,
    /// Whether this row is currently being edited.
    pub editing: bool,
}

impl TaskRow {
    fn from_task(task: &Task, editing: Option<TaskId>) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: (!task.description.is_empty()).then(|| task.description.clone()),
            due_label: task
                .due_date
                .map(|date| date.format(DUE_DATE_DISPLAY_FORMAT).to_string()),
            priority: task.priority,
            accent: task.priority.into(),
            completed: task.completed,
            editing: editing == Some(task.id),
        }
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoView {
    pub rows: Vec<TaskRow>,
    pub counts: TaskCounts,
    /// Present only when `rows` is empty.
    pub empty_message: Option<String>,
    pub state: ViewState,
    pub theme: Theme,
}

/// Derives the visible rows for `state` from the full collection.
pub fn build_view(
    tasks: &[Task],
    state: &ViewState,
    theme: Theme,
    editing: Option<TaskId>,
) -> TodoView {
    let filtered = filter_tasks(tasks, state.filter, &state.search);
    let rows: Vec<TaskRow> = sort_tasks(&filtered, state.sort)
        .into_iter()
        .map(|task| TaskRow::from_task(task, editing))
        .collect();
    let empty_message = rows.is_empty().then(|| empty_message(state));

    TodoView {
        rows,
        counts: TaskCounts::from_tasks(tasks),
        empty_message,
        state: state.clone(),
        theme,
    }
}

/// Placeholder text for an empty list, e.g. `No todos active matching "milk"`.
pub fn empty_message(state: &ViewState) -> String {
    let mut message = String::from("No todos");
    if state.filter != FilterMode::All {
        message.push(' ');
        message.push_str(state.filter.as_str());
    }
    if !state.search.is_empty() {
        message.push_str(&format!(" matching \"{}\"", state.search));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::{build_view, empty_message, PriorityAccent, ViewState};
    use crate::model::preferences::{FilterMode, SortMode, Theme};
    use crate::model::task::{Priority, Task};
    use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};

    #[test]
    fn empty_message_mentions_filter_and_query() {
        let mut state = ViewState::default();
        assert_eq!(empty_message(&state), "No todos");

        state.filter = FilterMode::Active;
        state.search = "milk".to_string();
        assert_eq!(empty_message(&state), "No todos active matching \"milk\"");
    }

    #[test]
    fn rows_carry_display_fields_and_whole_collection_counts() {
        let base = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
        let mut done = Task::new("Done", "", None, Priority::Low, base).unwrap();
        done.completed = true;
        let open = Task::new(
            "Open",
            "notes",
            NaiveDate::from_ymd_opt(2025, 1, 5),
            Priority::High,
            base + TimeDelta::seconds(1),
        )
        .unwrap();
        let tasks = vec![open.clone(), done];

        let state = ViewState {
            filter: FilterMode::Active,
            search: String::new(),
            sort: SortMode::Oldest,
        };
        let view = build_view(&tasks, &state, Theme::Dark, Some(open.id));

        assert_eq!(view.rows.len(), 1);
        let row = &view.rows[0];
        assert_eq!(row.due_label.as_deref(), Some("January 5, 2025"));
        assert_eq!(row.description.as_deref(), Some("notes"));
        assert_eq!(row.accent, PriorityAccent::Red);
        assert!(row.editing);
        assert_eq!(view.counts.total, 2);
        assert_eq!(view.counts.completed, 1);
        assert!(view.empty_message.is_none());
        assert_eq!(view.theme, Theme::Dark);
    }
}
