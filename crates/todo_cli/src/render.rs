//! Plain-text rendering of the core view model.

use std::fmt::Write as _;
use todo_core::{PriorityAccent, Task, TaskCounts, TaskRow, TodoView};

const SHORT_ID_LEN: usize = 8;

/// Renders every visible row followed by the counts footer.
pub fn render_view(view: &TodoView) -> String {
    let mut out = String::new();
    match &view.empty_message {
        Some(message) => {
            let _ = writeln!(out, "{message}");
        }
        None => {
            for row in &view.rows {
                render_row(&mut out, row);
            }
        }
    }
    let _ = writeln!(out, "{}", render_counts(view.counts));
    out
}

pub fn render_counts(counts: TaskCounts) -> String {
    format!(
        "total={} active={} completed={}",
        counts.total, counts.active, counts.completed
    )
}

pub fn render_created(task: &Task) -> String {
    format!("added {}", short_id(&task.id.to_string()))
}

pub fn render_status_line(task: &Task) -> String {
    let state = if task.completed { "completed" } else { "active" };
    format!("{} {state}", short_id(&task.id.to_string()))
}

fn render_row(out: &mut String, row: &TaskRow) {
    let check = if row.completed { "[x]" } else { "[ ]" };
    let _ = write!(out, "{check} {} {}", short_id(&row.id.to_string()), row.title);
    if let Some(marker) = accent_marker(row.accent) {
        let _ = write!(out, "  {marker}{}", row.priority);
    }
    if let Some(due) = &row.due_label {
        let _ = write!(out, "  (due {due})");
    }
    out.push('\n');
    if let Some(description) = &row.description {
        let _ = writeln!(out, "      {description}");
    }
}

fn accent_marker(accent: PriorityAccent) -> Option<&'static str> {
    match accent {
        PriorityAccent::None => None,
        PriorityAccent::Green => Some("+"),
        PriorityAccent::Yellow => Some("~"),
        PriorityAccent::Red => Some("!"),
    }
}

fn short_id(id: &str) -> &str {
    &id[..SHORT_ID_LEN.min(id.len())]
}
