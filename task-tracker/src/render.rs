//! Plain-text rendering of tasks and list views for the terminal.

use crate::task::Task;
use crate::view::{EmptyState, Filter, TaskCounts};
use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %H:%M";
const DUE_DATE_FORMAT: &str = "%b %-d, %Y";

pub fn render_task(task: &Task, now: DateTime<Utc>) -> String {
    let check = if task.is_completed() { "[x]" } else { "[ ]" };
    let mut out = format!(
        "{} {}  ({}) #{}",
        check,
        task.title(),
        task.priority(),
        task.category()
    );
    if let Some(due) = task.due_date() {
        out.push_str(&format!("  due {}", due.format(DUE_DATE_FORMAT)));
        if task.is_overdue(now) {
            out.push_str(" (Overdue)");
        }
    }
    out.push_str(&format!("\n    id: {}", task.id()));
    if !task.description().is_empty() {
        out.push_str("\n    ");
        out.push_str(task.description());
    }
    out.push_str(&format!(
        "\n    Created: {}",
        task.created_at().format(TIMESTAMP_FORMAT)
    ));
    if task.was_edited() {
        out.push_str(&format!(
            " • Updated: {}",
            task.updated_at().format(TIMESTAMP_FORMAT)
        ));
    }
    out
}

pub fn render_counts(counts: &TaskCounts, active: Filter) -> String {
    [Filter::All, Filter::Pending, Filter::Completed]
        .iter()
        .map(|filter| {
            let marker = if *filter == active { "*" } else { "" };
            format!("{}{} ({})", marker, filter, counts.for_filter(*filter))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_empty_state(state: EmptyState, search: &str) -> String {
    format!("{}\n{}", state.title(), state.message(search))
}

/// Counts header followed by either the tasks or the empty-state text.
pub fn render_list(
    visible: &[&Task],
    counts: &TaskCounts,
    filter: Filter,
    search: &str,
    now: DateTime<Utc>,
) -> String {
    let mut out = render_counts(counts, filter);
    out.push_str("\n\n");
    match crate::view::empty_state(visible, filter, search) {
        Some(state) => out.push_str(&render_empty_state(state, search)),
        None => {
            let rendered: Vec<String> = visible.iter().map(|task| render_task(task, now)).collect();
            out.push_str(&rendered.join("\n\n"));
        }
    }
    out
}
