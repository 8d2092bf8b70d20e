//! Derived, read-only views over the task collection: filtering, search,
//! display ordering, empty-state selection and per-filter counts.
//!
//! Everything here is a pure function of its inputs.

use crate::task::Task;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown filter '{0}', expected one of: all, completed, pending")]
pub struct UnknownFilter(String);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Pending => !task.completed,
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Pending => "pending",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "completed" => Ok(Filter::Completed),
            "pending" => Ok(Filter::Pending),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

/// Case-insensitive substring match against title, description or category.
/// An empty term matches every task.
pub fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    [&task.title, &task.description, &task.category]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// Display order: pending before completed, then higher priority, then
/// earlier due date (dated before undated), then newest first, then id.
pub fn compare_for_display(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.priority.weight().cmp(&a.priority.weight()))
        .then_with(|| compare_due_dates(a.due_date, b.due_date))
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

fn compare_due_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The tasks to display for the given filter and search term, in display order.
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: Filter, search: &str) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| filter.matches(task) && matches_search(task, search))
        .collect();
    visible.sort_by(|a, b| compare_for_display(a, b));
    visible
}

/// Why a view came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoSearchResults,
    NoCompletedTasks,
    NoPendingTasks,
    NoTasks,
}

impl EmptyState {
    /// An active search outranks the filter mode.
    pub fn select(filter: Filter, search: &str) -> Self {
        if !search.is_empty() {
            return EmptyState::NoSearchResults;
        }
        match filter {
            Filter::Completed => EmptyState::NoCompletedTasks,
            Filter::Pending => EmptyState::NoPendingTasks,
            Filter::All => EmptyState::NoTasks,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EmptyState::NoSearchResults => "No tasks found",
            EmptyState::NoCompletedTasks => "No completed tasks",
            EmptyState::NoPendingTasks => "No pending tasks",
            EmptyState::NoTasks => "No tasks yet",
        }
    }

    pub fn message(&self, search: &str) -> String {
        match self {
            EmptyState::NoSearchResults => format!(
                "No tasks match your search for \"{}\". Try adjusting your search terms.",
                search
            ),
            EmptyState::NoCompletedTasks => "Complete some tasks to see them here!".to_string(),
            EmptyState::NoPendingTasks => "Great job! You have no pending tasks.".to_string(),
            EmptyState::NoTasks => {
                "Create your first task to get started with managing your daily activities!"
                    .to_string()
            }
        }
    }
}

/// `None` unless `visible` is empty.
pub fn empty_state(visible: &[&Task], filter: Filter, search: &str) -> Option<EmptyState> {
    visible
        .is_empty()
        .then(|| EmptyState::select(filter, search))
}

/// Task totals shown beside each filter option, over the unfiltered collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounts {
    pub all: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            all: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }

    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Completed => self.completed,
            Filter::Pending => self.pending,
        }
    }
}
