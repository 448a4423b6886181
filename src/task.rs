//! Task wire types and display filters
//!
//! `Task` mirrors the backend's JSON schema exactly (camelCase field
//! names, ISO date strings). `TaskDraft` is the Task-minus-id request
//! body used for create and update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A task record as returned by the API.
///
/// `id` is assigned by the backend on creation and is immutable after
/// that. Every task held by the viewer came from the server, so the
/// id is always present there; it is optional only to model drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

/// Request body for create and update: a task without an id.
///
/// Update uses full replacement semantics, so the draft always carries
/// every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub completed: bool,
}

/// Named predicate buckets applied to the task list for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
    Upcoming,
    Today,
}

impl Filter {
    /// All filters in tab-bar order.
    pub const ALL: [Filter; 5] = [
        Filter::All,
        Filter::Active,
        Filter::Completed,
        Filter::Upcoming,
        Filter::Today,
    ];

    /// Stable identifier used on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
            Filter::Upcoming => "upcoming",
            Filter::Today => "today",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All Tasks",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
            Filter::Upcoming => "Upcoming",
            Filter::Today => "Today",
        }
    }

    /// Headline shown when the filtered list is empty.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Filter::All => "No tasks yet",
            Filter::Active => "No active tasks",
            Filter::Completed => "No completed tasks",
            Filter::Upcoming => "No upcoming tasks",
            Filter::Today => "No tasks due today",
        }
    }

    /// Secondary line under the empty-state headline.
    pub fn empty_hint(&self) -> &'static str {
        match self {
            Filter::All => "Create your first task to get started",
            _ => "Tasks matching this filter will appear here",
        }
    }

    /// Parse a filter id, case-insensitively.
    pub fn parse(value: &str) -> Result<Filter> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            "upcoming" => Ok(Filter::Upcoming),
            "today" => Ok(Filter::Today),
            other => Err(Error::InvalidArgument(format!(
                "unknown filter '{other}' (expected all, active, completed, upcoming, today)"
            ))),
        }
    }
}
