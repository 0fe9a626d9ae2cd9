//! Dashboard filter and search engine.
//!
//! The visible task list is always `filter_tasks(last_fetched, filter)`. There
//! are two mutually exclusive modes:
//!
//! - **search**: a non-empty search term matches, case-insensitively, as a
//!   substring of the name, the description or any tag; the structured fields
//!   are ignored;
//! - **structured**: with no search term, every set field must equal the
//!   task's value, due dates compared as calendar dates.
//!
//! Source order is preserved and filtering never fails.

use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;

use crate::dates;
use crate::models::{Task, TaskPriority, TaskStatus};
use crate::validation::FieldErrors;

/// Filter specification for the task list.
///
/// Serializes to the list endpoint's query parameters; unset fields are left
/// out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskFilter {
    #[serde(rename = "searchTerm", skip_serializing_if = "String::is_empty")]
    search_term: String,
    #[serde(rename = "statusFilter", skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(rename = "priorityFilter", skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(rename = "dueDateFilter", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term; surrounding whitespace is dropped
    pub fn with_search(mut self, term: impl AsRef<str>) -> Self {
        self.search_term = term.as_ref().trim().to_string();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Whether the filter runs in search mode
    pub fn is_search(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Whether the filter lets every task through
    pub fn is_empty(&self) -> bool {
        !self.is_search()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.is_search() {
            self.matches_search(task)
        } else {
            self.matches_fields(task)
        }
    }

    fn matches_search(&self, task: &Task) -> bool {
        let needle = self.search_term.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(&task.name)
            || contains(&task.description)
            || task.tags.iter().any(|tag| contains(tag))
    }

    fn matches_fields(&self, task: &Task) -> bool {
        // An unreadable stored date never equals a set filter date
        let due_matches = self.due_date.is_none_or(|due| task.due_on() == Some(due));

        due_matches
            && self.status.is_none_or(|status| task.status == Some(status))
            && self.priority.is_none_or(|priority| task.priority == Some(priority))
    }
}

/// Keep the tasks `filter` accepts, in their original order
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// Raw filter inputs as the view collects them; empty strings mean "any"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub search_term: String,
    pub status: String,
    pub priority: String,
    pub due_date: String,
}

impl FilterForm {
    /// Validate into a [`TaskFilter`], reporting errors under the query names
    pub fn validate_filter(&self) -> Result<TaskFilter, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut filter = TaskFilter::new().with_search(&self.search_term);

        let status = self.status.trim();
        if !status.is_empty() {
            match TaskStatus::from_str(status) {
                Ok(status) => filter.status = Some(status),
                Err(_) => errors.push("statusFilter", format!("Unknown status '{}'", status)),
            }
        }

        let priority = self.priority.trim();
        if !priority.is_empty() {
            match TaskPriority::from_str(priority) {
                Ok(priority) => filter.priority = Some(priority),
                Err(_) => {
                    errors.push("priorityFilter", format!("Unknown priority '{}'", priority))
                }
            }
        }

        let due_date = self.due_date.trim();
        if !due_date.is_empty() {
            match dates::parse_input_date(due_date) {
                Some(date) => filter.due_date = Some(date),
                None => errors.push("dueDateFilter", "Due Date must be a valid date"),
            }
        }

        if errors.is_empty() { Ok(filter) } else { Err(errors) }
    }
}
