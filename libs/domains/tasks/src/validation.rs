use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use validator::{Validate, ValidationErrors};

use crate::dates;
use crate::models::{Task, TaskInput, TaskPriority, TaskStatus};

/// A validation failure attached to one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the field (`name`, `dueDate`, `statusFilter`, ...)
    pub field: String,
    pub message: String,
}

/// Every field-level failure found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First message recorded for `field`
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

const TASK_FIELDS: [(&str, &str); 5] = [
    ("name", "name"),
    ("description", "description"),
    ("due_date", "dueDate"),
    ("priority", "priority"),
    ("status", "status"),
];

/// Flatten validator output into field errors, in form order
impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let by_field = errors.field_errors();
        let mut out = FieldErrors::new();

        for (rust_name, wire_name) in TASK_FIELDS {
            let Some(field_errors) = by_field.get(rust_name) else {
                continue;
            };
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.push(wire_name, message);
            }
        }
        out
    }
}

/// Raw values of the create/edit form.
///
/// Every field is kept as entered so the view can redisplay it; typed values
/// only exist after [`TaskForm::validate_input`] succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct TaskForm {
    #[validate(length(min = 1, message = "Task Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Due Date is required"))]
    pub due_date: String,
    #[validate(length(min = 1, message = "Priority is required"))]
    pub priority: String,
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub tags: Vec<String>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            due_date: String::new(),
            priority: TaskPriority::default().to_string(),
            status: TaskStatus::default().to_string(),
            tags: Vec::new(),
        }
    }
}

impl TaskForm {
    /// Pre-fill the form from an existing task. A priority or status the
    /// client can't read is left blank so it has to be chosen again.
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            due_date: task.due_date_label(),
            priority: task.priority.map(|p| p.to_string()).unwrap_or_default(),
            status: task.status.map(|s| s.to_string()).unwrap_or_default(),
            tags: task.tags.clone(),
        }
    }

    fn trimmed(&self) -> Self {
        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !tags.iter().any(|seen| seen == tag) {
                tags.push(tag.to_string());
            }
        }

        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            due_date: self.due_date.trim().to_string(),
            priority: self.priority.trim().to_string(),
            status: self.status.trim().to_string(),
            tags,
        }
    }

    /// Validate the form into a request body, collecting every field error
    pub fn validate_input(&self) -> Result<TaskInput, FieldErrors> {
        let form = self.trimmed();
        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let due_date = parse_present(&mut errors, "dueDate", &form.due_date, |raw| {
            dates::parse_input_date(raw).ok_or_else(|| "Due Date must be a valid date".to_string())
        });
        let priority = parse_present(&mut errors, "priority", &form.priority, |raw| {
            TaskPriority::from_str(raw).map_err(|_| one_of::<TaskPriority>("Priority"))
        });
        let status = parse_present(&mut errors, "status", &form.status, |raw| {
            TaskStatus::from_str(raw).map_err(|_| one_of::<TaskStatus>("Status"))
        });

        match (due_date, priority, status) {
            (Some(due_date), Some(priority), Some(status)) => errors.into_result(|| TaskInput {
                name: form.name,
                description: form.description,
                due_date,
                priority,
                status,
                tags: form.tags,
            }),
            _ => Err(errors),
        }
    }
}

/// Parse a field that passed the required check; empty values were already
/// reported by the validator.
fn parse_present<T>(
    errors: &mut FieldErrors,
    field: &str,
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    if raw.is_empty() {
        return None;
    }
    match parse(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

/// "Status must be one of Pending, In Progress, Completed"
fn one_of<E: IntoEnumIterator + fmt::Display>(label: &str) -> String {
    let allowed: Vec<String> = E::iter().map(|value| value.to_string()).collect();
    format!("{} must be one of {}", label, allowed.join(", "))
}
