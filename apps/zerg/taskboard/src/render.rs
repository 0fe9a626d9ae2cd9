//! Plain-text rendering of tasks, notices and form errors

use domain_tasks::{FieldErrors, Notice, NoticeLevel, Task};
use std::fmt;

/// One task as a card: name and id, then one indented line per attribute
pub fn task_card(task: &Task) -> String {
    let mut lines = vec![format!("{}  [{}]", task.name, task.id)];
    if !task.description.is_empty() {
        lines.push(format!("  {}", task.description));
    }
    lines.push(format!("  Due Date: {}", task.due_date_label()));
    lines.push(format!("  Priority: {}", label(task.priority)));
    lines.push(format!("  Status: {}", label(task.status)));
    if !task.tags.is_empty() {
        lines.push(format!("  Tags: {}", task.tags.join(", ")));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn label<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "Unknown".to_string())
}

pub fn task_list(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "No tasks to show.\n".to_string();
    }
    tasks
        .iter()
        .map(|task| task_card(task))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn notice_line(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✓ {}", notice.message),
        NoticeLevel::Error => format!("✗ {}", notice.message),
    }
}

pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|error| format!("  {}: {}\n", error.field, error.message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_tasks::{TaskId, TaskPriority, TaskStatus};

    fn task() -> Task {
        Task {
            id: TaskId::from("t2"),
            name: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            due_date: Some("2024-06-30T00:00:00.000Z".to_string()),
            priority: Some(TaskPriority::High),
            status: Some(TaskStatus::InProgress),
            tags: vec!["work".to_string(), "q2".to_string()],
        }
    }

    #[test]
    fn test_task_card() {
        assert_eq!(
            task_card(&task()),
            "Write report  [t2]\n  Quarterly numbers\n  Due Date: 2024-06-30\n  Priority: High\n  Status: In Progress\n  Tags: work, q2\n"
        );
    }

    #[test]
    fn test_task_card_without_optional_fields() {
        let bare = Task {
            description: String::new(),
            due_date: None,
            tags: vec![],
            ..task()
        };
        assert_eq!(
            task_card(&bare),
            "Write report  [t2]\n  Due Date: \n  Priority: High\n  Status: In Progress\n"
        );
    }

    #[test]
    fn test_task_card_with_unrecognised_values() {
        let legacy = Task {
            status: None,
            priority: None,
            tags: vec![],
            ..task()
        };
        assert_eq!(
            task_card(&legacy),
            "Write report  [t2]\n  Quarterly numbers\n  Due Date: 2024-06-30\n  Priority: Unknown\n  Status: Unknown\n"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(task_list(&[]), "No tasks to show.\n");
    }

    #[test]
    fn test_notice_and_field_errors() {
        assert_eq!(notice_line(&Notice::error("Error deleting task")), "✗ Error deleting task");

        let mut errors = FieldErrors::new();
        errors.push("name", "Task Name is required");
        assert_eq!(field_errors(&errors), "  name: Task Name is required\n");
    }
}
