use std::mem;
use tracing::warn;

use crate::error::TaskError;
use crate::models::{Task, TaskId};
use crate::notice::Notice;
use crate::repository::TaskRepository;
use crate::service::TaskService;
use crate::validation::{FieldErrors, TaskForm};

const FETCH_FAILED: &str = "Error fetching task details";
const SAVE_FAILED: &str = "Error saving task";
const CREATED: &str = "Task created successfully";
const UPDATED: &str = "Task updated successfully";

/// Result of submitting the task form
#[derive(Debug)]
pub enum SubmitOutcome {
    Saved(Task),
    /// Field errors to show next to their inputs; nothing was sent
    Invalid(FieldErrors),
    /// The task service rejected or never received the request
    Failed,
}

/// State behind the create/edit form
pub struct TaskEditor<R: TaskRepository> {
    service: TaskService<R>,
    id: Option<TaskId>,
    form: TaskForm,
    error: Option<String>,
    notices: Vec<Notice>,
}

impl<R: TaskRepository> TaskEditor<R> {
    /// Open the form: blank for a new task, pre-filled from the service for `id`
    pub async fn open(service: TaskService<R>, id: Option<TaskId>) -> Self {
        let mut editor = Self {
            service,
            id,
            form: TaskForm::default(),
            error: None,
            notices: Vec::new(),
        };

        if let Some(id) = editor.id.clone() {
            match editor.service.get_task(&id).await {
                Ok(task) => editor.form = TaskForm::from_task(&task),
                Err(e) => {
                    warn!(task_id = %id, error = %e, "Failed to load task for editing");
                    editor.error = Some(FETCH_FAILED.to_string());
                }
            }
        }

        editor
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let result = match &self.id {
            Some(id) => self.service.update_task(id, &self.form).await,
            None => self.service.create_task(&self.form).await,
        };

        match result {
            Ok(task) => {
                self.error = None;
                self.notices
                    .push(Notice::success(if self.is_edit() { UPDATED } else { CREATED }));
                SubmitOutcome::Saved(task)
            }
            Err(TaskError::Validation(errors)) => SubmitOutcome::Invalid(errors),
            Err(e) => {
                warn!(error = %e, "Failed to save task");
                self.error = Some(SAVE_FAILED.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        mem::take(&mut self.notices)
    }
}
