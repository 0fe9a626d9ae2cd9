use thiserror::Error;

use crate::models::TaskId;
use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    /// The request never produced a response (connect, timeout, ...)
    #[error("Request to task service failed: {0}")]
    Transport(String),

    #[error("Task service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode task service response: {0}")]
    Decode(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    /// Whether the failure happened before the request reached the network
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }
}

impl From<FieldErrors> for TaskError {
    fn from(errors: FieldErrors) -> Self {
        TaskError::Validation(errors)
    }
}

impl From<reqwest::Error> for TaskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TaskError::Decode(err.to_string())
        } else {
            TaskError::Transport(err.to_string())
        }
    }
}
