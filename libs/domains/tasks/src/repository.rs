use async_trait::async_trait;

use crate::error::TaskResult;
use crate::filter::TaskFilter;
use crate::models::{Task, TaskId, TaskInput};

/// Access to the remote task collection
///
/// Each call is a single request/response exchange with no retry. A missing
/// task surfaces as [`crate::TaskError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// List tasks; the filter is forwarded as query parameters
    async fn list(&self, filter: &TaskFilter) -> TaskResult<Vec<Task>>;

    /// Get a task by ID
    async fn get(&self, id: &TaskId) -> TaskResult<Task>;

    /// Create a new task
    async fn create(&self, input: &TaskInput) -> TaskResult<Task>;

    /// Replace the fields of an existing task
    async fn update(&self, id: &TaskId, input: &TaskInput) -> TaskResult<Task>;

    /// Delete a task by ID
    async fn delete(&self, id: &TaskId) -> TaskResult<()>;
}
