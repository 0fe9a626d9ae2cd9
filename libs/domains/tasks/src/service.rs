use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::TaskResult;
use crate::events::{TaskEvent, TaskEvents};
use crate::filter::TaskFilter;
use crate::models::{Task, TaskId};
use crate::repository::TaskRepository;
use crate::validation::TaskForm;

/// Service layer for task operations
///
/// Validates forms before anything reaches the repository and publishes a
/// [`TaskEvent`] after every successful mutation.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
    events: TaskEvents,
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            events: self.events.clone(),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_events(repository, TaskEvents::default())
    }

    pub fn with_events(repository: R, events: TaskEvents) -> Self {
        Self {
            repository: Arc::new(repository),
            events,
        }
    }

    pub fn events(&self) -> &TaskEvents {
        &self.events
    }

    /// List tasks, forwarding the filter to the task service
    pub async fn list_tasks(&self, filter: &TaskFilter) -> TaskResult<Vec<Task>> {
        self.repository.list(filter).await
    }

    /// Get a task by ID
    #[instrument(skip(self, id), fields(task_id = %id))]
    pub async fn get_task(&self, id: &TaskId) -> TaskResult<Task> {
        self.repository.get(id).await
    }

    /// Create a new task from a validated form
    #[instrument(skip(self, form), fields(task_name = %form.name))]
    pub async fn create_task(&self, form: &TaskForm) -> TaskResult<Task> {
        let input = form.validate_input()?;
        let task = self.repository.create(&input).await?;

        info!(task_id = %task.id, "Task created");
        self.events.publish(TaskEvent::Created { task: task.clone() });
        Ok(task)
    }

    /// Replace a task's fields from a validated form
    #[instrument(skip(self, id, form), fields(task_id = %id))]
    pub async fn update_task(&self, id: &TaskId, form: &TaskForm) -> TaskResult<Task> {
        let input = form.validate_input()?;
        let task = self.repository.update(id, &input).await?;

        info!("Task updated");
        self.events.publish(TaskEvent::Updated { task: task.clone() });
        Ok(task)
    }

    /// Delete a task
    #[instrument(skip(self, id), fields(task_id = %id))]
    pub async fn delete_task(&self, id: &TaskId) -> TaskResult<()> {
        self.repository.delete(id).await?;

        info!("Task deleted");
        self.events.publish(TaskEvent::Deleted { id: id.clone() });
        Ok(())
    }
}
