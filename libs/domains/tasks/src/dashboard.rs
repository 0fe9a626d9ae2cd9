use std::mem;
use tracing::warn;

use crate::filter::{filter_tasks, FilterForm, TaskFilter};
use crate::models::{Task, TaskId};
use crate::notice::Notice;
use crate::repository::TaskRepository;
use crate::service::TaskService;
use crate::validation::FieldErrors;

const LOAD_FAILED: &str = "Error fetching tasks";
const FILTER_FAILED: &str = "Error fetching filtered tasks";
const DELETED: &str = "Task deleted successfully";
const DELETE_FAILED: &str = "Error deleting task";

/// State behind the task dashboard.
///
/// Holds the last fetched collection and the current filter; the visible list
/// is recomputed from those two on every call to [`Dashboard::visible`]. Every
/// fetch takes `&mut self`, so fetches never overlap and dropping the dashboard
/// drops any fetch still in flight.
///
/// Remote failures never escape: they become `error` or a queued [`Notice`]
/// and the previously fetched tasks stay in place.
pub struct Dashboard<R: TaskRepository> {
    service: TaskService<R>,
    tasks: Vec<Task>,
    filter: TaskFilter,
    error: Option<String>,
    notices: Vec<Notice>,
}

impl<R: TaskRepository> Dashboard<R> {
    pub fn new(service: TaskService<R>) -> Self {
        Self {
            service,
            tasks: Vec::new(),
            filter: TaskFilter::default(),
            error: None,
            notices: Vec::new(),
        }
    }

    pub fn service(&self) -> &TaskService<R> {
        &self.service
    }

    /// Fetch the whole collection without a server-side filter
    pub async fn load(&mut self) {
        self.fetch(&TaskFilter::default(), LOAD_FAILED).await;
    }

    /// Validate `form`, make it the current filter and refetch with it.
    ///
    /// Field errors are returned as-is and leave the dashboard untouched.
    pub async fn apply_filter(&mut self, form: &FilterForm) -> Result<(), FieldErrors> {
        self.filter = form.validate_filter()?;
        let filter = self.filter.clone();
        self.fetch(&filter, FILTER_FAILED).await;
        Ok(())
    }

    /// Delete a task, then refetch with the current filter.
    ///
    /// Returns whether the task was deleted.
    pub async fn delete(&mut self, id: &TaskId) -> bool {
        match self.service.delete_task(id).await {
            Ok(()) => {
                self.notices.push(Notice::success(DELETED));
                let filter = self.filter.clone();
                self.fetch(&filter, FILTER_FAILED).await;
                true
            }
            Err(e) => {
                warn!(task_id = %id, error = %e, "Failed to delete task");
                self.notices.push(Notice::error(DELETE_FAILED));
                false
            }
        }
    }

    async fn fetch(&mut self, filter: &TaskFilter, failure: &str) {
        match self.service.list_tasks(filter).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch tasks");
                self.error = Some(failure.to_string());
            }
        }
    }

    /// Tasks to display for the current filter, in fetch order
    pub fn visible(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.filter)
    }

    /// The last fetched collection, unfiltered
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Message from the last failed fetch, cleared by the next successful one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Look up a fetched task, e.g. to pre-fill the edit form
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use crate::events::TaskEvent;
    use crate::models::{TaskPriority, TaskStatus};
    use crate::notice::NoticeLevel;
    use crate::repository::MockTaskRepository;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn task(id: &str, name: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: TaskId::from(id),
            name: name.to_string(),
            description: String::new(),
            due_date: None,
            priority: Some(priority),
            status: Some(status),
            tags: vec![],
        }
    }

    fn scenario() -> Vec<Task> {
        vec![
            task("1", "Buy milk", TaskStatus::Pending, TaskPriority::Low),
            task("2", "Write report", TaskStatus::Completed, TaskPriority::High),
        ]
    }

    fn names(dashboard: &Dashboard<MockTaskRepository>) -> Vec<String> {
        dashboard.visible().iter().map(|t| t.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_load_shows_everything() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_list()
            .withf(|filter| filter.is_empty())
            .returning(|_| Ok(scenario()));

        let mut dashboard = Dashboard::new(TaskService::new(mock_repo));
        dashboard.load().await;

        assert_eq!(names(&dashboard), ["Buy milk", "Write report"]);
        assert_eq!(dashboard.error(), None);
    }

    #[tokio::test]
    async fn test_filter_applies_client_side_even_if_service_ignores_it() {
        let mut mock_repo = MockTaskRepository::new();
        // The service returns the full collection regardless of the query
        mock_repo.expect_list().returning(|_| Ok(scenario()));

        let mut dashboard = Dashboard::new(TaskService::new(mock_repo));
        dashboard
            .apply_filter(&FilterForm {
                search_term: "report".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&dashboard), ["Write report"]);

        dashboard
            .apply_filter(&FilterForm {
                status: "Pending".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&dashboard), ["Buy milk"]);
        assert_eq!(dashboard.tasks().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_filter_does_not_fetch() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_list().never();

        let mut dashboard = Dashboard::new(TaskService::new(mock_repo));
        let errors = dashboard
            .apply_filter(&FilterForm {
                due_date: "yesterday".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(errors.message_for("dueDateFilter").is_some());
        assert!(dashboard.filter().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_tasks() {
        let mut mock_repo = MockTaskRepository::new();
        let mut seq = Sequence::new();
        mock_repo
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(scenario()));
        mock_repo
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(TaskError::Transport("connection refused".to_string())));
        mock_repo
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(scenario()));

        let mut dashboard = Dashboard::new(TaskService::new(mock_repo));
        dashboard.load().await;

        dashboard
            .apply_filter(&FilterForm {
                priority: "High".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(dashboard.error(), Some("Error fetching filtered tasks"));
        assert_eq!(dashboard.tasks().len(), 2);
        assert_eq!(names(&dashboard), ["Write report"]);

        dashboard.load().await;
        assert_eq!(dashboard.error(), None);
    }

    #[tokio::test]
    async fn test_initial_load_failure() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_list().returning(|_| {
            Err(TaskError::Status {
                status: 500,
                body: String::new(),
            })
        });

        let mut dashboard = Dashboard::new(TaskService::new(mock_repo));
        dashboard.load().await;

        assert_eq!(dashboard.error(), Some("Error fetching tasks"));
        assert!(dashboard.visible().is_empty());
    }

    #[tokio::test]
    async fn test_delete_publishes_then_refetches_with_current_filter() {
        let mut mock_repo = MockTaskRepository::new();
        let mut seq = Sequence::new();
        mock_repo
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(scenario()));
        mock_repo
            .expect_delete()
            .with(eq(TaskId::from("1")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        mock_repo
            .expect_list()
            .withf(|filter| filter.status == Some(TaskStatus::Pending))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![task("2", "Write report", TaskStatus::Completed, TaskPriority::High)]));

        let mut dashboard = Dashboard::new(TaskService::new(mock_repo));
        let mut rx = dashboard.service().events().subscribe();

        dashboard
            .apply_filter(&FilterForm {
                status: "Pending".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&dashboard), ["Buy milk"]);

        assert!(dashboard.delete(&TaskId::from("1")).await);

        assert_eq!(rx.try_recv().unwrap(), TaskEvent::Deleted { id: TaskId::from("1") });
        assert!(dashboard.visible().is_empty());
        assert_eq!(dashboard.tasks().len(), 1);
        let notices = dashboard.take_notices();
        assert_eq!(notices, vec![Notice::success("Task deleted successfully")]);
        assert!(dashboard.take_notices().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_state() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_list().times(1).returning(|_| Ok(scenario()));
        mock_repo
            .expect_delete()
            .returning(|_| Err(TaskError::Transport("timeout".to_string())));

        let mut dashboard = Dashboard::new(TaskService::new(mock_repo));
        dashboard.load().await;

        assert!(!dashboard.delete(&TaskId::from("1")).await);

        assert_eq!(dashboard.tasks().len(), 2);
        let notices = dashboard.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, "Error deleting task");
    }

    #[tokio::test]
    async fn test_task_lookup() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_list().returning(|_| Ok(scenario()));

        let mut dashboard = Dashboard::new(TaskService::new(mock_repo));
        dashboard.load().await;

        assert_eq!(
            dashboard.task(&TaskId::from("2")).map(|t| t.name.as_str()),
            Some("Write report")
        );
        assert!(dashboard.task(&TaskId::from("9")).is_none());
    }
}
