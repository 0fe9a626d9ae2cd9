//! REST implementation of [`TaskRepository`]

use async_trait::async_trait;
use core_config::api::TaskApiConfig;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{TaskError, TaskResult};
use crate::filter::TaskFilter;
use crate::models::{Task, TaskId, TaskInput};
use crate::repository::TaskRepository;

/// Task repository backed by the task service's `/tasks` resource
#[derive(Clone)]
pub struct HttpTaskRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskRepository {
    pub fn new(config: &TaskApiConfig) -> TaskResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TaskError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/tasks/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    async fn send(request: reqwest::RequestBuilder, id: Option<&TaskId>) -> TaskResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Task service request failed");
            TaskError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(TaskError::NotFound(id.clone()));
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Task service returned an error");
        Err(TaskError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> TaskResult<T> {
        response
            .json()
            .await
            .map_err(|e| TaskError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TaskRepository for HttpTaskRepository {
    #[instrument(skip(self), fields(search = filter.is_search()))]
    async fn list(&self, filter: &TaskFilter) -> TaskResult<Vec<Task>> {
        let request = self.client.get(self.tasks_url()).query(filter);
        let tasks: Vec<Task> = Self::decode(Self::send(request, None).await?).await?;
        debug!(count = tasks.len(), "Fetched tasks");
        Ok(tasks)
    }

    #[instrument(skip(self, id), fields(task_id = %id))]
    async fn get(&self, id: &TaskId) -> TaskResult<Task> {
        let request = self.client.get(self.task_url(id));
        Self::decode(Self::send(request, Some(id)).await?).await
    }

    #[instrument(skip(self, input), fields(task_name = %input.name))]
    async fn create(&self, input: &TaskInput) -> TaskResult<Task> {
        let request = self.client.post(self.tasks_url()).json(input);
        Self::decode(Self::send(request, None).await?).await
    }

    #[instrument(skip(self, id, input), fields(task_id = %id))]
    async fn update(&self, id: &TaskId, input: &TaskInput) -> TaskResult<Task> {
        let request = self.client.put(self.task_url(id)).json(input);
        Self::decode(Self::send(request, Some(id)).await?).await
    }

    #[instrument(skip(self, id), fields(task_id = %id))]
    async fn delete(&self, id: &TaskId) -> TaskResult<()> {
        let request = self.client.delete(self.task_url(id));
        Self::send(request, Some(id)).await?;
        Ok(())
    }
}
