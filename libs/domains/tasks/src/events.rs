//! In-process task events.
//!
//! The service publishes one event after each successful mutation. Anything
//! interested (the live-update forwarder, a UI refresh hook) subscribes; with no
//! subscribers an event is simply dropped.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::models::{Task, TaskId};

const DEFAULT_CAPACITY: usize = 64;

/// A completed task mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum TaskEvent {
    #[serde(rename = "createTask")]
    Created { task: Task },
    #[serde(rename = "updateTask")]
    Updated { task: Task },
    #[serde(rename = "deleteTask")]
    Deleted { id: TaskId },
}

impl TaskEvent {
    pub fn task_id(&self) -> &TaskId {
        match self {
            TaskEvent::Created { task } | TaskEvent::Updated { task } => &task.id,
            TaskEvent::Deleted { id } => id,
        }
    }
}

/// Broadcast bus for [`TaskEvent`]s
#[derive(Clone)]
pub struct TaskEvents {
    tx: broadcast::Sender<TaskEvent>,
}

impl TaskEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.tx.subscribe()
    }

    /// Publish an event, returning how many subscribers received it
    pub fn publish(&self, event: TaskEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                debug!(task_id = %event.task_id(), "No subscribers for task event");
                0
            }
        }
    }
}

impl Default for TaskEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
