//! Forwarding of task events to the live-update endpoint

use core_config::api::TaskApiConfig;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::error::{TaskError, TaskResult};
use crate::events::TaskEvent;

/// Posts every task event as JSON to `{live_updates_url}/events`.
///
/// Delivery is best effort: failures are logged and the next event is tried.
#[derive(Clone)]
pub struct LiveUpdateForwarder {
    client: reqwest::Client,
    events_url: String,
}

impl LiveUpdateForwarder {
    /// Build a forwarder, or `None` when no live-update URL is configured
    pub fn from_config(config: &TaskApiConfig) -> TaskResult<Option<Self>> {
        let Some(base_url) = config.live_updates_url.as_deref() else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TaskError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Some(Self {
            client,
            events_url: format!("{}/events", base_url.trim_end_matches('/')),
        }))
    }

    pub fn events_url(&self) -> &str {
        &self.events_url
    }

    #[instrument(skip(self, event), fields(task_id = %event.task_id()))]
    pub async fn forward(&self, event: &TaskEvent) -> TaskResult<()> {
        let response = self
            .client
            .post(&self.events_url)
            .json(event)
            .send()
            .await
            .map_err(|e| TaskError::Transport(format!("Failed to publish live update: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TaskError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Live update published");
        Ok(())
    }

    /// Forward events until every publisher is gone
    pub fn spawn(self, mut rx: broadcast::Receiver<TaskEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if let Err(e) = self.forward(&event).await {
                            warn!(error = %e, "Dropping live update");
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Live-update forwarder fell behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            info!("Live-update forwarder stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarder_disabled_without_url() {
        let forwarder = LiveUpdateForwarder::from_config(&TaskApiConfig::default()).unwrap();
        assert!(forwarder.is_none());
    }

    #[test]
    fn test_forwarder_events_url() {
        let config = TaskApiConfig::default().with_live_updates("http://localhost:4000/");
        let forwarder = LiveUpdateForwarder::from_config(&config).unwrap().unwrap();
        assert_eq!(forwarder.events_url(), "http://localhost:4000/events");
    }
}
