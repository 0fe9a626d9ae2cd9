//! Tasks Domain
//!
//! Client-side domain for a remote task service: typed task records, the
//! dashboard filter/search engine, form validation and a REST repository.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐
//! │  Dashboard  │   │ TaskEditor  │  ← View state: fetched tasks, filter, notices
//! └──────┬──────┘   └──────┬──────┘
//!        └────────┬────────┘
//! ┌───────────────▼─────────────┐
//! │         TaskService         │  ← Validation, task events
//! └───────────────┬─────────────┘
//! ┌───────────────▼─────────────┐
//! │  TaskRepository (trait)     │  ← HttpTaskRepository over reqwest
//! └───────────────┬─────────────┘
//! ┌───────────────▼─────────────┐
//! │   Models, filter, dates     │  ← Pure data and functions
//! └─────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::api::TaskApiConfig;
//! use domain_tasks::{Dashboard, FilterForm, HttpTaskRepository, TaskService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = HttpTaskRepository::new(&TaskApiConfig::default())?;
//! let mut dashboard = Dashboard::new(TaskService::new(repository));
//!
//! dashboard.load().await;
//! dashboard
//!     .apply_filter(&FilterForm {
//!         search_term: "report".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! for task in dashboard.visible() {
//!     println!("{}", task.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dashboard;
pub mod dates;
pub mod editor;
pub mod error;
pub mod events;
pub mod filter;
pub mod live_updates;
pub mod models;
pub mod notice;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use client::HttpTaskRepository;
pub use dashboard::Dashboard;
pub use editor::{SubmitOutcome, TaskEditor};
pub use error::{TaskError, TaskResult};
pub use events::{TaskEvent, TaskEvents};
pub use filter::{filter_tasks, FilterForm, TaskFilter};
pub use live_updates::LiveUpdateForwarder;
pub use models::{Task, TaskId, TaskInput, TaskPriority, TaskStatus};
pub use notice::{Notice, NoticeLevel};
pub use repository::TaskRepository;
pub use service::TaskService;
pub use validation::{FieldError, FieldErrors, TaskForm};
