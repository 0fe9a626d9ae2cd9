//! Taskboard
//!
//! Command-line dashboard for the remote task service: list with search and
//! filters, show, create, update and delete tasks.

use clap::{Args, Parser, Subcommand};
use core_config::api::TaskApiConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_tasks::{
    Dashboard, FilterForm, HttpTaskRepository, LiveUpdateForwarder, Notice, SubmitOutcome,
    TaskEditor, TaskError, TaskEvents, TaskForm, TaskId, TaskService,
};
use eyre::Result;
use std::io::{self, BufRead, Write};
use tracing::info;

mod render;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Browse and edit tasks on the remote task service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks, optionally searched or filtered
    List {
        /// Case-insensitive search over name, description and tags.
        /// When set, the other filters are ignored.
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Pending, "In Progress" or Completed
        #[arg(short, long)]
        status: Option<String>,

        /// Low, Medium or High
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date, YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,

        /// Print JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Show one task
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Create a task
    Create(TaskArgs),

    /// Update a task; omitted fields keep their current value
    Update {
        id: String,

        #[command(flatten)]
        fields: TaskArgs,
    },

    /// Delete a task and show the remaining list
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
struct TaskArgs {
    #[arg(short, long)]
    name: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    /// Due date, YYYY-MM-DD
    #[arg(long)]
    due: Option<String>,

    /// Low, Medium or High
    #[arg(short, long)]
    priority: Option<String>,

    /// Pending, "In Progress" or Completed
    #[arg(short, long)]
    status: Option<String>,

    /// Tag; repeat for several. Replaces the existing tags when given.
    #[arg(short, long = "tag")]
    tags: Vec<String>,
}

impl TaskArgs {
    fn apply(self, form: &mut TaskForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(due) = self.due {
            form.due_date = due;
        }
        if let Some(priority) = self.priority {
            form.priority = priority;
        }
        if let Some(status) = self.status {
            form.status = status;
        }
        if !self.tags.is_empty() {
            form.tags = self.tags;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let config = TaskApiConfig::from_env()?;
    let cli = Cli::parse();

    info!(base_url = %config.base_url, "Using task service");

    let events = TaskEvents::default();
    let forwarder = LiveUpdateForwarder::from_config(&config)?.map(|f| f.spawn(events.subscribe()));
    let service = TaskService::with_events(HttpTaskRepository::new(&config)?, events);

    // The service owns the only event publisher; once `run` returns the bus
    // closes and the forwarder drains what is left.
    let succeeded = run(cli.command, service).await?;

    if let Some(handle) = forwarder {
        handle.await?;
    }

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Commands, service: TaskService<HttpTaskRepository>) -> Result<bool> {
    match command {
        Commands::List {
            search,
            status,
            priority,
            due,
            json,
        } => {
            let form = FilterForm {
                search_term: search.unwrap_or_default(),
                status: status.unwrap_or_default(),
                priority: priority.unwrap_or_default(),
                due_date: due.unwrap_or_default(),
            };
            list(service, form, json).await
        }

        Commands::Show { id, json } => match service.get_task(&TaskId::from(id)).await {
            Ok(task) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&task)?);
                } else {
                    print!("{}", render::task_card(&task));
                }
                Ok(true)
            }
            Err(TaskError::NotFound(id)) => {
                eprintln!("Task {} not found", id);
                Ok(false)
            }
            Err(e) => {
                eprintln!("{}", render::notice_line(&Notice::error("Error fetching task details")));
                tracing::debug!(error = %e, "Show failed");
                Ok(false)
            }
        },

        Commands::Create(fields) => {
            let mut editor = TaskEditor::open(service, None).await;
            fields.apply(editor.form_mut());
            submit(editor).await
        }

        Commands::Update { id, fields } => {
            let mut editor = TaskEditor::open(service, Some(TaskId::from(id))).await;
            if let Some(error) = editor.error() {
                eprintln!("{}", render::notice_line(&Notice::error(error)));
                return Ok(false);
            }
            fields.apply(editor.form_mut());
            submit(editor).await
        }

        Commands::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this task?")? {
                println!("Cancelled.");
                return Ok(true);
            }

            let mut dashboard = Dashboard::new(service);
            let deleted = dashboard.delete(&TaskId::from(id)).await;
            print_notices(dashboard.take_notices());
            if deleted {
                print_dashboard(&dashboard);
                if let Some(error) = dashboard.error() {
                    eprintln!("{}", render::notice_line(&Notice::error(error)));
                }
            }
            Ok(deleted)
        }
    }
}

async fn list(service: TaskService<HttpTaskRepository>, form: FilterForm, json: bool) -> Result<bool> {
    let mut dashboard = Dashboard::new(service);

    if form == FilterForm::default() {
        dashboard.load().await;
    } else if let Err(errors) = dashboard.apply_filter(&form).await {
        eprintln!("Invalid filter:");
        eprint!("{}", render::field_errors(&errors));
        return Ok(false);
    }

    if json {
        if dashboard.error().is_none() {
            println!("{}", serde_json::to_string_pretty(&dashboard.visible())?);
        }
    } else {
        print_dashboard(&dashboard);
    }
    if let Some(error) = dashboard.error() {
        eprintln!("{}", render::notice_line(&Notice::error(error)));
    }
    Ok(dashboard.error().is_none())
}

async fn submit(mut editor: TaskEditor<HttpTaskRepository>) -> Result<bool> {
    let succeeded = match editor.submit().await {
        SubmitOutcome::Saved(task) => {
            print!("{}", render::task_card(&task));
            true
        }
        SubmitOutcome::Invalid(errors) => {
            eprintln!("The task was not saved:");
            eprint!("{}", render::field_errors(&errors));
            false
        }
        SubmitOutcome::Failed => {
            if let Some(error) = editor.error() {
                eprintln!("{}", render::notice_line(&Notice::error(error)));
            }
            false
        }
    };
    print_notices(editor.take_notices());
    Ok(succeeded)
}

fn print_dashboard(dashboard: &Dashboard<HttpTaskRepository>) {
    if dashboard.error().is_none() {
        print!("{}", render::task_list(&dashboard.visible()));
    }
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        if notice.is_error() {
            eprintln!("{}", render::notice_line(&notice));
        } else {
            println!("{}", render::notice_line(&notice));
        }
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
