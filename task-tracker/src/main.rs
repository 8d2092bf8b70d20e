use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use task_tracker::config::Config;
use task_tracker::render;
use task_tracker::{
    Clock, FileStore, Filter, KeyValueStore, Priority, SUGGESTED_CATEGORIES, Session, SystemClock,
    TaskFields,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "task-tracker", version, about = "Track your personal tasks")]
struct Cli {
    /// Overrides the configured data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Start a session under the given name
    Login { username: String },
    /// End the session; stored tasks are kept
    Logout,
    /// Show who is logged in
    Whoami,
    /// Add a new task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(short, long, default_value = task_tracker::DEFAULT_CATEGORY)]
        category: String,
    },
    /// Edit a pending task; omitted fields keep their value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        priority: Option<Priority>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Mark a task completed, or pending again
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
    /// List tasks in display order
    List {
        #[arg(short, long, default_value = "all")]
        filter: Filter,
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Switch between light and dark theme
    Theme,
    /// Show the suggested categories
    Categories,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = Config::load().context("cannot load configuration")?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Using data directory {}", config.data_dir.display());

    let mut session = Session::restore(FileStore::new(config.data_dir), SystemClock);
    run(&mut session, args.command)
}

fn run<S, C>(session: &mut Session<S, C>, command: Commands) -> anyhow::Result<()>
where
    S: KeyValueStore + Clone,
    C: Clock,
{
    match command {
        Commands::Login { username } => {
            let user = session.login(&username)?;
            println!("Welcome back, {}!", user.username());
        }
        Commands::Logout => {
            session.logout();
            println!("Logged out");
        }
        Commands::Whoami => match session.user() {
            Some(user) => println!("{}", user.username()),
            None => println!("Not logged in"),
        },
        Commands::Add {
            title,
            description,
            priority,
            due,
            category,
        } => {
            session.open_form();
            let fields = TaskFields::new(title)
                .description(description)
                .priority(priority)
                .due_date(due)
                .category(category);
            let task = session.tasks_mut()?.create(fields)?;
            session.close_form();
            println!("Task added with ID {}", task.id());
        }
        Commands::Edit {
            id,
            title,
            description,
            priority,
            due,
            clear_due,
            category,
        } => {
            let repository = session.tasks_mut()?;
            let Some(existing) = repository.get(&id) else {
                println!("No task with ID {}", id);
                return Ok(());
            };
            if existing.is_completed() {
                bail!("Task {} is completed; toggle it back to pending to edit it", id);
            }
            let mut fields = TaskFields::from(existing);
            if let Some(title) = title {
                fields.title = title;
            }
            if let Some(description) = description {
                fields.description = description;
            }
            if let Some(priority) = priority {
                fields.priority = priority;
            }
            if clear_due {
                fields.due_date = None;
            } else if due.is_some() {
                fields.due_date = due;
            }
            if let Some(category) = category {
                fields.category = category;
            }
            match repository.update(&id, fields)? {
                Some(task) => println!("Task {} updated", task.id()),
                None => println!("No task with ID {}", id),
            }
        }
        Commands::Toggle { id } => match session.tasks_mut()?.toggle_complete(&id) {
            Some(task) if task.is_completed() => println!("Task {} completed", task.id()),
            Some(task) => println!("Task {} marked pending", task.id()),
            None => println!("No task with ID {}", id),
        },
        Commands::Delete { id } => match session.tasks_mut()?.delete(&id) {
            Some(task) => println!("Deleted \"{}\"", task.title()),
            None => println!("No task with ID {}", id),
        },
        Commands::List { filter, search } => {
            session.set_filter(filter);
            session.set_search(search);
            let now = SystemClock.now();
            let visible = session.visible_tasks()?;
            let counts = session.counts()?;
            let view = session.view();
            println!(
                "{}",
                render::render_list(&visible, &counts, view.filter, &view.search, now)
            );
        }
        Commands::Theme => {
            let theme = if session.toggle_dark_mode() { "dark" } else { "light" };
            println!("Theme set to {}", theme);
        }
        Commands::Categories => {
            for category in SUGGESTED_CATEGORIES {
                println!("{}", category);
            }
        }
    }
    Ok(())
}
