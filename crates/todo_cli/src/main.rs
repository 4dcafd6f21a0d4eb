//! Command-line front end for `todo_core`.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the SQLite store.
//! - Translate one subcommand into session intents and print the result.

mod render;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::warn;
use std::path::PathBuf;
use todo_core::db::open_db;
use todo_core::{
    init_logging, AppConfig, Clock, ConfigOverrides, FilterMode, KeyValueStore, NewTask,
    Priority, SortMode, SqliteKvStore, SystemClock, TaskId, TodoSession,
};

/// Local to-do list.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Manage a local to-do list")]
struct Cli {
    /// SQLite database file (env: TODO_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for log files (env: TODO_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (env: TODO_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task. Blank titles are ignored.
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<NaiveDate>,
        /// none|low|medium|high
        #[arg(short, long, default_value = "none")]
        priority: Priority,
    },

    /// List tasks.
    #[command(alias = "ls")]
    List {
        /// all|active|completed
        #[arg(short, long, default_value = "all")]
        filter: FilterMode,
        /// Case-insensitive text to look for in title or description.
        #[arg(short, long, default_value = "")]
        search: String,
        /// newest|oldest
        #[arg(long, default_value = "newest")]
        sort: SortMode,
    },

    /// Flip a task between active and completed.
    Toggle {
        /// Task id or unique id prefix.
        id: String,
    },

    /// Edit title, description or due date. Priority cannot be changed.
    Edit {
        /// Task id or unique id prefix.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date.
        #[arg(long)]
        clear_due: bool,
    },

    /// Delete a task.
    #[command(alias = "rm")]
    Delete {
        /// Task id or unique id prefix.
        id: String,
    },

    /// Show total, active and completed counts.
    Stats,

    /// Show or toggle the theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ThemeAction {
    Show,
    Toggle,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(ConfigOverrides {
        db_path: cli.db,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    })?;

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let kv = SqliteKvStore::try_new(&conn)?;
    let mut session = TodoSession::load(kv, SystemClock)?;

    run(&mut session, cli.cmd)
}

fn run<K: KeyValueStore, C: Clock>(session: &mut TodoSession<K, C>, cmd: Command) -> Result<()> {
    match cmd {
        Command::Add {
            title,
            description,
            due,
            priority,
        } => {
            let created = session.create_task(NewTask {
                title,
                description,
                due_date: due,
                priority,
            })?;
            if let Some(task) = created {
                println!("{}", render::render_created(&task));
            }
        }
        Command::List {
            filter,
            search,
            sort,
        } => {
            session.set_filter(filter);
            session.set_search(&search);
            session.set_sort(sort);
            print!("{}", render::render_view(&session.view()));
        }
        Command::Toggle { id } => {
            let id = resolve(session, &id)?;
            session.toggle_task(id)?;
            if let Some(task) = session.tasks().iter().find(|task| task.id == id) {
                println!("{}", render::render_status_line(task));
            }
        }
        Command::Edit {
            id,
            title,
            description,
            due,
            clear_due,
        } => {
            let id = resolve(session, &id)?;
            let Some(draft) = session.start_edit(id) else {
                return Ok(());
            };
            if let Some(title) = title {
                draft.fields.title = title;
            }
            if let Some(description) = description {
                draft.fields.description = description;
            }
            if due.is_some() || clear_due {
                draft.fields.due_date = due;
            }
            if !session.save_edit()? {
                warn!("event=cli_edit module=cli status=skip reason=rejected");
                session.cancel_edit();
            }
        }
        Command::Delete { id } => {
            let id = resolve(session, &id)?;
            session.delete_task(id)?;
        }
        Command::Stats => {
            println!("{}", render::render_counts(session.counts()));
        }
        Command::Theme { action } => {
            let theme = match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => session.theme(),
                ThemeAction::Toggle => session.toggle_theme()?,
            };
            println!("{theme}");
        }
    }
    Ok(())
}

fn resolve<K: KeyValueStore, C: Clock>(session: &TodoSession<K, C>, needle: &str) -> Result<TaskId> {
    session
        .resolve_id(needle)
        .ok_or_else(|| anyhow!("no single task matches id `{needle}`"))
}
