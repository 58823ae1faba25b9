//! # carkeep
//!
//! Terminal record keeper for cars and their maintenance.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! Run without arguments to open the interactive view:
//!
//! ```bash
//! carkeep
//! # or explicitly
//! carkeep ui
//! ```
//!
//! `v` cycles Garage, Maintenance and History. In the garage, `a` adds a
//! car, `e` edits its year, `i` replaces its image and `d` removes it with
//! all of its tasks. In the maintenance view, `a` schedules a task and
//! `Space` completes the selected one after asking for a note.
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! carkeep car add Civic --year 2009 --image ~/photos/civic.jpg
//! carkeep task add Civic "Oil change" --due 2024-01-01
//! carkeep task list
//! carkeep task complete Civic 0 --note "Done at shop"
//! carkeep history --car Civic
//! ```
//!
//! ## Data Storage
//!
//! Data is saved in your local data directory:
//! *   Linux: `~/.local/share/carkeep/car_maintenance_data.json`
//! *   macOS: `~/Library/Application Support/carkeep/car_maintenance_data.json`
//! *   Windows: `%APPDATA%\carkeep\car_maintenance_data.json`
//!
//! Override the directory with `--data-dir` or the `CARKEEP_HOME`
//! environment variable. Images are copied into `uploads/` inside it.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use carkeep::commands::*;
use carkeep::tui::run_tui;
use carkeep::{init_logging, Config, Garage, Verbosity};

#[derive(Parser)]
#[command(name = "carkeep")]
#[command(about = "Keep track of your cars and their maintenance", long_about = None)]
struct Cli {
    /// Directory holding the dataset and uploaded images
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cars in the garage
    Car {
        #[command(subcommand)]
        command: CarCommands,
    },
    /// Manage pending maintenance tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show completed maintenance
    History {
        /// Only this car
        #[arg(short, long)]
        car: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum CarCommands {
    /// Register a new car
    Add {
        /// Car name (quoted if it has spaces)
        name: String,
        /// Model year
        #[arg(short, long)]
        year: String,
        /// Image file to copy into the uploads directory
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Change a car's model year and optionally its image
    Edit {
        name: String,
        /// New model year
        #[arg(short, long)]
        year: String,
        /// New image; the current one is kept if omitted
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Remove a car with its maintenance and history
    Remove {
        name: String,
    },
    /// List cars
    List,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Schedule a maintenance task
    Add {
        /// Car the task belongs to
        car: String,
        /// What needs doing
        task: String,
        /// Due date, e.g. 2024-01-01
        #[arg(short, long)]
        due: String,
    },
    /// Complete a task by its position in the car's pending list
    Complete {
        car: String,
        /// Position as shown in the `#` column of `task list`
        index: usize,
        /// What was done
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Complete a task by its id
    Done {
        id: u64,
        /// What was done
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List pending tasks
    List {
        /// Only this car
        #[arg(short, long)]
        car: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, Some(Commands::Ui) | None);
    let verbosity = if interactive {
        Verbosity::Quiet
    } else {
        Verbosity::from_flags(cli.verbose, cli.quiet)
    };
    init_logging(verbosity);

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "carkeep", &mut io::stdout());
        return Ok(());
    }

    let config = Config::resolve(cli.data_dir);
    let mut garage = match Garage::open(&config) {
        Ok(garage) => garage,
        Err(e) if e.is_parse_error() => {
            return Err(e).context("the dataset is corrupt; repair it or move it aside to start empty");
        }
        Err(e) => {
            return Err(e).with_context(|| format!("opening garage in {}", config.data_dir().display()));
        }
    };

    match cli.command {
        Some(Commands::Car { command }) => match command {
            CarCommands::Add { name, year, image } => cmd_car_add(&mut garage, &name, &year, image.as_deref(), false)?,
            CarCommands::Edit { name, year, image } => cmd_car_edit(&mut garage, &name, &year, image.as_deref(), false)?,
            CarCommands::Remove { name } => cmd_car_remove(&mut garage, &name, false)?,
            CarCommands::List => cmd_car_list(&garage),
        },
        Some(Commands::Task { command }) => match command {
            TaskCommands::Add { car, task, due } => cmd_task_add(&mut garage, &car, &task, &due, false)?,
            TaskCommands::Complete { car, index, note } => cmd_task_complete(&mut garage, &car, index, note.as_deref(), false)?,
            TaskCommands::Done { id, note } => cmd_task_done(&mut garage, id, note.as_deref(), false)?,
            TaskCommands::List { car } => cmd_task_list(&garage, car.as_deref()),
        },
        Some(Commands::History { car }) => cmd_history(&garage, car.as_deref()),
        Some(Commands::Completions { .. }) => {}
        Some(Commands::Ui) | None => run_tui(garage).context("running interactive view")?,
    }
    Ok(())
}
