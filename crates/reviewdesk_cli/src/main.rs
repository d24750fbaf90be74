//! reviewdesk CLI
//!
//! Command-line front end for employee reviews stored in SQLite.

use clap::{Args, Parser, Subcommand};
use log::info;
use reviewdesk_core::db::{bootstrap_schema, open_db};
use reviewdesk_core::{default_log_level, init_logging};
use std::error::Error;
use std::path::{Path, PathBuf};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "reviewdesk", version)]
#[command(about = "Employee performance reviews backed by SQLite", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// SQLite database file
    #[arg(
        long,
        global = true,
        env = "REVIEWDESK_DB",
        default_value = "reviewdesk.sqlite3"
    )]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error); defaults by build mode
    #[arg(long, global = true, env = "REVIEWDESK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "REVIEWDESK_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the employees and reviews tables if missing
    Init,
    /// Drop and recreate both tables, discarding all rows
    Reset,
    /// Employee administration
    Employee(commands::employee::EmployeeArgs),
    /// Review operations
    Review(commands::review::ReviewArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.global.log_dir {
        start_logging(cli.global.log_level.as_deref(), log_dir)?;
    }

    let conn = open_db(&cli.global.db)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Init => commands::schema::init(&conn, &mut out),
        Commands::Reset => commands::schema::reset(&conn, &mut out),
        Commands::Employee(args) => {
            bootstrap_schema(&conn)?;
            commands::employee::execute(args, &conn, &mut out)
        }
        Commands::Review(args) => {
            bootstrap_schema(&conn)?;
            commands::review::execute(args, &conn, &mut out)
        }
    }
}

fn start_logging(level: Option<&str>, log_dir: &Path) -> Result<(), Box<dyn Error>> {
    let log_dir = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    init_logging(level.unwrap_or(default_log_level()), log_dir)?;
    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init => "init",
        Commands::Reset => "reset",
        Commands::Employee(_) => "employee",
        Commands::Review(_) => "review",
    }
}
