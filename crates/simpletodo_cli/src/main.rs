//! Terminal front end for SimpleTodo.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Run one command, or an interactive shell when none is given.

mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shell::{print_rows, FixedTextSurface, Shell};
use simpletodo_core::{init_logging, AppConfig, ConfigOverrides, TodoService};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "simpletodo", version, about = "A minimal to-do list")]
struct Cli {
    /// Directory holding data.txt (env: SIMPLETODO_DATA_DIR).
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error (env: SIMPLETODO_LOG_LEVEL).
    #[arg(long)]
    log_level: Option<String>,
    /// Directory for rotating log files (env: SIMPLETODO_LOG_DIR).
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every item with its position.
    List,
    /// Append an item.
    Add { text: Vec<String> },
    /// Replace the item at a position.
    Edit { position: usize, text: Vec<String> },
    /// Remove the item at a position.
    Rm { position: usize },
    /// Interactive shell (default).
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(ConfigOverrides {
        data_dir: cli.data_dir,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    });

    if let Err(err) = init_logging(&config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut service = TodoService::open(config.list_store());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Shell) {
        Command::List => print_rows(&mut out, service.rows())?,
        Command::Add { text } => {
            let ack = service.add_text(text.join(" "));
            writeln!(out, "{ack}")?;
        }
        Command::Edit { position, text } => {
            let mut surface = FixedTextSurface::new(text.join(" "));
            match service.edit_with(&mut surface, position) {
                Some(ack) => writeln!(out, "{ack}")?,
                None => writeln!(out, "No item at position {position}.")?,
            }
        }
        Command::Rm { position } => match service.long_press(position) {
            Some(ack) => writeln!(out, "{ack}")?,
            None => writeln!(out, "No item at position {position}.")?,
        },
        Command::Shell => {
            let stdin = io::stdin();
            Shell::new(&mut service, stdin.lock(), out).run()?;
        }
    }

    Ok(())
}
