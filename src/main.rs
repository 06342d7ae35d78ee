//! defconv CLI
//!
//! The entry point for the definition converter. Handles CLI args,
//! dispatches to the batch drivers, and maps their error counts to the
//! process exit status.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use defconv::batch;

/// defconv -- Plugin Definition Converter
#[derive(Parser, Debug)]
#[command(
    name = "defconv",
    version,
    about = "Convert plugin definitions between YAML and Markdown formats"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert tool.yaml / agent.yaml definitions to Markdown
    Convert {
        /// Directory containing the plugins/ root
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Embed SKILL.md documents into tool.yaml system prompts
    Embed {
        /// Directory containing the plugins/ root
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Run the selected batch and return its error count.
fn run(cli: Cli) -> Result<usize> {
    match cli.command {
        Command::Convert { dir } => Ok(batch::run_convert(&dir)?.errors),
        Command::Embed { dir } => Ok(batch::run_embed(&dir)?.errors),
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(0) => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red(), e);
            std::process::exit(1);
        }
    }
}
