//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::fmt_cmd;
use crate::storage::Project;

#[derive(Parser)]
#[command(name = "craft")]
#[command(author, version, about = "Local-first project management for software teams")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new craft project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Format and lint source code
    Fmt {
        /// Arguments forwarded verbatim to the underlying tools
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,

        /// Only check for errors rather than fixing them
        #[arg(long)]
        check: bool,

        /// Only run the linter
        #[arg(long, short = 'l')]
        linter: bool,

        /// Only run the formatter
        #[arg(long, short = 'f')]
        formatter: bool,

        /// Sync the default config file with the current version of Craft
        #[arg(long)]
        sync: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Craft CLI starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.success(&format!(
                "Initialized craft project at {}",
                project.root().display()
            ));
        }

        Commands::Fmt {
            args,
            check,
            linter,
            formatter,
            sync,
        } => {
            fmt_cmd::run(
                fmt_cmd::FmtOptions {
                    args,
                    check,
                    linter,
                    formatter,
                    sync,
                },
                &output,
            )?;
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
