//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{lambda_cmd, project_cmd, sfn_cmd};
use crate::scaffold::ScaffoldFlags;

#[derive(Parser)]
#[command(name = "forge")]
#[command(
    author,
    version,
    about = "Scaffold AWS Lambda packages with Terraform and assemble Step Functions state machines"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project with packages/ and terraform/ directories
    New {
        /// Project name (becomes the directory name)
        name: String,

        /// Skip running 'git init'
        #[arg(long)]
        no_git: bool,

        /// Skip installing npm dependencies
        #[arg(long)]
        no_install: bool,
    },

    /// Add a lambda package with handler, tests and Terraform scripts
    Add {
        /// Lambda name (letters, numbers, underscores and hyphens)
        lambda: String,

        /// Skip installing npm dependencies
        #[arg(long)]
        no_install: bool,
    },

    /// Interactively assemble a Step Functions state machine from the
    /// project's lambdas
    Sfn,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("forge starting");

    match cli.command {
        Commands::New {
            name,
            no_git,
            no_install,
        } => {
            let flags = ScaffoldFlags {
                git: !no_git,
                install: !no_install,
            };
            project_cmd::run(&output, &name, flags)?;
        }

        Commands::Add { lambda, no_install } => {
            lambda_cmd::run(&output, &lambda, !no_install)?;
        }

        Commands::Sfn => {
            sfn_cmd::run(&output)?;
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
