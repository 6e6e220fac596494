//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Remote development environments, from manifest to ready tunnel
#[derive(Parser)]
#[command(
    name = "tether",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Log diagnostics at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip interactive prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the services and tests a manifest declares
    Services(commands::services::ServicesArgs),

    /// Find candidate manifests under a directory
    Discover(commands::discover::DiscoverArgs),

    /// Start a development environment and wait until it is ready
    Up(commands::up::UpArgs),

    /// Remove a development environment
    Down(commands::down::DownArgs),

    /// Show the current lifecycle state of an environment
    Status(commands::status::StatusArgs),

    /// Check whether a local port accepts connections
    Probe(commands::probe::ProbeArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the command
    /// fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            yes,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        })?;

        match command {
            Command::Services(args) => commands::services::run(&app, &args).await,
            Command::Discover(args) => commands::discover::run(&app, &args).await,
            Command::Up(args) => commands::up::run(&app, &args).await,
            Command::Down(args) => commands::down::run(&app, &args).await,
            Command::Status(args) => commands::status::run(&app, &args).await,
            Command::Probe(args) => commands::probe::run(&app, &args).await,
            Command::Version => commands::version::run(&app),
        }
    }
}
