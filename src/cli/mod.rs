//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{
    AddJobCommand, AddStepCommand, ConnectCommand, DeleteJobCommand, DeleteStepCommand,
    InstallCommand, ListCommand, RegistryCommand,
};
use std::path::PathBuf;

/// Compose jobs as pipelines of installable apps
#[derive(Debug, Parser, Clone)]
#[command(name = "jobforge")]
#[command(author = "Jobforge Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Compose jobs as pipelines of installable desktop apps", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to orchestrator configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Create a new job
    AddJob(AddJobCommand),

    /// Delete a job and all of its steps
    DeleteJob(DeleteJobCommand),

    /// List jobs and their steps
    List(ListCommand),

    /// Append a step to a job, installing its app if needed
    AddStep(AddStepCommand),

    /// Delete a step from a job
    DeleteStep(DeleteStepCommand),

    /// Generate the mapping between a step and its successor
    Connect(ConnectCommand),

    /// Show the remote app registry
    Registry(RegistryCommand),

    /// Install an app from the registry without creating a step
    Install(InstallCommand),

    /// Supervise pending work until interrupted
    Watch,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
