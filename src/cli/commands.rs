//! CLI command definitions

use clap::Args;

/// Create a new job
#[derive(Debug, Args, Clone)]
pub struct AddJobCommand {
    /// Job name; becomes the job's folder name
    pub name: String,
}

/// Delete a job and all of its steps
#[derive(Debug, Args, Clone)]
pub struct DeleteJobCommand {
    /// Job name
    pub name: String,
}

/// List jobs and their steps
#[derive(Debug, Args, Clone)]
pub struct ListCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Append a step to a job
#[derive(Debug, Args, Clone)]
pub struct AddStepCommand {
    /// Job to append to
    #[arg(short, long)]
    pub job: String,

    /// App backing the new step; installed from the registry if absent
    #[arg(short, long)]
    pub app: String,
}

/// Delete a step from a job
#[derive(Debug, Args, Clone)]
pub struct DeleteStepCommand {
    /// Job to delete from
    #[arg(short, long)]
    pub job: String,

    /// Ordinal of the step to delete
    #[arg(short, long)]
    pub ordinal: u32,
}

/// Connect a step to its successor
#[derive(Debug, Args, Clone)]
pub struct ConnectCommand {
    /// Job containing the steps
    #[arg(short, long)]
    pub job: String,

    /// Ordinal of the upstream step; connects to `from + 1`
    #[arg(short, long)]
    pub from: u32,
}

/// Show the remote app registry
#[derive(Debug, Args, Clone)]
pub struct RegistryCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Install an app without creating a step
#[derive(Debug, Args, Clone)]
pub struct InstallCommand {
    /// App name as listed in the registry
    pub name: String,
}
