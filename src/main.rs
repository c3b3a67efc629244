use anyhow::{Context, Result};
use jobforge::cli::commands::{
    AddJobCommand, AddStepCommand, ConnectCommand, DeleteJobCommand, DeleteStepCommand,
    InstallCommand, ListCommand, RegistryCommand,
};
use jobforge::cli::output::*;
use jobforge::cli::{Cli, Command};
use jobforge::{InstallOutcome, Orchestrator, OrchestratorConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => OrchestratorConfig::from_file(path)?,
        None => OrchestratorConfig::default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }

    let orchestrator = Orchestrator::new(&config);

    let outcome = match &cli.command {
        Command::AddJob(cmd) => add_job(&orchestrator, cmd),
        Command::DeleteJob(cmd) => delete_job(&orchestrator, cmd),
        Command::List(cmd) => list(&orchestrator, cmd),
        Command::AddStep(cmd) => add_step(&orchestrator, cmd).await,
        Command::DeleteStep(cmd) => delete_step(&orchestrator, cmd),
        Command::Connect(cmd) => connect(&orchestrator, cmd).await,
        Command::Registry(cmd) => registry(&orchestrator, cmd).await,
        Command::Install(cmd) => install(&orchestrator, cmd).await,
        Command::Watch => watch(&orchestrator).await,
    };

    if let Err(e) = outcome {
        println!("{} {}", CROSS, style(&e).red());
        std::process::exit(1);
    }

    Ok(())
}

fn add_job(orchestrator: &Orchestrator, cmd: &AddJobCommand) -> Result<()> {
    orchestrator.add_job(&cmd.name)?;
    println!("{} Created job {}", CHECK, style(&cmd.name).bold());
    Ok(())
}

fn delete_job(orchestrator: &Orchestrator, cmd: &DeleteJobCommand) -> Result<()> {
    orchestrator.delete_job(&cmd.name)?;
    println!("{} Deleted job {}", CHECK, style(&cmd.name).bold());
    Ok(())
}

fn list(orchestrator: &Orchestrator, cmd: &ListCommand) -> Result<()> {
    let jobs = orchestrator.list_jobs_and_steps()?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }

    if jobs.is_empty() {
        println!("{} No jobs yet", INFO);
        return Ok(());
    }

    for job in &jobs {
        println!("{}", format_job(job));
    }
    Ok(())
}

async fn add_step(orchestrator: &Orchestrator, cmd: &AddStepCommand) -> Result<()> {
    let ordinal = orchestrator.add_step(&cmd.job, &cmd.app).await?;
    println!(
        "{} Added step {} ({}) to {}",
        CHECK,
        ordinal,
        style(&cmd.app).cyan(),
        style(&cmd.job).bold()
    );
    Ok(())
}

fn delete_step(orchestrator: &Orchestrator, cmd: &DeleteStepCommand) -> Result<()> {
    orchestrator.delete_step(&cmd.job, cmd.ordinal)?;
    println!(
        "{} Deleted step {} from {}",
        CHECK,
        cmd.ordinal,
        style(&cmd.job).bold()
    );
    Ok(())
}

async fn connect(orchestrator: &Orchestrator, cmd: &ConnectCommand) -> Result<()> {
    let code = orchestrator.connect_step(&cmd.job, cmd.from).await?;
    println!(
        "{} Connected step {} to step {} in {}",
        CHECK,
        cmd.from,
        cmd.from + 1,
        style(&cmd.job).bold()
    );
    println!("\n{}", code);
    Ok(())
}

async fn registry(orchestrator: &Orchestrator, cmd: &RegistryCommand) -> Result<()> {
    let catalog = orchestrator.fetch_app_registry().await?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("{} Registry is empty", WARN);
        return Ok(());
    }

    for descriptor in &catalog {
        println!("{}", format_descriptor(descriptor));
    }
    Ok(())
}

async fn install(orchestrator: &Orchestrator, cmd: &InstallCommand) -> Result<()> {
    match orchestrator.install_app(&cmd.name).await? {
        InstallOutcome::Installed => {
            println!("{} Installed {}", CHECK, style(&cmd.name).bold());
        }
        InstallOutcome::AlreadyInstalled => {
            println!(
                "{} {} is already installed",
                INFO,
                style(&cmd.name).bold()
            );
        }
    }
    Ok(())
}

async fn watch(orchestrator: &Orchestrator) -> Result<()> {
    let poller = orchestrator.spawn_poller();
    println!("{} Watching for pending work (ctrl-c to stop)", INFO);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    poller.abort();
    println!("\n{} Stopped", INFO);
    Ok(())
}
