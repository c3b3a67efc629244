//! Orchestration facade
//!
//! The only surface exposed to callers. Composes the state store, the
//! registry client, the installer, the process supervisor and the step
//! connector; one method per external operation.

use crate::apps::{AppInstaller, InstallOutcome, RegistryClient};
use crate::connector::{FieldMapCodegen, MappingCodegen, StepConnector};
use crate::core::{
    AppDescriptor, JobSummary, OrchestratorConfig, OrchestratorError, Result,
};
use crate::store::StateStore;
use crate::supervisor::ProcessSupervisor;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Facade over the orchestration core
#[derive(Clone)]
pub struct Orchestrator {
    store: StateStore,
    registry: RegistryClient,
    installer: AppInstaller,
    supervisor: ProcessSupervisor,
    connector: StepConnector,
    poll_interval: Duration,
}

impl Orchestrator {
    /// Build an orchestrator with the default deterministic codegen
    pub fn new(config: &OrchestratorConfig) -> Self {
        Self::with_codegen(config, Arc::new(FieldMapCodegen))
    }

    /// Build an orchestrator with a caller-provided mapping author
    pub fn with_codegen(config: &OrchestratorConfig, codegen: Arc<dyn MappingCodegen>) -> Self {
        let store = StateStore::new(&config.data_dir);
        let supervisor = ProcessSupervisor::new(store.clone());
        Self {
            registry: RegistryClient::new(&config.registry_url),
            installer: AppInstaller::new(store.clone(), supervisor.clone()),
            connector: StepConnector::new(store.clone(), codegen),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            store,
            supervisor,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn supervisor(&self) -> &ProcessSupervisor {
        &self.supervisor
    }

    /// Create a new empty job
    pub fn add_job(&self, name: &str) -> Result<()> {
        self.store.create_job(name)
    }

    /// Delete a job and all of its steps
    pub fn delete_job(&self, name: &str) -> Result<()> {
        self.store.delete_job(name)
    }

    /// List every job with its steps and their connected state
    pub fn list_jobs_and_steps(&self) -> Result<Vec<JobSummary>> {
        self.store.list_jobs()
    }

    /// Append a step to a job, installing the app on demand
    ///
    /// When the app is not installed yet it is resolved through the
    /// registry catalog and installed first. The step's channels are then
    /// created and the app is started with the step-scoped environment;
    /// a start failure surfaces to the caller, but the created step
    /// remains so a later start attempt (or the polling loop, once the
    /// installation is repaired) can pick it up.
    pub async fn add_step(&self, job: &str, app: &str) -> Result<u32> {
        if !self.store.job_exists(job) {
            return Err(OrchestratorError::JobNotFound(job.to_string()));
        }

        if !self.store.app_installed(app) {
            let descriptor = self.registry.resolve(app).await?;
            self.installer.install(&descriptor).await?;
        }

        let ordinal = self.store.create_step(job, app)?;
        let step = self.store.find_step(job, ordinal)?;
        self.supervisor.start_step(job, &step).await?;

        info!("Added step {} ({}) to job '{}'", ordinal, app, job);
        Ok(ordinal)
    }

    /// Delete a step from a job
    pub fn delete_step(&self, job: &str, ordinal: u32) -> Result<()> {
        self.store.delete_step(job, ordinal)
    }

    /// Connect a step to its successor, returning the mapping source text
    pub async fn connect_step(&self, job: &str, from: u32) -> Result<String> {
        self.connector.connect(job, from).await
    }

    /// Fetch the remote app catalog
    pub async fn fetch_app_registry(&self) -> Result<Vec<AppDescriptor>> {
        self.registry.fetch_catalog().await
    }

    /// Install an app without binding it to any step
    pub async fn install_app(&self, name: &str) -> Result<InstallOutcome> {
        let descriptor = self.registry.resolve(name).await?;
        self.installer.install(&descriptor).await
    }

    /// Start the background pending-work poller
    pub fn spawn_poller(&self) -> JoinHandle<()> {
        self.supervisor.spawn_poller(self.poll_interval)
    }
}
