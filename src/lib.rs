//! jobforge - compose jobs as pipelines of installable desktop apps

pub mod apps;
pub mod cli;
pub mod connector;
pub mod core;
pub mod orchestrator;
pub mod store;
pub mod supervisor;

// Re-export commonly used types
pub use apps::{AppInstaller, InstallOutcome, RegistryClient};
pub use connector::{FieldMapCodegen, MappingCodegen, MappingRequest, StepConnector};
pub use core::{
    AppDescriptor, FormatDirection, JobSummary, OrchestratorConfig, OrchestratorError, Result,
    StepSummary,
};
pub use orchestrator::Orchestrator;
pub use store::{StateStore, StepRef};
pub use supervisor::{ProcessKey, ProcessSupervisor};
