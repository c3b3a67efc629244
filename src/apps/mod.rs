//! App acquisition: registry resolution and installation

pub mod installer;
pub mod registry;

pub use installer::{AppInstaller, InstallOutcome};
pub use registry::RegistryClient;
