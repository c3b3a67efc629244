//! Orchestrator configuration from YAML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Well-known registry index; overridable through config
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/AAstrup/AIDesktop-Apps/main/appsRegistry.json";

/// Top-level orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Root directory holding the `Jobs` and `Apps` trees
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// URL of the remote app registry index
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Interval of the pending-work polling loop, in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jobforge")
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            registry_url: default_registry_url(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl OrchestratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse config YAML")
    }
}
