//! Process supervision for installed apps
//!
//! The supervisor owns the only piece of shared mutable state in the
//! system: the table of running processes. Starts requested by command
//! handlers and starts triggered by the polling loop go through the same
//! table under the same lock, so the check-then-act sequence that
//! prevents double-spawning is atomic.
//!
//! The environment-variable handshake is the entire IPC protocol between
//! the orchestrator and an app: the app reads its channel paths from the
//! environment, polls its `requests` folder, and writes into
//! `responses`/`errors`. Nothing else flows between the two processes.

pub mod poll;
pub mod process;

pub use process::{ProcessKey, RunningApp};

use crate::core::{OrchestratorError, Result};
use crate::store::{layout::Channel, StateStore, StepRef};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Environment variable pointing at the app-scoped formats directory
pub const ENV_FORMATS_PATH: &str = "APP_FORMATS_PATH";
/// Step-scoped channel paths
pub const ENV_CONTEXT_PATH: &str = "APP_CONTEXT_PATH";
pub const ENV_ERRORS_PATH: &str = "APP_ERRORS_PATH";
pub const ENV_REQUESTS_PATH: &str = "APP_REQUESTS_PATH";
pub const ENV_RESPONSES_PATH: &str = "APP_RESPONSES_PATH";

/// Tracks live app processes and wires their I/O environment
#[derive(Debug, Clone)]
pub struct ProcessSupervisor {
    store: StateStore,
    running: Arc<Mutex<HashMap<ProcessKey, RunningApp>>>,
}

impl ProcessSupervisor {
    pub fn new(store: StateStore) -> Self {
        Self {
            store,
            running: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub(crate) fn store(&self) -> &StateStore {
        &self.store
    }

    /// Whether a process is currently tracked under the key
    pub async fn is_running(&self, key: &ProcessKey) -> bool {
        self.running.lock().await.contains_key(key)
    }

    /// Number of currently tracked processes
    pub async fn running_count(&self) -> usize {
        self.running.lock().await.len()
    }

    /// Start the app backing a step, with the step's channel environment
    pub async fn start_step(&self, job: &str, step: &StepRef) -> Result<()> {
        let key = ProcessKey::step(job, step.name.ordinal, step.name.app_name.clone());
        let env = vec![
            (ENV_FORMATS_PATH, self.store.app_formats_dir(&step.name.app_name)),
            (ENV_CONTEXT_PATH, step.channel(Channel::Context)),
            (ENV_ERRORS_PATH, step.channel(Channel::Errors)),
            (ENV_REQUESTS_PATH, step.channel(Channel::Requests)),
            (ENV_RESPONSES_PATH, step.channel(Channel::Responses)),
        ];
        self.start(key, env).await
    }

    /// Start a priming run so the app can publish its format schemas
    pub async fn start_priming(&self, app: &str) -> Result<()> {
        let key = ProcessKey::priming(app);
        let env = vec![(ENV_FORMATS_PATH, self.store.app_formats_dir(app))];
        self.start(key, env).await
    }

    /// Spawn and track a process under the given key
    ///
    /// A key that is already tracked makes this a logged no-op, which is
    /// what de-duplicates facade-triggered and poller-triggered starts.
    /// The executable is resolved inside the same lock so two concurrent
    /// callers cannot both pass the not-running check.
    async fn start(&self, key: ProcessKey, env: Vec<(&'static str, PathBuf)>) -> Result<()> {
        let app = key.app_name().to_string();

        let mut running = self.running.lock().await;
        if running.contains_key(&key) {
            debug!("Process {} already running, skipping start", key);
            return Ok(());
        }

        let executable = resolve_executable(&self.store.app_payload_dir(&app))
            .ok_or_else(|| OrchestratorError::ExecutableNotFound(app.clone()))?;

        let mut command = Command::new(&executable);
        for (name, path) in &env {
            command.env(name, absolute(path));
        }

        let mut child = command.spawn()?;
        let pid = child.id();
        running.insert(key.clone(), RunningApp { pid });
        drop(running);

        info!("Started app '{}' as {} (pid {:?})", app, key, pid);

        // The waiter task is the only place handles are removed: the
        // handle lives exactly as long as the process does. No restart on
        // crash; reactivation is the polling loop's job.
        let table = Arc::clone(&self.running);
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => info!("Process {} exited with {}", key, status),
                Err(e) => warn!("Process {} could not be awaited: {}", key, e),
            }
            table.lock().await.remove(&key);
        });

        Ok(())
    }
}

/// Find the platform-appropriate executable inside an app's payload dir
///
/// Returns the lexicographically first match; `None` when the payload
/// contains nothing runnable.
pub fn resolve_executable(payload_dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(payload_dir).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_executable(path))
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("exe"))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.is_file()
        && std::fs::metadata(path)
            .map(|meta| meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
