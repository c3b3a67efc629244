//! App installation: download, extract, prime

use crate::core::{AppDescriptor, OrchestratorError, Result};
use crate::store::StateStore;
use crate::supervisor::ProcessSupervisor;
use std::io::Cursor;
use tracing::{debug, info, warn};

/// Outcome of an install request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Fresh download and extraction
    Installed,
    /// App root already existed; nothing was downloaded
    AlreadyInstalled,
}

/// Materializes registry apps on disk
#[derive(Debug, Clone)]
pub struct AppInstaller {
    store: StateStore,
    supervisor: ProcessSupervisor,
    http: reqwest::Client,
}

impl AppInstaller {
    pub fn new(store: StateStore, supervisor: ProcessSupervisor) -> Self {
        Self {
            store,
            supervisor,
            http: reqwest::Client::new(),
        }
    }

    /// Install an app from its registry descriptor
    ///
    /// Idempotent: when the app root already exists the whole operation is
    /// a success without touching the network, so callers must not assume
    /// a fresh extraction occurred. A fresh install ends with a
    /// fire-and-forget priming run that lets the executable self-report
    /// its request/response schemas into `formats`; priming failures are
    /// logged and never fail the install, since formats are populated
    /// lazily whenever the app next runs.
    pub async fn install(&self, descriptor: &AppDescriptor) -> Result<InstallOutcome> {
        if self.store.app_installed(&descriptor.name) {
            debug!("App '{}' already installed, skipping", descriptor.name);
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        self.store.ensure_app_dirs(&descriptor.name)?;

        let archive = self.download(&descriptor.zip_download).await?;
        self.extract(&descriptor.name, &archive)?;
        info!(
            "Installed app '{}' v{} from {}",
            descriptor.name, descriptor.version, descriptor.zip_download
        );

        if let Err(e) = self.supervisor.start_priming(&descriptor.name).await {
            warn!("Priming run for '{}' did not start: {}", descriptor.name, e);
        }

        Ok(InstallOutcome::Installed)
    }

    /// Download the packaged archive fully into memory
    ///
    /// No partial or resumable transfers: any failure mid-download fails
    /// the install, leaving only the empty directory scaffold behind.
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await.map_err(|e| {
            OrchestratorError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(OrchestratorError::DownloadFailed {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| OrchestratorError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    /// Extract the archive into the app's payload directory
    ///
    /// Overwrites existing files, so re-extracting onto a stale payload
    /// needs no prior cleanup.
    fn extract(&self, app: &str, data: &[u8]) -> Result<()> {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(data)).map_err(|e| OrchestratorError::ExtractFailed {
                app: app.to_string(),
                reason: e.to_string(),
            })?;

        archive
            .extract(self.store.app_payload_dir(app))
            .map_err(|e| OrchestratorError::ExtractFailed {
                app: app.to_string(),
                reason: e.to_string(),
            })
    }
}
