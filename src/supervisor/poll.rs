//! Level-triggered pending-work scan
//!
//! Apps consume their own `requests` folders; the orchestrator never
//! removes request files. The loop therefore only has to answer one
//! question per tick: is there a step with pending work and no live
//! process? A lingering request file keeps re-triggering the start
//! attempt until the app picks it up, naturally suppressed while a
//! handle exists.

use crate::store::layout::Channel;
use crate::supervisor::ProcessSupervisor;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

impl ProcessSupervisor {
    /// Spawn the background polling loop
    ///
    /// Runs until the returned handle is aborted or the runtime shuts
    /// down. Individual scan and start failures are logged and skipped so
    /// one misbehaving app cannot halt supervision of the rest.
    pub fn spawn_poller(&self, interval: Duration) -> JoinHandle<()> {
        let supervisor = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                supervisor.scan_pending_work().await;
            }
        })
    }

    /// One scan pass over every step's `requests` channel
    ///
    /// Steps whose app is not installed are skipped; a step with at least
    /// one pending request file and no tracked process is (re-)started
    /// with its step-scoped environment.
    pub async fn scan_pending_work(&self) {
        let jobs = match self.store().list_jobs() {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Poller could not list jobs: {}", e);
                return;
            }
        };

        for job in &jobs {
            let steps = match self.store().list_steps(&job.job_name) {
                Ok(steps) => steps,
                Err(e) => {
                    warn!("Poller could not list steps of '{}': {}", job.job_name, e);
                    continue;
                }
            };

            for step in steps {
                if !self.store().app_installed(&step.name.app_name) {
                    debug!(
                        "Step {}_{} references uninstalled app '{}', skipping",
                        job.job_name, step.name.ordinal, step.name.app_name
                    );
                    continue;
                }
                if !has_pending_requests(&step.channel(Channel::Requests)) {
                    continue;
                }
                if let Err(e) = self.start_step(&job.job_name, &step).await {
                    warn!(
                        "Poller could not start step {} of '{}': {}",
                        step.name.ordinal, job.job_name, e
                    );
                }
            }
        }
    }
}

fn has_pending_requests(requests_dir: &Path) -> bool {
    match std::fs::read_dir(requests_dir) {
        Ok(mut entries) => entries.any(|entry| {
            entry
                .map(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                .unwrap_or(false)
        }),
        Err(_) => false,
    }
}
