//! Filesystem-backed state store
//!
//! The directory tree under the configured root is the single source of
//! truth for jobs, steps and installed apps; there is no separate index.
//! All reads re-derive state from the tree, and directory presence is the
//! durable signal for every fact the orchestrator tracks.

pub mod layout;

use crate::core::{
    error::{OrchestratorError, Result},
    job::{is_valid_job_name, JobSummary, StepSummary},
    FormatDirection,
};
use layout::{
    mapping_file_name, Channel, StepDirName, APPS_DIR, APP_FORMATS_DIR, APP_PAYLOAD_DIR, JOBS_DIR,
};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A located step: its decoded name plus its directory on disk
#[derive(Debug, Clone)]
pub struct StepRef {
    pub name: StepDirName,
    pub dir: PathBuf,
}

impl StepRef {
    /// Path of one of the step's I/O channel folders
    pub fn channel(&self, channel: Channel) -> PathBuf {
        self.dir.join(channel.dir_name())
    }
}

/// Store over one root directory holding the `Jobs` and `Apps` trees
#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn jobs_dir(&self) -> PathBuf {
        self.root.join(JOBS_DIR)
    }

    fn job_dir(&self, job: &str) -> PathBuf {
        self.jobs_dir().join(job)
    }

    /// Root directory of an installed app
    pub fn app_dir(&self, app: &str) -> PathBuf {
        self.root.join(APPS_DIR).join(app)
    }

    /// Directory with the app's extracted executable payload
    pub fn app_payload_dir(&self, app: &str) -> PathBuf {
        self.app_dir(app).join(APP_PAYLOAD_DIR)
    }

    /// Directory with the app's self-reported schema files
    pub fn app_formats_dir(&self, app: &str) -> PathBuf {
        self.app_dir(app).join(APP_FORMATS_DIR)
    }

    /// Whether the app's root directory exists
    pub fn app_installed(&self, app: &str) -> bool {
        self.app_dir(app).is_dir()
    }

    /// Whether the job's directory exists
    pub fn job_exists(&self, job: &str) -> bool {
        self.job_dir(job).is_dir()
    }

    /// Create the app's directory scaffold if absent
    ///
    /// Idempotent: directories are created only when missing, so calling
    /// this on an already-installed app changes nothing.
    pub fn ensure_app_dirs(&self, app: &str) -> Result<()> {
        if !is_valid_job_name(app) {
            return Err(OrchestratorError::InvalidName(app.to_string()));
        }
        let app_dir = self.app_dir(app);
        fs::create_dir_all(&app_dir)?;
        for sub in [APP_PAYLOAD_DIR, APP_FORMATS_DIR] {
            let dir = app_dir.join(sub);
            if !dir.exists() {
                fs::create_dir(&dir)?;
            }
        }
        Ok(())
    }

    /// Create a new empty job
    pub fn create_job(&self, job: &str) -> Result<()> {
        if !is_valid_job_name(job) {
            return Err(OrchestratorError::InvalidName(job.to_string()));
        }

        fs::create_dir_all(self.jobs_dir())?;

        let job_dir = self.job_dir(job);
        if job_dir.exists() {
            return Err(OrchestratorError::JobAlreadyExists(job.to_string()));
        }

        fs::create_dir(&job_dir)?;
        info!("Created job '{}'", job);
        Ok(())
    }

    /// Delete a job and everything under it
    pub fn delete_job(&self, job: &str) -> Result<()> {
        let job_dir = self.job_dir(job);
        if !job_dir.is_dir() {
            return Err(OrchestratorError::JobNotFound(job.to_string()));
        }

        fs::remove_dir_all(&job_dir)?;
        info!("Deleted job '{}'", job);
        Ok(())
    }

    /// List all jobs with their steps in ordinal order
    ///
    /// A step is reported as connected when a mapping artifact to its
    /// immediate successor exists on disk; that file's presence is the
    /// only connected-state signal there is.
    pub fn list_jobs(&self) -> Result<Vec<JobSummary>> {
        let jobs_dir = self.jobs_dir();
        if !jobs_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut jobs = Vec::new();
        for entry in fs::read_dir(&jobs_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let job_name = entry.file_name().to_string_lossy().into_owned();
            let steps = self
                .list_steps(&job_name)?
                .into_iter()
                .map(|step| {
                    let connected =
                        self.mapping_exists(&job_name, step.name.ordinal, step.name.ordinal + 1);
                    StepSummary {
                        ordinal: step.name.ordinal,
                        app_name: step.name.app_name,
                        connected,
                    }
                })
                .collect();
            jobs.push(JobSummary { job_name, steps });
        }

        jobs.sort_by(|a, b| a.job_name.cmp(&b.job_name));
        Ok(jobs)
    }

    /// List a job's steps sorted by ordinal
    ///
    /// Entries that do not follow the `{ordinal}_{appName}` convention are
    /// skipped; ordinal gaps left by deletions are expected.
    pub fn list_steps(&self, job: &str) -> Result<Vec<StepRef>> {
        let job_dir = self.job_dir(job);
        if !job_dir.is_dir() {
            return Err(OrchestratorError::JobNotFound(job.to_string()));
        }

        let mut steps = Vec::new();
        for entry in fs::read_dir(&job_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            if let Some(name) = StepDirName::parse(&dir_name) {
                steps.push(StepRef {
                    name,
                    dir: entry.path(),
                });
            } else {
                debug!("Skipping foreign entry '{}' in job '{}'", dir_name, job);
            }
        }

        steps.sort_by_key(|s| s.name.ordinal);
        Ok(steps)
    }

    /// Create a step bound to the given app, returning its ordinal
    ///
    /// The ordinal is one past the highest surviving ordinal, so deleted
    /// positions are not reused while any later step remains.
    pub fn create_step(&self, job: &str, app: &str) -> Result<u32> {
        if !is_valid_job_name(app) {
            return Err(OrchestratorError::InvalidName(app.to_string()));
        }

        let steps = self.list_steps(job)?;
        let ordinal = steps.last().map(|s| s.name.ordinal).unwrap_or(0) + 1;

        let step_dir = self
            .job_dir(job)
            .join(StepDirName::new(ordinal, app).encode());
        fs::create_dir(&step_dir)?;
        for channel in Channel::ALL {
            fs::create_dir(step_dir.join(channel.dir_name()))?;
        }

        info!("Created step {} ({}) in job '{}'", ordinal, app, job);
        Ok(ordinal)
    }

    /// Locate a step by its ordinal
    pub fn find_step(&self, job: &str, ordinal: u32) -> Result<StepRef> {
        self.list_steps(job)?
            .into_iter()
            .find(|s| s.name.ordinal == ordinal)
            .ok_or_else(|| OrchestratorError::StepNotFound {
                job: job.to_string(),
                ordinal,
            })
    }

    /// Delete a step and its channel folders
    pub fn delete_step(&self, job: &str, ordinal: u32) -> Result<()> {
        let step = self.find_step(job, ordinal)?;
        fs::remove_dir_all(&step.dir)?;
        info!("Deleted step {} from job '{}'", ordinal, job);
        Ok(())
    }

    /// Read an app's request or response schema
    ///
    /// Picks the lexicographically first file with the direction's prefix.
    /// `FormatMissing` means the app has never produced one; callers treat
    /// it as a retry-later condition, not a failure of the installation.
    pub fn read_app_format(
        &self,
        app: &str,
        direction: FormatDirection,
    ) -> Result<Map<String, Value>> {
        let formats_dir = self.app_formats_dir(app);

        let mut candidates: Vec<PathBuf> = Vec::new();
        if formats_dir.is_dir() {
            for entry in fs::read_dir(&formats_dir)? {
                let entry = entry?;
                let file_name = entry.file_name().to_string_lossy().into_owned();
                if file_name.starts_with(direction.prefix()) && file_name.ends_with(".json") {
                    candidates.push(entry.path());
                }
            }
        }
        candidates.sort();

        let Some(path) = candidates.first() else {
            return Err(OrchestratorError::FormatMissing {
                app: app.to_string(),
                direction,
            });
        };

        let contents = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&contents).map_err(|e| {
            OrchestratorError::MalformedSchema {
                app: app.to_string(),
                direction,
                reason: e.to_string(),
            }
        })?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(OrchestratorError::MalformedSchema {
                app: app.to_string(),
                direction,
                reason: format!("expected a JSON object, got {}", json_type_name(&other)),
            }),
        }
    }

    /// Persist a mapping artifact; overwrites any previous one for the pair
    pub fn write_mapping(&self, job: &str, from: u32, to: u32, code: &str) -> Result<PathBuf> {
        let job_dir = self.job_dir(job);
        if !job_dir.is_dir() {
            return Err(OrchestratorError::JobNotFound(job.to_string()));
        }

        let path = job_dir.join(mapping_file_name(from, to));
        fs::write(&path, code)?;
        info!("Wrote mapping artifact {:?}", path);
        Ok(path)
    }

    /// Whether a mapping artifact exists for the pair
    pub fn mapping_exists(&self, job: &str, from: u32, to: u32) -> bool {
        self.job_dir(job).join(mapping_file_name(from, to)).is_file()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, StateStore) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_create_job_then_duplicate() {
        let (_dir, store) = store();
        store.create_job("alpha").unwrap();
        assert!(matches!(
            store.create_job("alpha"),
            Err(OrchestratorError::JobAlreadyExists(_))
        ));
    }

    #[test]
    fn test_create_job_rejects_bad_names() {
        let (_dir, store) = store();
        assert!(matches!(
            store.create_job("../escape"),
            Err(OrchestratorError::InvalidName(_))
        ));
        assert!(matches!(
            store.create_job(""),
            Err(OrchestratorError::InvalidName(_))
        ));
    }

    #[test]
    fn test_delete_missing_job_is_an_error() {
        let (_dir, store) = store();
        assert!(matches!(
            store.delete_job("ghost"),
            Err(OrchestratorError::JobNotFound(_))
        ));
    }

    #[test]
    fn test_step_ordinals_never_reused_after_middle_deletion() {
        let (_dir, store) = store();
        store.create_job("job").unwrap();
        assert_eq!(store.create_step("job", "a").unwrap(), 1);
        assert_eq!(store.create_step("job", "b").unwrap(), 2);
        assert_eq!(store.create_step("job", "c").unwrap(), 3);

        store.delete_step("job", 2).unwrap();
        assert_eq!(store.create_step("job", "d").unwrap(), 4);

        let ordinals: Vec<u32> = store
            .list_steps("job")
            .unwrap()
            .iter()
            .map(|s| s.name.ordinal)
            .collect();
        assert_eq!(ordinals, vec![1, 3, 4]);
    }

    #[test]
    fn test_step_dirs_have_all_channels() {
        let (_dir, store) = store();
        store.create_job("job").unwrap();
        store.create_step("job", "tool").unwrap();

        let step = store.find_step("job", 1).unwrap();
        for channel in Channel::ALL {
            assert!(step.channel(channel).is_dir(), "{:?} missing", channel);
        }
    }

    #[test]
    fn test_app_names_with_underscores_survive_listing() {
        let (_dir, store) = store();
        store.create_job("job").unwrap();
        store.create_step("job", "my_long_app").unwrap();

        let steps = store.list_steps("job").unwrap();
        assert_eq!(steps[0].name.app_name, "my_long_app");
        assert_eq!(steps[0].name.ordinal, 1);
    }

    #[test]
    fn test_list_jobs_reports_connected_from_artifact_presence() {
        let (_dir, store) = store();
        store.create_job("job").unwrap();
        store.create_step("job", "a").unwrap();
        store.create_step("job", "b").unwrap();

        let jobs = store.list_jobs().unwrap();
        assert!(!jobs[0].steps[0].connected);

        store.write_mapping("job", 1, 2, "// glue").unwrap();
        let jobs = store.list_jobs().unwrap();
        assert!(jobs[0].steps[0].connected);
        assert!(!jobs[0].steps[1].connected);
    }

    #[test]
    fn test_list_jobs_empty_without_jobs_dir() {
        let (_dir, store) = store();
        assert!(store.list_jobs().unwrap().is_empty());
    }

    #[test]
    fn test_read_app_format_missing_then_present() {
        let (_dir, store) = store();
        store.ensure_app_dirs("tool").unwrap();

        assert!(matches!(
            store.read_app_format("tool", FormatDirection::Response),
            Err(OrchestratorError::FormatMissing { .. })
        ));

        fs::write(
            store.app_formats_dir("tool").join("response_main.json"),
            r#"{"rows": "string", "count": "number"}"#,
        )
        .unwrap();

        let schema = store
            .read_app_format("tool", FormatDirection::Response)
            .unwrap();
        assert!(schema.contains_key("rows"));
        assert!(schema.contains_key("count"));
    }

    #[test]
    fn test_read_app_format_rejects_non_object() {
        let (_dir, store) = store();
        store.ensure_app_dirs("tool").unwrap();
        fs::write(
            store.app_formats_dir("tool").join("request_main.json"),
            "[1, 2, 3]",
        )
        .unwrap();

        assert!(matches!(
            store.read_app_format("tool", FormatDirection::Request),
            Err(OrchestratorError::MalformedSchema { .. })
        ));
    }

    #[test]
    fn test_ensure_app_dirs_idempotent() {
        let (_dir, store) = store();
        store.ensure_app_dirs("tool").unwrap();
        fs::write(store.app_payload_dir("tool").join("marker"), "x").unwrap();

        store.ensure_app_dirs("tool").unwrap();
        assert!(store.app_payload_dir("tool").join("marker").is_file());
    }
}
