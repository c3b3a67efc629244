//! Process identity and handles

use std::fmt;

/// Key a running process is tracked under
///
/// Step-scoped runs carry the full `(job, ordinal, app)` triple; priming
/// runs, which exist only to let an app publish its formats, are keyed by
/// the app name alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProcessKey {
    Priming(String),
    Step {
        job: String,
        ordinal: u32,
        app: String,
    },
}

impl ProcessKey {
    pub fn priming(app: impl Into<String>) -> Self {
        ProcessKey::Priming(app.into())
    }

    pub fn step(job: impl Into<String>, ordinal: u32, app: impl Into<String>) -> Self {
        ProcessKey::Step {
            job: job.into(),
            ordinal,
            app: app.into(),
        }
    }

    /// Name of the app behind this process
    pub fn app_name(&self) -> &str {
        match self {
            ProcessKey::Priming(app) => app,
            ProcessKey::Step { app, .. } => app,
        }
    }
}

impl fmt::Display for ProcessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessKey::Priming(app) => write!(f, "{}", app),
            ProcessKey::Step { job, ordinal, app } => write!(f, "{}_{}_{}", job, ordinal, app),
        }
    }
}

/// In-memory record of a live process; never persisted
#[derive(Debug)]
pub struct RunningApp {
    /// OS pid, if the runtime reported one at spawn time
    pub pid: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(ProcessKey::priming("tool").to_string(), "tool");
        assert_eq!(
            ProcessKey::step("Pipeline1", 2, "csv-reader").to_string(),
            "Pipeline1_2_csv-reader"
        );
    }

    #[test]
    fn test_priming_and_step_keys_are_distinct() {
        let priming = ProcessKey::priming("tool");
        let step = ProcessKey::step("job", 1, "tool");
        assert_ne!(priming, step);
        assert_eq!(priming.app_name(), step.app_name());
    }
}
