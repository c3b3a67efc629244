//! Error taxonomy shared by every subsystem

use crate::core::app::FormatDirection;
use thiserror::Error;

/// Errors surfaced by orchestrator operations
///
/// No variant is treated as fatal; every operation returns one of these to
/// its caller and the caller decides whether to retry at its own layer.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("invalid name {0:?}: must be a single path component")]
    InvalidName(String),

    #[error("job '{0}' already exists")]
    JobAlreadyExists(String),

    #[error("job '{0}' does not exist")]
    JobNotFound(String),

    #[error("step {ordinal} does not exist in job '{job}'")]
    StepNotFound { job: String, ordinal: u32 },

    #[error("app '{0}' not found in registry")]
    DescriptorNotFound(String),

    #[error("registry unavailable: {0}")]
    RegistryUnavailable(String),

    #[error("download of '{url}' failed: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("extracting archive for app '{app}' failed: {reason}")]
    ExtractFailed { app: String, reason: String },

    /// The app has not produced a schema file yet. Recoverable: run the
    /// app at least once and retry.
    #[error("app '{app}' has not published a {direction} format yet")]
    FormatMissing {
        app: String,
        direction: FormatDirection,
    },

    #[error("unreadable {direction} schema for app '{app}': {reason}")]
    MalformedSchema {
        app: String,
        direction: FormatDirection,
        reason: String,
    },

    #[error("no runnable executable in app '{0}'")]
    ExecutableNotFound(String),

    #[error("mapping generation failed: {0}")]
    Codegen(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, OrchestratorError>;
