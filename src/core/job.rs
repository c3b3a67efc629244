//! Job and step domain models

use serde::{Deserialize, Serialize};

/// A job as reported by the listing operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    /// Job name (unique within the store)
    pub job_name: String,

    /// Steps in ordinal order; ordinals may have gaps from deletions
    pub steps: Vec<StepSummary>,
}

/// One step of a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSummary {
    /// 1-based position assigned at creation; never renumbered
    pub ordinal: u32,

    /// Name of the app backing this step
    pub app_name: String,

    /// Whether a mapping artifact to the successor step exists
    pub connected: bool,
}

/// Check that a job name is usable as a directory name
///
/// A valid name is a single non-empty path component: no separators, no
/// traversal, no NUL.
pub fn is_valid_job_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
