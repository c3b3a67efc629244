//! On-disk naming conventions
//!
//! The directory tree is the single source of truth: a step's ordinal and
//! app name are encoded in its folder name, and a mapping artifact's
//! endpoints are encoded in its file name. Every encode/parse of those
//! conventions lives here so the naming scheme never leaks into callers.

/// Top-level folder holding all jobs
pub const JOBS_DIR: &str = "Jobs";

/// Top-level folder holding all installed apps
pub const APPS_DIR: &str = "Apps";

/// App subfolder with the extracted executable payload
pub const APP_PAYLOAD_DIR: &str = "app";

/// App subfolder with self-reported `request_*`/`response_*` schemas
pub const APP_FORMATS_DIR: &str = "formats";

/// I/O channel folders owned by every step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Context,
    Errors,
    Requests,
    Responses,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Context,
        Channel::Errors,
        Channel::Requests,
        Channel::Responses,
    ];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Channel::Context => "context",
            Channel::Errors => "errors",
            Channel::Requests => "requests",
            Channel::Responses => "responses",
        }
    }
}

/// Decoded form of a step directory name (`{ordinal}_{appName}`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDirName {
    pub ordinal: u32,
    pub app_name: String,
}

impl StepDirName {
    pub fn new(ordinal: u32, app_name: impl Into<String>) -> Self {
        Self {
            ordinal,
            app_name: app_name.into(),
        }
    }

    /// Encode into the on-disk folder name
    pub fn encode(&self) -> String {
        format!("{}_{}", self.ordinal, self.app_name)
    }

    /// Parse a folder name back into `(ordinal, appName)`
    ///
    /// Splits on the first underscore only; app names may themselves
    /// contain underscores. Returns `None` for names that do not follow
    /// the convention, which callers treat as foreign entries to skip.
    pub fn parse(name: &str) -> Option<Self> {
        let (ordinal, app_name) = name.split_once('_')?;
        let ordinal: u32 = ordinal.parse().ok()?;
        if app_name.is_empty() {
            return None;
        }
        Some(Self {
            ordinal,
            app_name: app_name.to_string(),
        })
    }
}

/// File name of the mapping artifact connecting step `from` to step `to`
pub fn mapping_file_name(from: u32, to: u32) -> String {
    format!("mapping_{}_to_{}.js", from, to)
}
