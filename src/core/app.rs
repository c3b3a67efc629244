//! App domain model

use serde::{Deserialize, Serialize};

/// One entry of the remote app registry
///
/// Field names mirror the registry's JSON document, which is the only
/// legitimate source for resolving an app name to a download URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    /// Unique app name; doubles as the install directory name
    pub name: String,

    /// Published version string
    pub version: String,

    /// Source repository
    pub github: String,

    /// URL of the packaged app archive
    pub zip_download: String,
}

/// Which side of an app's I/O contract a schema file describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatDirection {
    Request,
    Response,
}

impl FormatDirection {
    /// File name prefix used in the app's `formats` directory
    pub fn prefix(&self) -> &'static str {
        match self {
            FormatDirection::Request => "request_",
            FormatDirection::Response => "response_",
        }
    }
}

impl std::fmt::Display for FormatDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatDirection::Request => write!(f, "request"),
            FormatDirection::Response => write!(f, "response"),
        }
    }
}
