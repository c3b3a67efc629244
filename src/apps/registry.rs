//! Remote app registry client

use crate::core::{AppDescriptor, OrchestratorError, Result};
use tracing::debug;

/// Client for the remote registry index
///
/// The catalog is the only legitimate source for resolving an app name to
/// a download URL; installing anything not listed there would bypass the
/// install layout and leave an inconsistent app entry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    url: String,
    http: reqwest::Client,
}

impl RegistryClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full catalog
    ///
    /// Single request, no caching, no retry. Transport failures and
    /// non-2xx responses surface as `RegistryUnavailable`; whether to try
    /// again is the caller's decision.
    pub async fn fetch_catalog(&self) -> Result<Vec<AppDescriptor>> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| OrchestratorError::RegistryUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OrchestratorError::RegistryUnavailable(format!(
                "HTTP {} from {}",
                response.status(),
                self.url
            )));
        }

        let catalog = response
            .json::<Vec<AppDescriptor>>()
            .await
            .map_err(|e| OrchestratorError::RegistryUnavailable(e.to_string()))?;

        debug!("Fetched registry catalog: {} apps", catalog.len());
        Ok(catalog)
    }

    /// Resolve a single app name against the catalog
    pub async fn resolve(&self, name: &str) -> Result<AppDescriptor> {
        self.fetch_catalog()
            .await?
            .into_iter()
            .find(|descriptor| descriptor.name == name)
            .ok_or_else(|| OrchestratorError::DescriptorNotFound(name.to_string()))
    }
}
