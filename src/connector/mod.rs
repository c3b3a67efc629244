//! Step connector: derives mapping artifacts between adjacent steps

pub mod codegen;

pub use codegen::{FieldMapCodegen, MappingCodegen, MappingRequest};

use crate::core::{FormatDirection, Result};
use crate::store::StateStore;
use std::sync::Arc;
use tracing::info;

/// Connects a step to its immediate successor
#[derive(Clone)]
pub struct StepConnector {
    store: StateStore,
    codegen: Arc<dyn MappingCodegen>,
}

impl StepConnector {
    pub fn new(store: StateStore, codegen: Arc<dyn MappingCodegen>) -> Self {
        Self { store, codegen }
    }

    /// Generate and persist the mapping from step `from` to step `from + 1`
    ///
    /// Both steps are located by ordinal (tolerating gaps from deletions).
    /// Requires both apps to have published their schemas: the upstream
    /// response format and the downstream request format must exist, so
    /// connecting is only possible once both apps have run at least once.
    /// The persisted artifact is the durable "connected" signal; rerunning
    /// overwrites it.
    pub async fn connect(&self, job: &str, from: u32) -> Result<String> {
        let to = from + 1;
        let from_step = self.store.find_step(job, from)?;
        let to_step = self.store.find_step(job, to)?;

        let response_schema = self
            .store
            .read_app_format(&from_step.name.app_name, FormatDirection::Response)?;
        let request_schema = self
            .store
            .read_app_format(&to_step.name.app_name, FormatDirection::Request)?;

        let request = MappingRequest {
            from_app: from_step.name.app_name,
            to_app: to_step.name.app_name,
            response_schema,
            request_schema,
        };
        let code = self.codegen.generate(&request).await?;

        self.store.write_mapping(job, from, to, &code)?;
        info!("Connected step {} to step {} in job '{}'", from, to, job);
        Ok(code)
    }
}
