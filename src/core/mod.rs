//! Core domain models for jobforge
//!
//! This module defines the fundamental data structures that represent
//! jobs, steps, installed apps, and the shared error taxonomy.

pub mod app;
pub mod config;
pub mod error;
pub mod job;

pub use app::{AppDescriptor, FormatDirection};
pub use config::OrchestratorConfig;
pub use error::{OrchestratorError, Result};
pub use job::{JobSummary, StepSummary};
