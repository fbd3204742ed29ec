pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{ConsoleSender, ResendClient};
pub use config::{IntakeConfig, MailSettings, ProviderSettings};
pub use crate::core::{submission::SubmissionPipeline, wizard::Wizard};
pub use domain::model::{DraftLead, LeadSubmission, Service, SubmissionOutcome};
pub use utils::error::{IntakeError, Result};
