pub mod submission;
pub mod templates;
pub mod wizard;

pub use crate::domain::model::{DraftLead, LeadSubmission, OutboundEmail, SubmissionOutcome};
pub use crate::domain::ports::{ConfigProvider, EmailSender, LeadDispatcher};
pub use crate::utils::error::Result;
