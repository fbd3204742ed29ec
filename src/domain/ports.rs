use crate::domain::model::{LeadSubmission, OutboundEmail};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Addresses and branding the pipeline renders into outgoing mail.
pub trait ConfigProvider: Send + Sync {
    fn business_address(&self) -> &str;
    fn notification_from(&self) -> &str;
    fn auto_reply_from(&self) -> &str;
    fn contact_address(&self) -> &str;
    fn brand_name(&self) -> &str;
    fn site_url(&self) -> &str;
    fn dispatch_timeout(&self) -> Duration;
}

/// Sends one rendered email and returns the provider's message id.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<String>;
}

/// What the wizard submits through.
#[async_trait]
pub trait LeadDispatcher: Send + Sync {
    async fn dispatch(&self, submission: &LeadSubmission) -> Result<()>;
}
