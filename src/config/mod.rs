#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    pub provider: ProviderSettings,
    #[serde(default)]
    pub mail: MailSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    pub business_address: String,
    pub notification_from: String,
    pub auto_reply_from: String,
    pub contact_address: String,
    pub brand_name: String,
    pub site_url: String,
    pub dispatch_timeout_seconds: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_retry_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            business_address: "sculptvisions@gmail.com".to_string(),
            notification_from: "SCULPT Contact <noreply@sculpt.work>".to_string(),
            auto_reply_from: "SCULPT Team <noreply@sculpt.work>".to_string(),
            contact_address: "sculptvisions@gmail.com".to_string(),
            brand_name: "SCULPT".to_string(),
            site_url: "https://sculpt.work".to_string(),
            dispatch_timeout_seconds: 15,
        }
    }
}

impl IntakeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            provider: ProviderSettings::new(api_key),
            mail: MailSettings::default(),
        }
    }
}

impl ConfigProvider for MailSettings {
    fn business_address(&self) -> &str {
        &self.business_address
    }

    fn notification_from(&self) -> &str {
        &self.notification_from
    }

    fn auto_reply_from(&self) -> &str {
        &self.auto_reply_from
    }

    fn contact_address(&self) -> &str {
        &self.contact_address
    }

    fn brand_name(&self) -> &str {
        &self.brand_name
    }

    fn site_url(&self) -> &str {
        &self.site_url
    }

    fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_seconds)
    }
}

impl Validate for ProviderSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("provider.api_key", &self.api_key)?;
        validation::validate_resolved("provider.api_key", &self.api_key)?;
        validation::validate_url("provider.base_url", &self.base_url)?;
        validation::validate_range("provider.timeout_seconds", self.timeout_seconds, 1, 120)?;
        validation::validate_range("provider.retry_attempts", self.retry_attempts, 0, 5)?;
        Ok(())
    }
}

impl Validate for MailSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_mailbox("mail.business_address", &self.business_address)?;
        validation::validate_mailbox("mail.notification_from", &self.notification_from)?;
        validation::validate_mailbox("mail.auto_reply_from", &self.auto_reply_from)?;
        validation::validate_mailbox("mail.contact_address", &self.contact_address)?;
        validation::validate_non_empty_string("mail.brand_name", &self.brand_name)?;
        validation::validate_url("mail.site_url", &self.site_url)?;
        validation::validate_range(
            "mail.dispatch_timeout_seconds",
            self.dispatch_timeout_seconds,
            1,
            300,
        )?;
        Ok(())
    }
}

impl Validate for IntakeConfig {
    fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        self.mail.validate()?;
        tracing::debug!("Intake configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = IntakeConfig::new("re_test_key");
        assert!(config.validate().is_ok());
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.mail.dispatch_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_missing_api_key_fails() {
        let config = IntakeConfig::new("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_business_address_fails() {
        let mut config = IntakeConfig::new("re_test_key");
        config.mail.business_address = "inbox".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_attempts_bounded() {
        let mut config = IntakeConfig::new("re_test_key");
        config.provider.retry_attempts = 9;
        assert!(config.validate().is_err());
    }
}
