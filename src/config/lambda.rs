use crate::config::{IntakeConfig, MailSettings, ProviderSettings};
use crate::utils::error::{IntakeError, Result};
use std::env;
use std::str::FromStr;

/// Builds the intake configuration from Lambda environment variables.
pub fn from_env() -> Result<IntakeConfig> {
    from_lookup(|key| env::var(key).ok())
}

/// Same as `from_env`, reading keys from any lookup (tests inject a map).
pub fn from_lookup<F>(lookup: F) -> Result<IntakeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = lookup("RESEND_API_KEY").ok_or_else(|| IntakeError::MissingConfigError {
        field: "RESEND_API_KEY".to_string(),
    })?;

    let mut provider = ProviderSettings::new(api_key);
    if let Some(base_url) = lookup("RESEND_BASE_URL") {
        provider.base_url = base_url;
    }
    if let Some(timeout) = parse_var(&lookup, "RESEND_TIMEOUT_SECONDS")? {
        provider.timeout_seconds = timeout;
    }
    if let Some(attempts) = parse_var(&lookup, "RESEND_RETRY_ATTEMPTS")? {
        provider.retry_attempts = attempts;
    }
    if let Some(delay) = parse_var(&lookup, "RESEND_RETRY_DELAY_MS")? {
        provider.retry_delay_ms = delay;
    }

    let defaults = MailSettings::default();
    let mail = MailSettings {
        business_address: lookup("BUSINESS_ADDRESS").unwrap_or(defaults.business_address),
        notification_from: lookup("NOTIFICATION_FROM").unwrap_or(defaults.notification_from),
        auto_reply_from: lookup("AUTO_REPLY_FROM").unwrap_or(defaults.auto_reply_from),
        contact_address: lookup("CONTACT_ADDRESS").unwrap_or(defaults.contact_address),
        brand_name: lookup("BRAND_NAME").unwrap_or(defaults.brand_name),
        site_url: lookup("SITE_URL").unwrap_or(defaults.site_url),
        dispatch_timeout_seconds: parse_var(&lookup, "DISPATCH_TIMEOUT_SECONDS")?
            .unwrap_or(defaults.dispatch_timeout_seconds),
    };

    Ok(IntakeConfig { provider, mail })
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| IntakeError::InvalidConfigValueError {
                field: key.to_string(),
                value: raw.clone(),
                reason: "Expected a non-negative integer".to_string(),
            }),
    }
}
