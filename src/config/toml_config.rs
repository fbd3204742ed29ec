use crate::config::IntakeConfig;
use crate::utils::error::{IntakeError, Result};
use regex::Regex;
use std::path::Path;

impl IntakeConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| IntakeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Substitutes `${VAR}` references from the environment; unknown names are left as-is.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| IntakeError::ConfigError {
        message: format!("Invalid placeholder pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config = IntakeConfig::from_toml_str(
            r#"
            [provider]
            api_key = "re_minimal"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.api_key, "re_minimal");
        assert_eq!(config.provider.retry_attempts, 1);
        assert_eq!(config.provider.timeout_seconds, 10);
        assert_eq!(config.mail.brand_name, "SCULPT");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = IntakeConfig::from_toml_str(
            r#"
            [provider]
            api_key = "re_full"
            base_url = "http://localhost:9000"
            timeout_seconds = 5
            retry_attempts = 2
            retry_delay_ms = 100

            [mail]
            business_address = "leads@agency.example"
            notification_from = "Agency <noreply@agency.example>"
            auto_reply_from = "Agency Team <noreply@agency.example>"
            contact_address = "hello@agency.example"
            brand_name = "Agency"
            site_url = "https://agency.example"
            dispatch_timeout_seconds = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.base_url, "http://localhost:9000");
        assert_eq!(config.provider.retry_attempts, 2);
        assert_eq!(config.mail.business_address, "leads@agency.example");
        assert_eq!(config.mail.dispatch_timeout_seconds, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("LEAD_INTAKE_TEST_KEY", "re_from_env");
        let config = IntakeConfig::from_toml_str(
            r#"
            [provider]
            api_key = "${LEAD_INTAKE_TEST_KEY}"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.api_key, "re_from_env");
    }

    #[test]
    fn test_unresolved_placeholder_fails_validation() {
        let config = IntakeConfig::from_toml_str(
            r#"
            [provider]
            api_key = "${LEAD_INTAKE_SURELY_UNSET_VAR}"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.api_key, "${LEAD_INTAKE_SURELY_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = IntakeConfig::from_toml_str("[provider\napi_key = 1").unwrap_err();
        assert!(matches!(err, IntakeError::ConfigError { .. }));
    }
}
