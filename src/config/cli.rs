use crate::config::IntakeConfig;
use crate::domain::model::Service;
use crate::utils::error::Result;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lead-intake")]
#[command(about = "Walk a project inquiry through the lead form and email it")]
pub struct CliConfig {
    /// TOML configuration file (provider and mail settings)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Email provider API key
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the provider base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the address that receives business notifications
    #[arg(long)]
    pub business_address: Option<String>,

    /// Render the emails to the log instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// List dialing codes matching a country name or code, then exit
    #[arg(long, value_name = "QUERY")]
    pub find_country: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(flatten)]
    pub lead: LeadArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct LeadArgs {
    /// Service to request (repeatable): app, web, ai, branding or the full name
    #[arg(short, long = "service")]
    pub services: Vec<Service>,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    /// Dialing code, with or without the leading '+'
    #[arg(long)]
    pub country_code: Option<String>,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Free-text project details
    #[arg(long, default_value = "")]
    pub details: String,

    #[arg(long)]
    pub currency: Option<String>,

    #[arg(long, default_value = "")]
    pub budget: String,
}

impl CliConfig {
    /// Loads the config file when given, otherwise defaults, then applies flag overrides.
    pub fn resolve(&self) -> Result<IntakeConfig> {
        let mut config = match &self.config {
            Some(path) => IntakeConfig::from_file(path)?,
            None => IntakeConfig::new(self.api_key.clone().unwrap_or_default()),
        };

        if let Some(api_key) = &self.api_key {
            config.provider.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.provider.base_url = base_url.clone();
        }
        if let Some(address) = &self.business_address {
            config.mail.business_address = address.clone();
        }
        if self.dry_run && config.provider.api_key.trim().is_empty() {
            config.provider.api_key = "dry-run".to_string();
        }

        Ok(config)
    }
}
