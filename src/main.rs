use clap::Parser;
use lead_intake::core::wizard::{Field, Wizard};
use lead_intake::core::{ConfigProvider, LeadDispatcher};
use lead_intake::domain::catalog;
use lead_intake::utils::error::ErrorSeverity;
use lead_intake::utils::{logger, validation::Validate};
use lead_intake::{CliConfig, ConsoleSender, ResendClient, SubmissionOutcome, SubmissionPipeline};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// Feeds the command-line lead through the three form steps.
/// Returns the blocking message when a step does not validate.
fn fill_wizard(wizard: &mut Wizard, cli: &CliConfig) -> Result<(), String> {
    let lead = &cli.lead;
    wizard.open();

    for service in &lead.services {
        if !wizard.draft().has_service(*service) {
            wizard.toggle_service(*service);
        }
    }
    advance(wizard)?;

    wizard.update_field(Field::Name, lead.name.as_str());
    wizard.update_field(Field::Email, lead.email.as_str());
    if let Some(code) = lead.country_code.as_deref().and_then(catalog::normalize_custom_code) {
        wizard.update_field(Field::CountryCode, code);
    }
    wizard.update_field(Field::Phone, lead.phone.as_str());
    wizard.update_field(Field::Details, lead.details.as_str());
    advance(wizard)?;

    if let Some(currency) = &lead.currency {
        let currency = currency.trim().to_uppercase();
        if !catalog::is_known_currency(&currency) {
            tracing::warn!("Currency {} is not in the usual list, keeping it anyway", currency);
        }
        wizard.update_field(Field::Currency, currency);
    }
    wizard.update_field(Field::Budget, lead.budget.as_str());
    if !wizard.can_submit() {
        wizard.attempt_next();
        return Err(wizard.error().unwrap_or_default().to_string());
    }
    Ok(())
}

fn advance(wizard: &mut Wizard) -> Result<(), String> {
    if wizard.attempt_next() {
        Ok(())
    } else {
        Err(wizard.error().unwrap_or_default().to_string())
    }
}

async fn run_wizard<D: LeadDispatcher>(wizard: &mut Wizard, dispatcher: &D) -> i32 {
    match wizard.submit(dispatcher).await {
        Some(SubmissionOutcome::Success) => {
            let notice = wizard.toast().unwrap_or_default().to_string();
            tracing::info!("✅ Inquiry submitted");
            println!("✅ {}", notice);
            wizard.dismiss_toast();
            0
        }
        Some(SubmissionOutcome::Failure { reason }) => {
            tracing::error!("❌ Submission failed: {}", reason);
            eprintln!("❌ {}", wizard.error().unwrap_or_default());
            1
        }
        None => {
            eprintln!("❌ The form is not ready to submit");
            2
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Logging
    logger::init_cli_logger(cli.verbose);

    if let Some(query) = &cli.find_country {
        for entry in catalog::search(query) {
            println!("{:>5}  {}", entry.code, entry.country);
        }
        return Ok(());
    }

    tracing::info!("Starting lead-intake CLI");

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(e.severity()));
        }
    };

    let mut wizard = Wizard::new(config.mail.contact_address());
    wizard.on_complete(|| tracing::debug!("Lead form completed"));

    if let Err(message) = fill_wizard(&mut wizard, &cli) {
        tracing::error!("❌ Lead form blocked on {}: {}", wizard.step(), message);
        eprintln!("❌ {}", message);
        std::process::exit(2);
    }

    let code = if cli.dry_run {
        tracing::info!("🔍 Dry run: emails are rendered to the log only");
        let pipeline = SubmissionPipeline::new(ConsoleSender::new(), config.mail);
        run_wizard(&mut wizard, &pipeline).await
    } else {
        let pipeline = SubmissionPipeline::new(ResendClient::new(config.provider), config.mail);
        run_wizard(&mut wizard, &pipeline).await
    };

    if code > 0 {
        std::process::exit(code);
    }
    Ok(())
}
