#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use lead_intake::config::lambda::from_env;
#[cfg(feature = "lambda")]
use lead_intake::core::LeadDispatcher;
#[cfg(feature = "lambda")]
use lead_intake::utils::{error::ErrorCategory, logger, validation::Validate};
#[cfg(feature = "lambda")]
use lead_intake::{LeadSubmission, ResendClient, SubmissionPipeline};
#[cfg(feature = "lambda")]
use serde::Serialize;

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<LeadSubmission>) -> Result<Response, Error> {
    tracing::info!("Handling lead submission");

    let config = from_env().map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let contact_address = config.mail.contact_address.clone();
    let pipeline = SubmissionPipeline::new(ResendClient::new(config.provider), config.mail);

    match pipeline.dispatch(&event.payload).await {
        Ok(()) => Ok(Response {
            success: true,
            message: "Inquiry delivered".to_string(),
        }),
        Err(e) if e.category() == ErrorCategory::Validation => Ok(Response {
            success: false,
            message: e.user_friendly_message(),
        }),
        Err(e) => {
            tracing::error!("❌ Dispatch failed: {} ({})", e, e.recovery_suggestion());
            Ok(Response {
                success: false,
                message: format!(
                    "Failed to send email. Please try again or contact us directly at {}",
                    contact_address
                ),
            })
        }
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();
    run(service_fn(function_handler)).await
}
