use crate::config::ProviderSettings;
use crate::core::{EmailSender, OutboundEmail};
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Resend HTTP API client.
pub struct ResendClient {
    client: Client,
    settings: ProviderSettings,
}

impl ResendClient {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.settings.base_url.trim_end_matches('/'))
    }

    async fn send_once(&self, email: &OutboundEmail) -> Result<String> {
        let mut request = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .timeout(self.settings.request_timeout())
            .json(email);
        if let Some(key) = &email.idempotency_key {
            request = request.header("Idempotency-Key", key);
        }
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!("Provider response status: {}", status);

        if status.is_success() {
            let body: SendResponse = response.json().await?;
            return Ok(body.id);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ProviderErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.name))
            .unwrap_or(text);
        Err(IntakeError::ProviderError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    /// Retries reuse the message's idempotency key. A message without one is
    /// given a key here so every attempt carries the same header.
    async fn send(&self, email: &OutboundEmail) -> Result<String> {
        let keyed;
        let email = match email.idempotency_key {
            Some(_) => email,
            None => {
                keyed = OutboundEmail {
                    idempotency_key: Some(format!("{}-{}", email.kind.slug(), Uuid::new_v4())),
                    ..email.clone()
                };
                &keyed
            }
        };

        let mut delay = self.settings.retry_delay();
        let mut attempt = 0;

        loop {
            match self.send_once(email).await {
                Ok(id) => return Ok(id),
                Err(e) if e.is_retryable() && attempt < self.settings.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "⚠️ Sending {} failed ({}), retry {}/{} in {:?}",
                        email.kind,
                        e,
                        attempt,
                        self.settings.retry_attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
