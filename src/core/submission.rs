use crate::core::templates;
use crate::core::{ConfigProvider, EmailSender, LeadDispatcher};
use crate::domain::model::{LeadSubmission, OutboundEmail};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// Sends the business notification and the auto-reply for one submission.
pub struct SubmissionPipeline<S: EmailSender, C: ConfigProvider> {
    sender: S,
    config: C,
}

impl<S: EmailSender, C: ConfigProvider> SubmissionPipeline<S, C> {
    pub fn new(sender: S, config: C) -> Self {
        Self { sender, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Renders both messages without sending them. Each render gets fresh
    /// idempotency keys shared by every retry of the same message.
    pub fn render(&self, submission: &LeadSubmission) -> [OutboundEmail; 2] {
        let dispatch_id = Uuid::new_v4();
        let mut emails = [
            templates::business_notification(&self.config, submission, Utc::now()),
            templates::auto_reply(&self.config, submission),
        ];
        for email in &mut emails {
            email.idempotency_key = Some(format!("lead-{}/{}", dispatch_id, email.kind.slug()));
        }
        emails
    }

    async fn send_required(&self, email: &OutboundEmail) -> Result<String> {
        self.sender.send(email).await.map_err(|e| {
            tracing::error!("❌ Failed to send {}: {}", email.kind, e);
            match e {
                already @ IntakeError::EmailDispatchError { .. } => already,
                other => IntakeError::EmailDispatchError {
                    kind: email.kind,
                    reason: other.to_string(),
                },
            }
        })
    }

    async fn send_all(&self, submission: &LeadSubmission) -> Result<()> {
        let [notification, reply] = self.render(submission);

        // Business first; the auto-reply is skipped when that fails.
        let notification_id = self.send_required(&notification).await?;
        tracing::debug!("Business notification accepted (id: {})", notification_id);

        let reply_id = self.send_required(&reply).await?;
        tracing::debug!("Auto-reply accepted (id: {})", reply_id);

        Ok(())
    }
}

#[async_trait]
impl<S: EmailSender, C: ConfigProvider> LeadDispatcher for SubmissionPipeline<S, C> {
    async fn dispatch(&self, submission: &LeadSubmission) -> Result<()> {
        submission.validate()?;

        tracing::info!("📨 Dispatching inquiry from {}", submission.email);
        let limit = self.config.dispatch_timeout();
        match tokio::time::timeout(limit, self.send_all(submission)).await {
            Ok(result) => {
                result?;
                tracing::info!("✅ Inquiry from {} delivered", submission.email);
                Ok(())
            }
            Err(_) => {
                tracing::error!("❌ Dispatch exceeded {}s", limit.as_secs());
                Err(IntakeError::TimeoutError {
                    seconds: limit.as_secs(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailSettings;
    use crate::domain::model::{DraftLead, MessageKind, Service};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingSender {
        sent: Arc<Mutex<Vec<OutboundEmail>>>,
        fail_on: Option<MessageKind>,
    }

    #[async_trait]
    impl EmailSender for RecordingSender {
        async fn send(&self, email: &OutboundEmail) -> Result<String> {
            if self.fail_on == Some(email.kind) {
                return Err(IntakeError::ProviderError {
                    status: 500,
                    message: "provider exploded".to_string(),
                });
            }
            let mut sent = self.sent.lock().await;
            sent.push(email.clone());
            Ok(format!("msg-{}", sent.len()))
        }
    }

    struct StalledSender;

    #[async_trait]
    impl EmailSender for StalledSender {
        async fn send(&self, _email: &OutboundEmail) -> Result<String> {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
            Ok("never".to_string())
        }
    }

    fn jane() -> LeadSubmission {
        let draft = DraftLead {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "5551234".to_string(),
            details: "Need a landing page".to_string(),
            budget: "2,000".to_string(),
            services: vec![Service::WebDevelopment],
            ..DraftLead::default()
        };
        LeadSubmission::from_draft(&draft)
    }

    #[tokio::test]
    async fn test_dispatch_sends_both_messages_in_order() {
        let sender = RecordingSender::default();
        let pipeline = SubmissionPipeline::new(sender.clone(), MailSettings::default());

        pipeline.dispatch(&jane()).await.unwrap();

        let sent = sender.sent.lock().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].kind, MessageKind::BusinessNotification);
        assert_eq!(sent[0].to, vec!["sculptvisions@gmail.com".to_string()]);
        assert_eq!(sent[0].reply_to.as_deref(), Some("jane@example.com"));
        assert_eq!(sent[1].kind, MessageKind::AutoReply);
        assert_eq!(sent[1].to, vec!["jane@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_business_send_skips_auto_reply() {
        let sender = RecordingSender {
            fail_on: Some(MessageKind::BusinessNotification),
            ..RecordingSender::default()
        };
        let pipeline = SubmissionPipeline::new(sender.clone(), MailSettings::default());

        let err = pipeline.dispatch(&jane()).await.unwrap_err();
        assert!(matches!(
            err,
            IntakeError::EmailDispatchError {
                kind: MessageKind::BusinessNotification,
                ..
            }
        ));
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_auto_reply_fails_the_submission() {
        let sender = RecordingSender {
            fail_on: Some(MessageKind::AutoReply),
            ..RecordingSender::default()
        };
        let pipeline = SubmissionPipeline::new(sender.clone(), MailSettings::default());

        let err = pipeline.dispatch(&jane()).await.unwrap_err();
        assert!(matches!(
            err,
            IntakeError::EmailDispatchError {
                kind: MessageKind::AutoReply,
                ..
            }
        ));
        assert_eq!(sender.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submission_never_reaches_the_provider() {
        let sender = RecordingSender::default();
        let pipeline = SubmissionPipeline::new(sender.clone(), MailSettings::default());

        let submission = LeadSubmission::contact("Jane", "not-an-address", "Hello");
        let err = pipeline.dispatch(&submission).await.unwrap_err();
        assert!(matches!(err, IntakeError::ValidationError { .. }));
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_each_message_gets_its_own_idempotency_key() {
        let sender = RecordingSender::default();
        let pipeline = SubmissionPipeline::new(sender.clone(), MailSettings::default());

        pipeline.dispatch(&jane()).await.unwrap();
        pipeline.dispatch(&jane()).await.unwrap();

        let sent = sender.sent.lock().await;
        let keys: Vec<&str> = sent
            .iter()
            .map(|email| email.idempotency_key.as_deref().unwrap())
            .collect();
        assert!(keys[0].ends_with("/business-notification"));
        assert!(keys[1].ends_with("/auto-reply"));
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[0], keys[2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_is_bounded_by_timeout() {
        let settings = MailSettings {
            dispatch_timeout_seconds: 2,
            ..MailSettings::default()
        };
        let pipeline = SubmissionPipeline::new(StalledSender, settings);

        let err = pipeline.dispatch(&jane()).await.unwrap_err();
        assert!(matches!(err, IntakeError::TimeoutError { seconds: 2 }));
    }
}
