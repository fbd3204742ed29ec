use crate::core::{EmailSender, OutboundEmail};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs rendered emails instead of sending them (`--dry-run`).
#[derive(Debug, Default)]
pub struct ConsoleSender {
    counter: AtomicUsize,
}

impl ConsoleSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailSender for ConsoleSender {
    async fn send(&self, email: &OutboundEmail) -> Result<String> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            "📝 [dry-run] {} from {} to {} (reply-to: {})",
            email.kind,
            email.from,
            email.to.join(", "),
            email.reply_to.as_deref().unwrap_or("-")
        );
        tracing::info!("📝 [dry-run] Subject: {}", email.subject);
        tracing::debug!("📝 [dry-run] Body:\n{}", email.text);
        Ok(format!("dry-run-{}", n))
    }
}
