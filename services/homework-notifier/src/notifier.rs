//! Notifier trait for delivering messages

use async_trait::async_trait;

/// Trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a plain-text message, reporting transport failures
    async fn send(&self, message: &str) -> crate::Result<()>;
}

/// Send `message` and swallow any failure so the poll loop keeps running.
/// Returns whether the transport accepted the message.
pub async fn deliver(notifier: &dyn Notifier, message: &str) -> bool {
    tracing::info!("Sending message via {}", notifier.type_name());
    match notifier.send(message).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Failed to send message via {}: {}", notifier.type_name(), e);
            false
        }
    }
}
