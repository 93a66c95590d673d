use async_trait::async_trait;

use crate::{
    domain::MessageRef,
    messaging::types::MessagingCapabilities,
    Result,
};

/// Outbound messaging port.
///
/// Every send returns a [`MessageRef`] so a placeholder can later be replaced
/// in place with [`MessagingPort::edit_html`].
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Limits outgoing text must respect.
    fn capabilities(&self) -> MessagingCapabilities;

    async fn reply_html(&self, to: MessageRef, html: &str) -> Result<MessageRef>;
    async fn edit_html(&self, msg: MessageRef, html: &str) -> Result<()>;
}
