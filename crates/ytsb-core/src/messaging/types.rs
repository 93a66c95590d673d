/// Telegram rejects message bodies longer than this.
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

/// What a messenger accepts for one outgoing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessagingCapabilities {
    /// Upper bound on the HTML source, counted in characters.
    pub max_message_len: usize,
}

impl MessagingCapabilities {
    /// Whether `html` can go out as a single message.
    pub fn fits(&self, html: &str) -> bool {
        html.chars().count() <= self.max_message_len
    }
}

impl Default for MessagingCapabilities {
    fn default() -> Self {
        Self {
            max_message_len: TELEGRAM_MAX_MESSAGE_LEN,
        }
    }
}
