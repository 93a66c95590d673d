//! Fakes shared by handler tests.

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use ytsb_core::{
    config::Config,
    domain::{ChatId, MessageId, MessageRef, UserId, VideoResult},
    errors::Error,
    intent::DEFAULT_TRIGGER_WORD,
    messaging::{
        port::MessagingPort,
        types::{MessagingCapabilities, TELEGRAM_MAX_MESSAGE_LEN},
    },
    search::SearchProvider,
    Result,
};

use super::Inbound;
use crate::router::AppState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Reply(MessageRef, String),
    Edit(MessageRef, String),
}

#[derive(Default)]
pub struct FakeMessenger {
    next_id: AtomicUsize,
    failing_replies: AtomicUsize,
    log: Mutex<Vec<Sent>>,
}

impl FakeMessenger {
    pub fn sent(&self) -> Vec<Sent> {
        self.log.lock().unwrap().clone()
    }

    pub fn fail_next_replies(&self, n: usize) {
        self.failing_replies.store(n, Ordering::SeqCst);
    }

    fn next_ref(&self, chat_id: ChatId) -> MessageRef {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32;
        MessageRef {
            chat_id,
            message_id: MessageId(1000 + id),
        }
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities::default()
    }

    async fn reply_html(&self, to: MessageRef, html: &str) -> Result<MessageRef> {
        let failing = self.failing_replies.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_replies.store(failing - 1, Ordering::SeqCst);
            return Err(Error::External("telegram error: network".to_string()));
        }
        let msg = self.next_ref(to.chat_id);
        self.log
            .lock()
            .unwrap()
            .push(Sent::Reply(msg, html.to_string()));
        Ok(msg)
    }

    async fn edit_html(&self, msg: MessageRef, html: &str) -> Result<()> {
        self.log.lock().unwrap().push(Sent::Edit(msg, html.to_string()));
        Ok(())
    }
}

pub struct FakeProvider {
    results: Vec<VideoResult>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for FakeProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<VideoResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.results.iter().take(limit).cloned().collect())
    }
}

pub fn video(id: &str) -> VideoResult {
    VideoResult {
        title: format!("Video {id}"),
        duration: Some("2:30".to_string()),
        channel: "Channel".to_string(),
        id: id.to_string(),
    }
}

pub fn state_with(results: Vec<VideoResult>) -> (AppState, Arc<FakeMessenger>, Arc<FakeProvider>) {
    let cfg = Arc::new(Config {
        telegram_bot_token: "test-token".to_string(),
        trigger_word: DEFAULT_TRIGGER_WORD.to_string(),
        search_timeout: Duration::from_secs(5),
        log_file: PathBuf::from("bot.log"),
        telegram_message_limit: TELEGRAM_MAX_MESSAGE_LEN,
    });
    let messenger = Arc::new(FakeMessenger::default());
    let provider = Arc::new(FakeProvider {
        results,
        calls: AtomicUsize::new(0),
        queries: Mutex::new(Vec::new()),
    });
    let state = AppState::new(cfg, messenger.clone(), provider.clone());
    (state, messenger, provider)
}

pub fn inbound(user: i64, text: &str) -> Inbound {
    Inbound {
        user_id: UserId(user),
        first_name: "Sara".to_string(),
        origin: MessageRef {
            chat_id: ChatId(user),
            message_id: MessageId(1),
        },
        text: text.to_string(),
    }
}

/// Collects formatted tracing output written by a test subscriber.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install a debug-level subscriber for the current thread.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
