use std::sync::Arc;

use teloxide::{
    dispatching::Dispatcher, dptree, error_handlers::LoggingErrorHandler, prelude::*,
    types::BotCommand, update_listeners::Polling,
};

use ytsb_core::{
    config::Config,
    formatting::Formatter,
    history::HistoryStore,
    intent::IntentClassifier,
    messaging::port::MessagingPort,
    search::{SearchOrchestrator, SearchProvider},
};

use crate::handlers;
use crate::TelegramMessenger;

/// Everything a handler needs; one instance shared by all update tasks.
pub struct AppState {
    pub cfg: Arc<Config>,
    pub messenger: Arc<dyn MessagingPort>,
    pub history: HistoryStore,
    pub classifier: IntentClassifier,
    pub orchestrator: SearchOrchestrator,
}

impl AppState {
    pub fn new(
        cfg: Arc<Config>,
        messenger: Arc<dyn MessagingPort>,
        provider: Arc<dyn SearchProvider>,
    ) -> Self {
        let formatter = Formatter::new(&cfg.trigger_word);
        Self {
            classifier: IntentClassifier::new(&cfg.trigger_word),
            orchestrator: SearchOrchestrator::new(provider, formatter, cfg.search_timeout),
            history: HistoryStore::default(),
            messenger,
            cfg,
        }
    }

    pub fn formatter(&self) -> &Formatter {
        self.orchestrator.formatter()
    }
}

pub async fn run_polling(
    cfg: Arc<Config>,
    provider: Arc<dyn SearchProvider>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "bot started"),
        Err(e) => tracing::warn!(error = %e, "get_me failed"),
    }
    tracing::info!(trigger = %cfg.trigger_word, timeout = ?cfg.search_timeout, "search settings");

    if let Err(e) = bot.set_my_commands(bot_commands()).await {
        tracing::warn!(error = %e, "failed to register bot commands");
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(
        bot.clone(),
        cfg.telegram_message_limit,
    ));
    let state = Arc::new(AppState::new(cfg, messenger, provider));

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    tracing::info!("polling for updates");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "an error occurred in the dispatcher",
        ))
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("an error from the update listener"),
        )
        .await;

    Ok(())
}

fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "بدء البوت"),
        BotCommand::new("help", "المساعدة"),
        BotCommand::new("search", "بحث مباشر"),
    ]
}
