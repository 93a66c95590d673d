//! Telegram update handlers.
//!
//! `handle_message` is the single entry point for message updates and the
//! top-level error boundary: nothing a handler returns can stop the
//! dispatcher.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use ytsb_core::domain::{ChatId, MessageId, MessageRef, UserId};

use crate::router::AppState;

mod commands;
mod text;

#[cfg(test)]
mod testing;

/// Transport-free view of an incoming text message.
#[derive(Clone, Debug)]
pub struct Inbound {
    pub user_id: UserId,
    pub first_name: String,
    pub origin: MessageRef,
    pub text: String,
}

impl Inbound {
    fn from_message(msg: &Message) -> Option<Self> {
        let text = msg.text()?.to_string();
        let user = msg.from();
        Some(Self {
            // Channel posts carry no sender; fall back to the chat as the key.
            user_id: user
                .map(|u| UserId(u.id.0 as i64))
                .unwrap_or(UserId(msg.chat.id.0)),
            first_name: user.map(|u| u.first_name.clone()).unwrap_or_default(),
            origin: MessageRef {
                chat_id: ChatId(msg.chat.id.0),
                message_id: MessageId(msg.id.0),
            },
            text,
        })
    }
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(inbound) = Inbound::from_message(&msg) else {
        return Ok(());
    };
    handle_inbound(&state, &inbound).await;
    Ok(())
}

/// Route one text message; errors are logged and answered generically.
pub async fn handle_inbound(state: &AppState, inbound: &Inbound) {
    let result = if inbound.text.starts_with('/') {
        commands::handle_command(state, inbound).await
    } else {
        text::handle_text(state, inbound).await
    };

    let Err(e) = result else {
        return;
    };

    tracing::error!(
        chat_id = inbound.origin.chat_id.0,
        user_id = inbound.user_id.0,
        error = %e,
        "failed to handle message"
    );
    // Best-effort; a failure here is only traced.
    if let Err(e) = state
        .messenger
        .reply_html(inbound.origin, &state.formatter().generic_error())
        .await
    {
        tracing::debug!(
            chat_id = inbound.origin.chat_id.0,
            error = %e,
            "failed to send generic error reply"
        );
    }
}
