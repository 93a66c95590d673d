use ytsb_core::domain::SearchQuery;

use super::Inbound;
use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

/// Join command arguments with single spaces.
fn join_args(args: &str) -> String {
    args.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub async fn handle_command(state: &AppState, inbound: &Inbound) -> anyhow::Result<()> {
    let (cmd, args) = parse_command(&inbound.text);
    let formatter = state.formatter();

    let reply = match cmd.as_str() {
        "start" => formatter.welcome(&inbound.first_name),
        "help" => formatter.help(),
        "search" => match SearchQuery::new(&join_args(&args)) {
            None => formatter.search_usage(),
            Some(query) => {
                state.history.ensure(inbound.user_id).await;
                state.history.append(inbound.user_id, query.as_str()).await;
                state
                    .orchestrator
                    .search_and_reply(state.messenger.as_ref(), inbound.origin, &query)
                    .await?;
                return Ok(());
            }
        },
        other => {
            tracing::debug!(command = other, "ignoring unknown command");
            return Ok(());
        }
    };

    state.messenger.reply_html(inbound.origin, &reply).await?;
    Ok(())
}
