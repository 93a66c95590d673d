use ytsb_core::{domain::SearchQuery, intent::Intent};

use super::Inbound;
use crate::router::AppState;

pub async fn handle_text(state: &AppState, inbound: &Inbound) -> anyhow::Result<()> {
    state.history.ensure(inbound.user_id).await;
    let formatter = state.formatter();

    let raw = match state.classifier.classify(&inbound.text) {
        Intent::Trigger(raw) => raw,
        Intent::PlainText => {
            state
                .messenger
                .reply_html(inbound.origin, &formatter.plain_text_hint())
                .await?;
            return Ok(());
        }
    };

    let Some(query) = SearchQuery::new(&raw) else {
        state
            .messenger
            .reply_html(inbound.origin, &formatter.clarify())
            .await?;
        return Ok(());
    };

    state.history.append(inbound.user_id, query.as_str()).await;
    state
        .orchestrator
        .search_and_reply(state.messenger.as_ref(), inbound.origin, &query)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{inbound, state_with, video, Sent};
    use super::*;
    use ytsb_core::domain::UserId;

    #[tokio::test]
    async fn trigger_message_searches_and_edits_placeholder() {
        let (state, messenger, provider) = state_with(vec![video("abc")]);

        handle_text(&state, &inbound(1, "ناصر أغنية حبيبي")).await.unwrap();

        assert_eq!(provider.queries(), vec!["أغنية حبيبي".to_string()]);
        let sent = messenger.sent();
        assert_eq!(sent.len(), 2);
        match (&sent[0], &sent[1]) {
            (Sent::Reply(placeholder, wait), Sent::Edit(edited, results)) => {
                assert_eq!(placeholder, edited);
                assert!(wait.contains("جاري البحث"));
                assert!(results.contains("watch?v=abc"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(
            state.history.recent(UserId(1)).await,
            vec!["أغنية حبيبي".to_string()]
        );
    }

    #[tokio::test]
    async fn bare_trigger_asks_for_a_query_without_searching() {
        let (state, messenger, provider) = state_with(vec![video("abc")]);

        handle_text(&state, &inbound(1, "ناصر")).await.unwrap();

        assert_eq!(provider.calls(), 0);
        assert!(state.history.recent(UserId(1)).await.is_empty());
        match messenger.sent().as_slice() {
            [Sent::Reply(_, html)] => assert!(html.contains("اكتب اسم الأغنية بعد")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn plain_text_gets_a_hint() {
        let (state, messenger, provider) = state_with(vec![video("abc")]);

        handle_text(&state, &inbound(2, "أغنية حبيبي")).await.unwrap();

        assert_eq!(provider.calls(), 0);
        assert_eq!(state.history.user_count().await, 1);
        match messenger.sent().as_slice() {
            [Sent::Reply(_, html)] => assert!(html.contains("للبحث عن أغنية")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_provider_result_shows_no_results_message() {
        let (state, messenger, _) = state_with(Vec::new());

        handle_text(&state, &inbound(1, "ناصر zzzz")).await.unwrap();

        match messenger.sent().last() {
            Some(Sent::Edit(_, html)) => {
                assert!(html.contains("لم أجد نتائج"));
                assert!(!html.contains("watch?v="));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn history_keeps_the_last_ten_queries() {
        let (state, _, _) = state_with(vec![video("abc")]);

        for i in 1..=11 {
            handle_text(&state, &inbound(3, &format!("ناصر song {i}")))
                .await
                .unwrap();
        }

        let recent = state.history.recent(UserId(3)).await;
        let expected: Vec<String> = (2..=11).map(|i| format!("song {i}")).collect();
        assert_eq!(recent, expected);
    }
}
