use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    domain::{MessageRef, SearchQuery, VideoResult},
    errors::Error,
    formatting::Formatter,
    messaging::port::MessagingPort,
    Result,
};

/// Maximum number of results requested from the provider and shown to users.
pub const RESULT_LIMIT: usize = 5;

/// Video-search backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Return up to `limit` results for `query` in provider order.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<VideoResult>>;
}

/// Result of one search round trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one and at most [`RESULT_LIMIT`] results.
    Found(Vec<VideoResult>),
    Empty,
    /// Detail is for logs only.
    ProviderFailure(String),
}

impl SearchOutcome {
    /// Map a provider list, clamping to `limit`. An empty list is `Empty`.
    pub fn from_results(mut results: Vec<VideoResult>, limit: usize) -> Self {
        results.truncate(limit);
        if results.is_empty() {
            Self::Empty
        } else {
            Self::Found(results)
        }
    }
}

/// Drives one search: provider call with a deadline, then placeholder edit.
pub struct SearchOrchestrator {
    provider: Arc<dyn SearchProvider>,
    formatter: Formatter,
    limit: usize,
    timeout: Duration,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn SearchProvider>, formatter: Formatter, timeout: Duration) -> Self {
        Self {
            provider,
            formatter,
            limit: RESULT_LIMIT,
            timeout,
        }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Issue exactly one provider call. Never fails; failures become values.
    pub async fn search(&self, query: &SearchQuery) -> SearchOutcome {
        let call = self.provider.search(query.as_str(), self.limit);
        let res = match tokio::time::timeout(self.timeout, call).await {
            Ok(res) => res,
            Err(_) => Err(Error::Timeout(self.timeout)),
        };

        match res {
            Ok(results) => {
                let outcome = SearchOutcome::from_results(results, self.limit);
                if let SearchOutcome::Found(found) = &outcome {
                    tracing::info!(query = %query, results = found.len(), "search finished");
                } else {
                    tracing::info!(query = %query, "search returned no results");
                }
                outcome
            }
            Err(e) => {
                tracing::error!(query = %query, error = %e, "search provider failed");
                SearchOutcome::ProviderFailure(e.to_string())
            }
        }
    }

    /// Two-phase reply: post a "searching" placeholder under `origin`, then
    /// replace it with the rendered outcome.
    ///
    /// Only a failure to post the placeholder is returned as an error; a
    /// failed edit is logged and the outcome still returned.
    pub async fn search_and_reply(
        &self,
        messenger: &dyn MessagingPort,
        origin: MessageRef,
        query: &SearchQuery,
    ) -> Result<SearchOutcome> {
        let pending = messenger
            .reply_html(origin, &self.formatter.searching(query.as_str()))
            .await?;

        let outcome = self.search(query).await;
        let html = self.formatter.format_outcome_within(
            &outcome,
            query.as_str(),
            &messenger.capabilities(),
        );

        if let Err(e) = messenger.edit_html(pending, &html).await {
            tracing::warn!(
                query = %query,
                chat_id = pending.chat_id.0,
                message_id = pending.message_id.0,
                error = %e,
                "failed to replace search placeholder"
            );
        }

        Ok(outcome)
    }
}
