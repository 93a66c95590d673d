//! YouTube adapter (video search).
//!
//! Fetches the public results page and reads the embedded `ytInitialData`
//! document; no API key is needed.

use std::time::Duration;

use async_trait::async_trait;

use ytsb_core::{domain::VideoResult, errors::Error, search::SearchProvider, Result};

mod parse;

pub use parse::{extract_initial_data, parse_results_page, video_results};

const RESULTS_URL: &str = "https://www.youtube.com/results";
/// `sp` filter restricting results to videos.
const VIDEOS_ONLY_FILTER: &str = "EgIQAQ==";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Clone, Debug)]
pub struct YoutubeClient {
    http: reqwest::Client,
    results_url: String,
}

impl YoutubeClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_results_url(RESULTS_URL, timeout)
    }

    /// Point the client at a different results endpoint.
    pub fn with_results_url(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::External(format!("youtube http client build error: {e}")))?;
        Ok(Self {
            http,
            results_url: url.into(),
        })
    }
}

#[async_trait]
impl SearchProvider for YoutubeClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<VideoResult>> {
        tracing::debug!(query, limit, "youtube search request");

        let resp = self
            .http
            .get(&self.results_url)
            .query(&[("search_query", query), ("sp", VIDEOS_ONLY_FILTER)])
            .header(reqwest::header::ACCEPT_LANGUAGE, "ar,en;q=0.8")
            .send()
            .await
            .map_err(|e| Error::Provider(format!("youtube request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(Error::Provider(format!(
                "youtube search failed: {status}"
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::Provider(format!("youtube body read error: {e}")))?;

        parse_results_page(&body, limit)
    }
}
