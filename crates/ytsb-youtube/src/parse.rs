use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use ytsb_core::{domain::VideoResult, errors::Error, Result};

const SECTIONS_POINTER: &str =
    "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents";

fn initial_data_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)(?:var\s+ytInitialData|window\["ytInitialData"\])\s*=\s*(\{.+?\})\s*;\s*</script>"#,
        )
        .expect("valid regex")
    })
}

/// Parse a full results page into at most `limit` videos.
pub fn parse_results_page(html: &str, limit: usize) -> Result<Vec<VideoResult>> {
    let data = extract_initial_data(html)?;
    video_results(&data, limit)
}

/// Pull the `ytInitialData` JSON document out of a results page.
pub fn extract_initial_data(html: &str) -> Result<Value> {
    let json = initial_data_re()
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::Provider("ytInitialData not found in results page".to_string()))?;

    serde_json::from_str(json.as_str())
        .map_err(|e| Error::Provider(format!("ytInitialData is not valid json: {e}")))
}

/// Collect video entries in page order, skipping shelves, ads and channels.
pub fn video_results(data: &Value, limit: usize) -> Result<Vec<VideoResult>> {
    let sections = data
        .pointer(SECTIONS_POINTER)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Provider("unexpected results page layout".to_string()))?;

    let mut out = Vec::new();
    let items = sections
        .iter()
        .filter_map(|s| s.pointer("/itemSectionRenderer/contents"))
        .filter_map(Value::as_array)
        .flatten();

    for item in items {
        if out.len() >= limit {
            break;
        }
        let Some(raw) = item.get("videoRenderer") else {
            continue;
        };
        match VideoRenderer::deserialize(raw) {
            Ok(renderer) => out.push(renderer.into_result()),
            Err(e) => tracing::debug!(error = %e, "skipping malformed videoRenderer"),
        }
    }

    Ok(out)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoRenderer {
    video_id: String,
    title: Text,
    length_text: Option<Text>,
    owner_text: Option<Text>,
    long_byline_text: Option<Text>,
}

impl VideoRenderer {
    fn into_result(self) -> VideoResult {
        let channel = self
            .owner_text
            .or(self.long_byline_text)
            .map(|t| t.flatten())
            .unwrap_or_default();

        VideoResult {
            title: self.title.flatten(),
            duration: self
                .length_text
                .map(|t| t.flatten())
                .filter(|s| !s.trim().is_empty()),
            channel,
            id: self.video_id,
        }
    }
}

/// YouTube's formatted-text shape: either `simpleText` or a list of runs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Text {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<Run>,
}

#[derive(Debug, Deserialize)]
struct Run {
    text: String,
}

impl Text {
    fn flatten(self) -> String {
        match self.simple_text {
            Some(s) => s,
            None => self.runs.into_iter().map(|r| r.text).collect(),
        }
    }
}
