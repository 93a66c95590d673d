use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    errors::Error, intent::DEFAULT_TRIGGER_WORD,
    messaging::types::TELEGRAM_MAX_MESSAGE_LEN, Result,
};

const DEFAULT_LOG_FILE: &str = "bot.log";

/// Typed configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub trigger_word: String,
    pub search_timeout: Duration,
    pub log_file: PathBuf,
    pub telegram_message_limit: usize,
}

impl Config {
    /// Load from `.env` (if present) and the process environment.
    pub fn load() -> Result<Self> {
        load_dotenv(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing token is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("TELEGRAM_TOKEN")
            .and_then(non_empty)
            .or_else(|| lookup("TELEGRAM_BOT_TOKEN").and_then(non_empty))
            .ok_or_else(|| {
                Error::Config("TELEGRAM_TOKEN environment variable is required".to_string())
            })?;

        let trigger_word = lookup("TRIGGER_WORD")
            .and_then(non_empty)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_TRIGGER_WORD.to_string());

        let search_timeout = Duration::from_millis(
            parse_trimmed::<u64>(lookup("SEARCH_TIMEOUT_MS"))
                .filter(|ms| *ms > 0)
                .unwrap_or(15_000),
        );

        let log_file = log_file_from_lookup(&lookup);

        let telegram_message_limit = parse_trimmed::<usize>(lookup("TELEGRAM_MESSAGE_LIMIT"))
            .filter(|n| *n > 0)
            .unwrap_or(TELEGRAM_MAX_MESSAGE_LEN);

        Ok(Self {
            telegram_bot_token: telegram_bot_token.trim().to_string(),
            trigger_word,
            search_timeout,
            log_file,
            telegram_message_limit,
        })
    }
}

/// Log file path from the process environment.
///
/// Used to bring logging up before the full [`Config`] is loaded; resolves
/// exactly like [`Config::log_file`].
pub fn log_file_from_env() -> PathBuf {
    log_file_from_lookup(|key| env::var(key).ok())
}

/// `LOG_FILE`, or `bot.log` when unset or blank.
fn log_file_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup("LOG_FILE")
        .and_then(non_empty)
        .map(|s| PathBuf::from(s.trim()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

/// Export `KEY=value` lines from `path` into the environment without
/// overriding variables that are already set. A missing file is ignored.
pub fn load_dotenv(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim().trim_start_matches("export ").trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_trimmed<T: std::str::FromStr>(v: Option<String>) -> Option<T> {
    v.and_then(|s| s.trim().parse::<T>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
