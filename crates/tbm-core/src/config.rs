use std::{collections::HashMap, env, fmt, fs, io, path::Path, time::Duration};

use crate::{errors::Error, types::UpdateKind, Result};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Typed configuration, read from the environment (and `.env` if present).
#[derive(Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub api_url: String,

    // HTTP
    pub request_timeout: Duration,
    pub max_retries: u32,

    // Long polling
    pub poll_timeout: Duration,
    pub poll_limit: u8,
    pub allowed_updates: Vec<String>,
}

impl Config {
    /// Process environment first, then `./.env`.
    pub fn load() -> Result<Self> {
        let dotenv = read_dotenv(Path::new(".env"))?;
        Self::from_lookup(|key| env::var(key).ok().or_else(|| dotenv.get(key).cloned()))
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let api_url = lookup("TELEGRAM_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout =
            Duration::from_secs(parse_u64(&lookup, "REQUEST_TIMEOUT_SECS")?.unwrap_or(30));
        let poll_timeout =
            Duration::from_secs(parse_u64(&lookup, "POLL_TIMEOUT_SECS")?.unwrap_or(25));
        if poll_timeout >= request_timeout {
            return Err(Error::Config(format!(
                "POLL_TIMEOUT_SECS ({}) must be shorter than REQUEST_TIMEOUT_SECS ({})",
                poll_timeout.as_secs(),
                request_timeout.as_secs()
            )));
        }

        // Server accepts 1..=100
        let poll_limit = parse_u64(&lookup, "POLL_LIMIT")?
            .unwrap_or(100)
            .clamp(1, 100) as u8;

        let allowed_updates = parse_csv_lower(lookup("ALLOWED_UPDATES"));
        let known = UpdateKind::table().keys();
        if let Some(unknown) = allowed_updates.iter().find(|u| !known.contains(&u.as_str())) {
            return Err(Error::Config(format!(
                "ALLOWED_UPDATES contains unknown update kind `{unknown}`"
            )));
        }

        let max_retries = parse_u64(&lookup, "MAX_RETRIES")?
            .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX));

        Ok(Self {
            telegram_bot_token,
            api_url,
            request_timeout,
            max_retries,
            poll_timeout,
            poll_limit,
            allowed_updates,
        })
    }

    /// `<api_url>/bot<token>/<method>`.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_url, self.telegram_bot_token)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram_bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .field("poll_timeout", &self.poll_timeout)
            .field("poll_limit", &self.poll_limit)
            .field("allowed_updates", &self.allowed_updates)
            .finish()
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a non-negative integer, got `{raw}`")))
}

fn parse_csv_lower(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// `KEY=value` pairs from a dotenv file; a missing file has none.
fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse_dotenv(&text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(e.into()),
    }
}

fn parse_dotenv(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.strip_prefix("export ").unwrap_or(line).split_once('='))
        .map(|(k, v)| (k.trim(), unquote(v.trim())))
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn unquote(v: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| v.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(v)
}
