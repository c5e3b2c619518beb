use async_trait::async_trait;
use serde_json::Value;

use tbm_core::{config::Config, errors::Error, Result};

/// Posts a JSON parameter object to a Bot API method and returns the raw
/// response body.
///
/// Implementations do not interpret the body: an HTTP 4xx still carries a
/// well-formed `{ok: false, ...}` envelope and is returned as text.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, method: &str, body: Value) -> Result<String>;
}

#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| Error::External(format!("http client build error: {e}")))?;
        Ok(Self {
            base_url: cfg.method_url(""),
            http,
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // base_url embeds the bot token
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, method: &str, body: Value) -> Result<String> {
        let resp = self
            .http
            .post(format!("{}{method}", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::External(format!("telegram request error ({method}): {}", e.without_url())))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::External(format!("telegram body error ({method}): {}", e.without_url())))?;

        tracing::debug!(method, %status, bytes = text.len(), "bot api response");

        if text.trim().is_empty() {
            return Err(Error::External(format!(
                "telegram returned an empty body for {method}: {status}"
            )));
        }
        Ok(text)
    }
}
