use tokio::time::sleep;

use tbm_core::{
    config::Config,
    decode::decode_str,
    envelope::CallResult,
    requests::Request,
    Result,
};

use crate::transport::Transport;

/// Typed Bot API calls over a [`Transport`].
pub struct BotClient<T> {
    transport: T,
    max_retries: u32,
}

impl<T: Transport> BotClient<T> {
    pub fn new(transport: T, max_retries: u32) -> Self {
        Self {
            transport,
            max_retries,
        }
    }

    pub fn from_config(transport: T, cfg: &Config) -> Self {
        Self::new(transport, cfg.max_retries)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One round trip. A server-side failure is `Ok(CallResult::Failure)`.
    pub async fn call<R>(&self, request: &R) -> Result<CallResult<R::Response>>
    where
        R: Request + Sync,
    {
        let body = serde_json::to_value(request)?;
        let text = self.transport.post_json(R::METHOD, body).await?;
        let result = decode_str::<CallResult<R::Response>>(&text)?;
        if let CallResult::Failure(f) = &result {
            tracing::debug!(method = R::METHOD, failure = %f, "bot api call failed");
        }
        Ok(result)
    }

    /// Like [`call`](Self::call), but waits out `retry_after` up to
    /// `max_retries` times.
    pub async fn call_with_retry<R>(&self, request: &R) -> Result<CallResult<R::Response>>
    where
        R: Request + Sync,
    {
        let mut attempts = 0u32;
        loop {
            let result = self.call(request).await?;
            match result.retry_after() {
                Some(wait) if attempts < self.max_retries => {
                    attempts += 1;
                    tracing::warn!(
                        method = R::METHOD,
                        wait_secs = wait.get(),
                        attempt = attempts,
                        "flood wait; retrying"
                    );
                    sleep(wait.as_duration()).await;
                }
                _ => return Ok(result),
            }
        }
    }

    /// Retrying call that lifts a remote failure into [`tbm_core::Error::Api`].
    pub async fn execute<R>(&self, request: &R) -> Result<R::Response>
    where
        R: Request + Sync,
    {
        Ok(self.call_with_retry(request).await?.into_result()?)
    }
}
