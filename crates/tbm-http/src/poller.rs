use std::{future::Future, time::Duration};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use tbm_core::{
    config::Config,
    decode::FromWire,
    ids::UpdateId,
    requests::GetUpdates,
    types::Update,
    Result,
};

use crate::{client::BotClient, transport::Transport};

const TRANSPORT_BACKOFF: Duration = Duration::from_secs(3);

/// `getUpdates` long-poll loop.
///
/// Each update in a batch is decoded on its own. One the crate can't decode
/// is logged and skipped, and the offset still moves past its `update_id` so
/// the server doesn't resend it forever. An entry whose `update_id` can't be
/// read at all can't move the offset; later entries in the same batch still
/// do, and a batch made only of such entries is requested again.
pub struct Poller<'a, T> {
    client: &'a BotClient<T>,
    offset: Option<UpdateId>,
    timeout_secs: u32,
    limit: u8,
    allowed_updates: Vec<String>,
}

impl<'a, T: Transport> Poller<'a, T> {
    pub fn new(client: &'a BotClient<T>, cfg: &Config) -> Self {
        Self {
            client,
            offset: None,
            timeout_secs: u32::try_from(cfg.poll_timeout.as_secs()).unwrap_or(u32::MAX),
            limit: cfg.poll_limit,
            allowed_updates: cfg.allowed_updates.clone(),
        }
    }

    /// Next `update_id` the server will be asked for.
    pub fn offset(&self) -> Option<UpdateId> {
        self.offset
    }

    fn advance(&mut self, seen: UpdateId) {
        let next = UpdateId::new(seen.get().saturating_add(1));
        if self.offset.map_or(true, |cur| next > cur) {
            self.offset = Some(next);
        }
    }

    /// One `getUpdates` round trip. Returns the updates that decoded.
    pub async fn poll_once(&mut self) -> Result<Vec<Update>> {
        let request = GetUpdates {
            offset: self.offset,
            limit: Some(self.limit),
            timeout: Some(self.timeout_secs),
            allowed_updates: self.allowed_updates.clone(),
        };
        let batch = self.client.execute(&request).await?;

        let mut updates = Vec::with_capacity(batch.len());
        for raw in batch {
            let peeked = Update::peek_id(&raw);
            match peeked {
                Some(id) => self.advance(id),
                None => tracing::warn!("update without a readable update_id; offset not moved"),
            }
            match Update::from_wire(raw) {
                Ok(update) => updates.push(update),
                Err(e) if e.is_protocol_skew() => {
                    tracing::warn!(update_id = ?peeked.map(|id| id.get()), error = %e, "skipping unknown update");
                }
                Err(e) => {
                    tracing::error!(update_id = ?peeked.map(|id| id.get()), error = %e, "skipping malformed update");
                }
            }
        }
        Ok(updates)
    }

    /// Poll until `cancel` fires, handing every decoded update to `handle`.
    ///
    /// Transport errors are logged and retried after a short backoff; a
    /// failure reported by the server (bad token, webhook set, ...) ends the
    /// loop with an error.
    pub async fn run<F, Fut>(&mut self, cancel: CancellationToken, mut handle: F) -> Result<()>
    where
        F: FnMut(Update) -> Fut,
        Fut: Future<Output = ()>,
    {
        tracing::info!(limit = self.limit, timeout_secs = self.timeout_secs, "polling started");
        loop {
            let polled = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                res = self.poll_once() => res,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        handle(update).await;
                    }
                }
                Err(tbm_core::Error::External(e)) => {
                    tracing::warn!(error = %e, "getUpdates transport error; backing off");
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = sleep(TRANSPORT_BACKOFF) => {}
                    }
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(offset = ?self.offset.map(|o| o.get()), "polling stopped");
        Ok(())
    }
}
