use anyhow::Context;
use tokio_util::sync::CancellationToken;

use tbm_core::{config::Config, requests::GetMe, types::Update};
use tbm_http::{BotClient, HttpTransport, Poller};

#[tokio::main]
async fn main() -> Result<(), tbm_core::Error> {
    tbm_core::logging::init("tbm")?;

    let cfg = Config::load()?;
    tracing::debug!(?cfg, "config loaded");

    run(cfg)
        .await
        .map_err(|e| tbm_core::Error::External(format!("tbm failed: {e:#}")))?;

    Ok(())
}

async fn run(cfg: Config) -> anyhow::Result<()> {
    let transport = HttpTransport::new(&cfg).context("building http transport")?;
    let client = BotClient::from_config(transport, &cfg);

    let me = client
        .execute(&GetMe::default())
        .await
        .context("getMe failed; check TELEGRAM_BOT_TOKEN")?;
    tracing::info!(bot = %me.display_name(), id = %me.id, "connected");

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler failed");
        }
        tracing::info!("shutting down");
        on_signal.cancel();
    });

    let mut poller = Poller::new(&client, &cfg);
    poller
        .run(cancel, |update| async move {
            tracing::info!("{}", describe(&update));
        })
        .await
        .context("polling failed")?;

    Ok(())
}

/// `update:<id> kind=<variant> chat=<chat id>`
fn describe(update: &Update) -> String {
    let chat = update
        .chat()
        .map(|c| c.id.get().to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{} kind={} chat={chat}", update.id, update.kind.variant_name())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tbm_core::decode::FromWire;

    use super::*;

    #[test]
    fn describe_names_id_kind_and_chat() {
        let update = Update::from_wire(json!({
            "update_id": 9,
            "message": {"message_id": 1, "date": 1, "chat": {"id": -100, "type": "group", "title": "g"}}
        }))
        .unwrap();
        assert_eq!(describe(&update), "update:9 kind=Message chat=-100");

        let update = Update::from_wire(json!({
            "update_id": 10,
            "inline_query": {"id": "q", "from": {"id": 1, "is_bot": false, "first_name": "A"},
                "query": "", "offset": ""}
        }))
        .unwrap();
        assert_eq!(describe(&update), "update:10 kind=InlineQuery chat=-");
    }
}
