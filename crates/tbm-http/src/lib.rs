//! HTTP side of the Bot API model: a JSON transport, a typed call client and
//! the `getUpdates` long-poll loop.
//!
//! Everything here is a thin collaborator around `tbm-core`; decoding never
//! happens outside of it.

pub mod client;
pub mod poller;
pub mod transport;

pub use client::BotClient;
pub use poller::Poller;
pub use transport::{HttpTransport, Transport};
