//! Typed model of the Telegram Bot API wire format.
//!
//! Nominal identifiers ([`ids`]), the union decoding engine ([`decode`]),
//! the records and unions themselves ([`types`]), the response wrapper
//! ([`envelope`]) and outgoing calls ([`requests`]). Nothing here does I/O;
//! transports live in adapter crates.

pub mod config;
pub mod decode;
pub mod envelope;
pub mod errors;
pub mod ids;
pub mod logging;
pub mod requests;
pub mod types;

pub use errors::{Error, Result};
