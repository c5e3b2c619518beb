use crate::{decode::DecodeError, envelope::ApiFailure};

/// Workspace error type.
///
/// Adapter crates (transport, binaries) map their specific errors into this
/// type. Remote failures reported by the Bot API are *not* errors at the
/// decoding layer: they arrive as `CallResult::Failure` and only become
/// `Error::Api` when a caller lifts them deliberately.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("api error: {0}")]
    Api(#[from] ApiFailure),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
