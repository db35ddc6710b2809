//! Client-level errors.
//!
//! [`ClientError`] is what completions, delegate callbacks and the
//! [`ClientState::Error`](crate::ClientState::Error) state carry. Causes are
//! kept behind `Arc` so the error can be cloned into every place that needs it.

use std::io;
use std::sync::Arc;

use ircwire_proto::ProtocolError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors reported by the client.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Writing to the link failed.
    #[error("write failed: {0}")]
    Write(Arc<ProtocolError>),

    /// The client is not connected, or the link closed before the write ran.
    #[error("client stopped")]
    Stopped,

    /// Internal bookkeeping disagreed with the connection state.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(&'static str),

    /// Input arrived that makes no sense in the current state.
    #[error("unexpected input: {0}")]
    UnexpectedInput(String),

    /// The link failed while reading.
    #[error("channel error: {0}")]
    Channel(Arc<ProtocolError>),

    /// The transport could not be established.
    #[error("connect failed: {0}")]
    Connect(Arc<io::Error>),

    /// The server answered registration with an error reply.
    #[error("registration failed with {0:03}")]
    RegistrationFailed(u16),

    /// The options could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(Arc<ConfigError>),
}

impl ClientError {
    /// A static label for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Write(_) => "write",
            Self::Stopped => "stopped",
            Self::InternalInconsistency(_) => "internal_inconsistency",
            Self::UnexpectedInput(_) => "unexpected_input",
            Self::Channel(_) => "channel",
            Self::Connect(_) => "connect",
            Self::RegistrationFailed(_) => "registration_failed",
            Self::Config(_) => "config",
        }
    }
}

impl From<ConfigError> for ClientError {
    fn from(e: ConfigError) -> Self {
        Self::Config(Arc::new(e))
    }
}

impl From<io::Error> for ClientError {
    fn from(e: io::Error) -> Self {
        Self::Connect(Arc::new(e))
    }
}
