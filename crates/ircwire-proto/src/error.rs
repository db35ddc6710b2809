//! Error types for the protocol layer.
//!
//! [`ParseError`] is scoped to a single line: the parser reports it and moves
//! on to the next line. [`ProtocolError`] is fatal to a framed stream.

use bytes::Bytes;
use thiserror::Error;

/// Convenience alias for results of codec operations.
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

fn lossy(raw: &Bytes) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(raw)
}

/// Why a single line could not be turned into a [`Message`](crate::Message).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The line starts with `:` but has no origin before the first space.
    #[error("invalid prefix in line {:?}", lossy(.0))]
    InvalidPrefix(Bytes),

    /// The command token is neither three digits nor a run of letters.
    #[error("invalid command in line {:?}", lossy(.0))]
    InvalidCommand(Bytes),

    /// More than [`MAX_ARGUMENTS`](crate::parser::MAX_ARGUMENTS) arguments.
    #[error("too many arguments in line {:?}", lossy(.0))]
    TooManyArguments(Bytes),

    /// An argument, origin or command is not valid UTF-8.
    #[error("invalid UTF-8 argument in line {:?}", lossy(.0))]
    InvalidArgument(Bytes),

    /// The command received the wrong number of arguments.
    #[error("{command}: got {got} arguments, expected {expected}")]
    InvalidArgumentCount {
        /// The command token.
        command: String,
        /// Arguments received.
        got: usize,
        /// The violated bound.
        expected: usize,
    },

    /// A mask argument could not be used.
    #[error("{command}: invalid mask {mask:?}")]
    InvalidMask {
        /// The command token.
        command: String,
        /// The offending mask.
        mask: String,
    },

    /// A channel name failed validation.
    #[error("invalid channel name: {0}")]
    InvalidChannelName(String),

    /// A nickname failed validation.
    #[error("invalid nickname: {0}")]
    InvalidNickName(String),

    /// A server name failed validation.
    #[error("invalid server name: {0}")]
    InvalidServerName(String),

    /// A message target is neither a channel, a nickname nor `*`.
    #[error("invalid message target: {0}")]
    InvalidMessageTarget(String),

    /// Unknown CAP sub-command.
    #[error("invalid CAP sub-command: {0}")]
    InvalidCapCommand(String),

    /// A byte that cannot start an argument, such as a stray CR.
    #[error("syntax error")]
    SyntaxError,
}

/// Fatal errors on a framed IRC stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line grew beyond the configured limit without a line feed.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong {
        /// Bytes buffered so far.
        actual: usize,
        /// Configured limit.
        limit: usize,
    },
}

impl ProtocolError {
    /// Whether the encoder refused a message.
    ///
    /// Nothing is written for a refused message, so the stream stays usable.
    pub fn is_invalid_message(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::InvalidInput)
    }
}
