//! Encoding straight into byte buffers.
//!
//! This module provides the [`IrcEncode`] trait for writing IRC messages directly
//! to byte buffers without intermediate `String` allocations. `Display` on
//! [`Message`](crate::Message) produces the same bytes.
//!
//! # Example
//!
//! ```
//! use ircwire_proto::encode::IrcEncode;
//! use ircwire_proto::{ChannelName, Message};
//!
//! let msg = Message::privmsg(ChannelName::new("#channel").unwrap(), "Hello!");
//! let mut buf = Vec::new();
//! msg.encode(&mut buf).unwrap();
//!
//! assert_eq!(&buf, b"PRIVMSG #channel :Hello!\r\n");
//! ```

use std::io::{self, Write};

mod command;
mod message;

/// A trait for encoding IRC protocol elements directly to a byte stream.
///
/// # Implementors
///
/// - [`Message`](crate::Message), a full CRLF-terminated line
/// - [`Command`](crate::Command), without origin, target or line ending
pub trait IrcEncode {
    /// Encode this value to the given writer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the write fails, or `InvalidInput` if an
    /// argument could not be read back (a middle argument with a space, or
    /// any argument containing CR, LF or NUL).
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<usize>;

    /// Encode this value to a new `Vec<u8>`.
    ///
    /// # Errors
    ///
    /// Fails like [`encode`](Self::encode); no partial line is returned.
    fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(512); // IRC max line length
        self.encode(&mut buf)?;
        Ok(buf)
    }
}
