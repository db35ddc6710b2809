//! IRC message codec for tokio.
//!
//! This module provides a codec that encodes and decodes IRC [`Message`] types
//! using the tokio codec framework.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::encode::IrcEncode;
use crate::error::{self, ParseError, ProtocolError};
use crate::line::LineFramer;
use crate::message::Message;
use crate::parser::parse_line;

/// Tokio codec for encoding/decoding IRC messages.
///
/// Each decoded item is the result for one line, so a malformed line shows
/// up as an `Err` item while the stream keeps going. Only I/O failures and
/// an exceeded line limit end the stream.
#[derive(Debug, Default)]
pub struct IrcCodec {
    framer: LineFramer,
    max_len: Option<usize>,
}

impl IrcCodec {
    /// Create a codec with no line length limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new codec with custom max line length.
    ///
    /// # Arguments
    /// * `max_len` - Maximum line length in bytes, terminator included
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            framer: LineFramer::new(),
            max_len: Some(max_len),
        }
    }

    fn check_len(&self, actual: usize) -> error::Result<()> {
        match self.max_len {
            Some(limit) if actual > limit => Err(ProtocolError::LineTooLong { actual, limit }),
            _ => Ok(()),
        }
    }
}

impl Decoder for IrcCodec {
    type Item = Result<Message, ParseError>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        while let Some(line) = self.framer.next_line(src) {
            self.check_len(line.len())?;
            if let Some(result) = parse_line(&line) {
                return Ok(Some(result));
            }
        }
        // Check if partial line already exceeds limit
        self.check_len(src.len())?;
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        match self.decode(src)? {
            Some(item) => Ok(Some(item)),
            None => {
                if !src.is_empty() {
                    tracing::debug!(bytes = src.len(), "dropping unterminated line at end of stream");
                    src.clear();
                    self.framer.reset();
                }
                Ok(None)
            }
        }
    }
}

impl Encoder<Message> for IrcCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        <Self as Encoder<&Message>>::encode(self, &msg, dst)
    }
}

impl Encoder<&Message> for IrcCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: &Message, dst: &mut BytesMut) -> error::Result<()> {
        // Encode to scratch space first so a rejected message leaves no bytes.
        let mut line = Vec::with_capacity(128);
        msg.encode(&mut line)?;
        dst.put_slice(&line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::nick::NickName;

    #[test]
    fn test_decode_complete_line() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::from("PING :test\r\n");

        let result = codec.decode(&mut buf).unwrap().unwrap().unwrap();
        assert_eq!(result.command, Command::PING("test".into(), None));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::from("PING :");

        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_bad_line_is_an_item() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::from("NICK\r\nNICK ok\r\n");

        let first = codec.decode(&mut buf).unwrap().unwrap();
        assert!(first.is_err());
        let second = codec.decode(&mut buf).unwrap().unwrap().unwrap();
        assert_eq!(second.command, Command::NICK(NickName::new("ok").unwrap()));
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::from("\r\n\r\n");
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_too_long() {
        let mut codec = IrcCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\n");

        let result = codec.decode(&mut buf);
        assert!(matches!(result, Err(ProtocolError::LineTooLong { .. })));

        let mut codec = IrcCodec::with_max_len(10);
        let mut buf = BytesMut::from("no line feed in sight");
        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::LineTooLong { .. })
        ));
    }

    #[test]
    fn test_decode_eof_drops_partial() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::from("PING :half");
        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_encode() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::new();

        codec.encode(Message::pong("test"), &mut buf).unwrap();
        assert_eq!(&buf[..], b"PONG :test\r\n");
    }

    #[test]
    fn test_encode_rejects_line_break() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::new();

        let msg = Message::from(Command::QUIT(Some("bye\r\nJOIN #x".into())));
        assert!(matches!(
            codec.encode(msg, &mut buf),
            Err(ProtocolError::Io(_))
        ));
        assert!(buf.is_empty());
    }
}
