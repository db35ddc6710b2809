//! Encoding implementation for full messages.

use std::io::{self, Write};

use super::IrcEncode;
use crate::command::util::IoWriteSink;
use crate::message::{write_message, Message};

impl IrcEncode for Message {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        write_message(&mut IoWriteSink(w), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    #[test]
    fn test_encode_target_and_origin() {
        let msg = Message::from(Command::OtherNumeric(999, vec!["x".into()]))
            .with_origin("srv")
            .with_target("me");
        assert_eq!(msg.to_bytes().unwrap(), b":srv 999 me x\r\n");
    }

    #[test]
    fn test_encode_rejects_spaced_target() {
        let msg = Message::pong("s").with_target("a b");
        assert!(msg.encode(&mut Vec::new()).is_err());
    }
}
