//! Command encoding implementation.

use std::io::{self, Write};

use super::IrcEncode;
use crate::command::serialize::write_command;
use crate::command::util::IoWriteSink;
use crate::command::Command;

impl IrcEncode for Command {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        write_command(&mut IoWriteSink(w), self, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chan::ChannelName;

    fn encode_cmd(cmd: Command) -> String {
        String::from_utf8(cmd.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_encode_has_no_line_ending() {
        assert_eq!(encode_cmd(Command::QUIT(None)), "QUIT");
    }

    #[test]
    fn test_encode_channel_mode_get() {
        let cmd = Command::ChannelMODEGET(ChannelName::new("#rust").unwrap());
        assert_eq!(encode_cmd(cmd), "MODE #rust");
    }

    #[test]
    fn test_encode_other_keeps_case() {
        let cmd = Command::Other("PASS".into(), vec!["hunter2".into()]);
        assert_eq!(encode_cmd(cmd), "PASS hunter2");
    }
}
