use std::fmt::{self, Display, Formatter};

use super::types::Message;
use crate::command::serialize::write_command;
use crate::command::util::{validate_param, IrcSink};

/// Writes a full line, CRLF included.
pub(crate) fn write_message<S: IrcSink>(sink: &mut S, msg: &Message) -> Result<usize, S::Error> {
    let mut written = 0;
    if let Some(origin) = msg.origin.as_deref().filter(|o| !o.is_empty()) {
        validate_param(sink, origin)?;
        if origin.contains(' ') {
            return Err(sink.return_error("origin contains a space"));
        }
        written += sink.write_char(':')?;
        written += sink.write_str(origin)?;
        written += sink.write_char(' ')?;
    }
    written += write_command(sink, &msg.command, msg.target.as_deref())?;
    written += sink.write_str("\r\n")?;
    Ok(written)
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_message(f, self).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use crate::command::Command;
    use crate::message::Message;
    use crate::response::Response;

    #[test]
    fn origin_only_when_non_empty() {
        let msg = Message::pong("srv").with_origin("");
        assert_eq!(msg.to_string(), "PONG :srv\r\n");
        let msg = Message::pong("srv").with_origin("me!u@h");
        assert_eq!(msg.to_string(), ":me!u@h PONG :srv\r\n");
    }

    #[test]
    fn target_follows_command_token() {
        let msg = Message::from(Command::Response(
            Response::RPL_WELCOME,
            vec!["Welcome to the net".into()],
        ))
        .with_origin("irc.example")
        .with_target("alice");
        assert_eq!(msg.to_string(), ":irc.example 001 alice :Welcome to the net\r\n");
    }
}
