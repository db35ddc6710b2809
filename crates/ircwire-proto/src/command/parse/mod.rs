//! Building commands from a command token and raw arguments.

mod channel;
mod connection;
mod messaging;
mod user;

use super::types::Command;
use crate::chan::ChannelName;
use crate::error::ParseError;
use crate::recipient::Recipient;
use crate::response::Response;

/// Fails unless exactly `n` arguments were given.
pub(super) fn expect_exactly<S>(command: &str, args: &[S], n: usize) -> Result<(), ParseError> {
    expect_between(command, args, n, n)
}

/// Fails unless `min..=max` arguments were given.
///
/// The reported expectation is the bound that was violated.
pub(super) fn expect_between<S>(
    command: &str,
    args: &[S],
    min: usize,
    max: usize,
) -> Result<(), ParseError> {
    let got = args.len();
    if got < min || got > max {
        return Err(ParseError::InvalidArgumentCount {
            command: command.to_owned(),
            got,
            expected: if got < min { min } else { max },
        });
    }
    Ok(())
}

pub(super) fn split_channels(s: &str) -> Result<Vec<ChannelName>, ParseError> {
    s.split(',').map(str::parse).collect()
}

pub(super) fn split_recipients(s: &str) -> Result<Vec<Recipient>, ParseError> {
    s.split(',').map(str::parse).collect()
}

fn owned<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter().map(|s| s.as_ref().to_owned()).collect()
}

impl Command {
    /// Builds a command from its token and arguments.
    ///
    /// The token is matched case-insensitively. A three digit token is
    /// treated as a numeric reply. Unknown named commands become
    /// [`Command::Other`].
    ///
    /// ```
    /// use ircwire_proto::Command;
    ///
    /// let cmd = Command::from_text("nick", &["alice"]).unwrap();
    /// assert_eq!(cmd.name(), "NICK");
    /// assert!(Command::from_text("NICK", &["a", "b"]).is_err());
    /// ```
    pub fn from_text<S: AsRef<str>>(command: &str, args: &[S]) -> Result<Command, ParseError> {
        if command.len() == 3 && command.bytes().all(|b| b.is_ascii_digit()) {
            let code = command
                .parse()
                .map_err(|_| ParseError::InvalidCommand(command.to_owned().into()))?;
            return Ok(Command::from_numeric(code, args));
        }

        let upper = command.to_ascii_uppercase();
        let name = upper.as_str();
        match name {
            "NICK" | "USER" | "QUIT" | "PING" | "PONG" | "CAP" => connection::parse(name, args),
            "JOIN" | "PART" | "LIST" | "MODE" => channel::parse(name, args),
            "PRIVMSG" | "NOTICE" | "ISON" => messaging::parse(name, args),
            "WHOIS" | "WHO" => user::parse(name, args),
            _ => Ok(Command::Other(upper, owned(args))),
        }
    }

    /// Builds a numeric reply. Codes outside the reply table are kept as
    /// [`Command::OtherNumeric`].
    pub fn from_numeric<S: AsRef<str>>(code: u16, args: &[S]) -> Command {
        match Response::from_code(code) {
            Some(response) => Command::Response(response, owned(args)),
            None => Command::OtherNumeric(code, owned(args)),
        }
    }
}
