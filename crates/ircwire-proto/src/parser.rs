//! Incremental message parser.
//!
//! [`MessageParser`] takes raw bytes as they come off the socket and yields
//! one result per non-empty line. A malformed line produces one
//! [`ParseError`] and parsing carries on with the next line.
//!
//! ```
//! use ircwire_proto::{Command, MessageParser};
//!
//! let mut parser = MessageParser::new();
//! assert_eq!(parser.feed(b"PING :irc.").count(), 0);
//!
//! let msg = parser.feed(b"example\r\n").next().unwrap().unwrap();
//! assert_eq!(msg.command, Command::PING("irc.example".into(), None));
//! ```

use std::str;

use bytes::{Bytes, BytesMut};
use smallvec::SmallVec;

use crate::command::Command;
use crate::error::ParseError;
use crate::line::{trim_line_ending, LineFramer};
use crate::message::Message;

/// Most arguments a single line may carry.
pub const MAX_ARGUMENTS: usize = 15;

/// Stateful byte-stream parser for one connection.
#[derive(Debug, Default)]
pub struct MessageParser {
    buffer: BytesMut,
    framer: LineFramer,
}

impl MessageParser {
    /// Create a parser with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `bytes` and return the lines they complete.
    ///
    /// Lines are parsed lazily as the iterator is advanced. Whatever is not
    /// consumed stays buffered for the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> Messages<'_> {
        self.buffer.extend_from_slice(bytes);
        Messages { parser: self }
    }

    /// Bytes held back waiting for a line feed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any partial line, e.g. after the connection was reset.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.framer.reset();
    }
}

/// Lazy results of one [`MessageParser::feed`] call.
#[derive(Debug)]
pub struct Messages<'a> {
    parser: &'a mut MessageParser,
}

impl Iterator for Messages<'_> {
    type Item = Result<Message, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let MessageParser { buffer, framer } = &mut *self.parser;
        while let Some(line) = framer.next_line(buffer) {
            if let Some(result) = parse_line(&line) {
                return Some(result);
            }
        }
        None
    }
}

/// Bytes that may appear in a middle argument: anything but NUL, CR, LF,
/// space and colon.
#[inline]
fn is_middle_byte(b: u8) -> bool {
    !matches!(b, 0 | b'\r' | b'\n' | b' ' | b':')
}

/// Parse one line, with or without its terminator.
///
/// Returns `None` for an empty line.
pub fn parse_line(line: &[u8]) -> Option<Result<Message, ParseError>> {
    let line = trim_line_ending(line);
    if line.is_empty() {
        return None;
    }
    Some(parse_nonempty(line))
}

fn utf8<'a>(bytes: &'a [u8], line: &[u8]) -> Result<&'a str, ParseError> {
    str::from_utf8(bytes).map_err(|_| ParseError::InvalidArgument(Bytes::copy_from_slice(line)))
}

fn parse_nonempty(line: &[u8]) -> Result<Message, ParseError> {
    let raw = || Bytes::copy_from_slice(line);

    let mut rest = line;
    let mut origin = None;
    if let Some(after) = rest.strip_prefix(b":") {
        match after.iter().position(|&b| b == b' ') {
            Some(end) if end > 0 => {
                origin = Some(utf8(&after[..end], line)?);
                rest = &after[end..];
                while let [b' ', tail @ ..] = rest {
                    rest = tail;
                }
            }
            _ => return Err(ParseError::InvalidPrefix(raw())),
        }
    }

    let len = if rest.len() >= 3 && rest[..3].iter().all(u8::is_ascii_digit) {
        3
    } else {
        rest.iter().take_while(|b| b.is_ascii_alphabetic()).count()
    };
    if len == 0 || rest.get(len).is_some_and(|&b| b != b' ') {
        return Err(ParseError::InvalidCommand(raw()));
    }
    let command = utf8(&rest[..len], line)?;
    rest = &rest[len..];

    let mut args: SmallVec<[&str; MAX_ARGUMENTS]> = SmallVec::new();
    loop {
        while let [b' ', tail @ ..] = rest {
            rest = tail;
        }
        if rest.is_empty() {
            break;
        }
        if args.len() == MAX_ARGUMENTS {
            return Err(ParseError::TooManyArguments(raw()));
        }
        let (arg, tail) = match rest {
            [b':', trailing @ ..] => (trailing, &[][..]),
            _ => {
                let end = rest
                    .iter()
                    .position(|&b| !is_middle_byte(b))
                    .unwrap_or(rest.len());
                if end == 0 {
                    return Err(ParseError::SyntaxError);
                }
                rest.split_at(end)
            }
        };
        args.push(utf8(arg, line)?);
        rest = tail;
    }

    let command = Command::from_text(command, &args[..])?;
    Ok(Message {
        origin: origin.map(str::to_owned),
        target: None,
        command,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chan::ChannelName;
    use crate::nick::NickName;
    use crate::recipient::Recipient;
    use crate::response::Response;

    fn parse(s: &str) -> Result<Message, ParseError> {
        parse_line(s.as_bytes()).expect("non-empty line")
    }

    fn collect(parser: &mut MessageParser, bytes: &[u8]) -> Vec<Result<Message, ParseError>> {
        parser.feed(bytes).collect()
    }

    #[test]
    fn parses_origin_command_and_trailing() {
        let msg = parse(":alice!a@host PRIVMSG #rust :hello there").unwrap();
        assert_eq!(msg.origin.as_deref(), Some("alice!a@host"));
        assert_eq!(msg.target, None);
        assert_eq!(
            msg.command,
            Command::PRIVMSG(
                vec![Recipient::Channel(ChannelName::new("#rust").unwrap())],
                "hello there".into()
            )
        );
    }

    #[test]
    fn numeric_commands() {
        let msg = parse(":srv 001 me :Welcome").unwrap();
        assert_eq!(
            msg.command,
            Command::Response(Response::RPL_WELCOME, vec!["me".into(), "Welcome".into()])
        );
        assert!(matches!(
            parse("0012 x"),
            Err(ParseError::InvalidCommand(_))
        ));
    }

    #[test]
    fn bad_prefix() {
        assert!(matches!(parse(": NICK a"), Err(ParseError::InvalidPrefix(_))));
        assert!(matches!(parse(":lonely"), Err(ParseError::InvalidPrefix(_))));
    }

    #[test]
    fn bad_command_token() {
        assert!(matches!(parse("N1CK a"), Err(ParseError::InvalidCommand(_))));
        assert!(matches!(parse("#x a"), Err(ParseError::InvalidCommand(_))));
        assert!(matches!(parse("12 a"), Err(ParseError::InvalidCommand(_))));
    }

    #[test]
    fn repeated_spaces_between_arguments() {
        let msg = parse("NICK    bob  ").unwrap();
        assert_eq!(msg.command, Command::NICK(NickName::new("bob").unwrap()));
    }

    #[test]
    fn repeated_spaces_after_origin() {
        let msg = parse(":srv  NOTICE me :hi").unwrap();
        assert_eq!(msg.origin.as_deref(), Some("srv"));
        assert_eq!(msg.command.name(), "NOTICE");
        assert_eq!(msg.command.arguments(), ["me", "hi"]);

        assert!(matches!(parse(":srv   "), Err(ParseError::InvalidCommand(_))));
    }

    #[test]
    fn argument_limit() {
        let fifteen = format!("FOO {}", vec!["a"; 15].join(" "));
        assert!(parse(&fifteen).is_ok());
        let sixteen = format!("FOO {}", vec!["a"; 16].join(" "));
        assert!(matches!(parse(&sixteen), Err(ParseError::TooManyArguments(_))));
    }

    #[test]
    fn invalid_utf8_argument() {
        let result = parse_line(b"PRIVMSG bob :\xff\xfe\r\n").unwrap();
        assert!(matches!(result, Err(ParseError::InvalidArgument(_))));
    }

    #[test]
    fn nul_in_middle_argument_is_syntax_error() {
        let result = parse_line(b"FOO a\0b").unwrap();
        assert_eq!(result, Err(ParseError::SyntaxError));
    }

    #[test]
    fn empty_lines_are_skipped() {
        let mut parser = MessageParser::new();
        let out = collect(&mut parser, b"\r\n\nPING :x\r\n\r\n");
        assert_eq!(out.len(), 1);
        assert!(out[0].is_ok());
    }

    #[test]
    fn resumes_at_every_split_point() {
        let whole = b"NICK a\r\n";
        for split in 0..=whole.len() {
            let mut parser = MessageParser::new();
            let mut out = collect(&mut parser, &whole[..split]);
            out.extend(collect(&mut parser, &whole[split..]));
            assert_eq!(out.len(), 1, "split at {split}");
            assert_eq!(
                out[0].as_ref().unwrap().command,
                Command::NICK(NickName::new("a").unwrap())
            );
            assert_eq!(parser.buffered(), 0);
        }
    }

    #[test]
    fn bad_line_does_not_stop_stream() {
        let mut parser = MessageParser::new();
        let out = collect(&mut parser, b"NICK\r\nNICK bob\r\n");
        assert_eq!(out.len(), 2);
        assert!(matches!(
            out[0],
            Err(ParseError::InvalidArgumentCount { got: 0, expected: 1, .. })
        ));
        assert_eq!(
            out[1].as_ref().unwrap().command,
            Command::NICK(NickName::new("bob").unwrap())
        );
    }

    #[test]
    fn unconsumed_lines_stay_buffered() {
        let mut parser = MessageParser::new();
        let first = parser.feed(b"PING :a\r\nPING :b\r\n").next();
        assert!(first.is_some());
        let rest = collect(&mut parser, b"");
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn clear_drops_partial_line() {
        let mut parser = MessageParser::new();
        assert_eq!(collect(&mut parser, b"PRIVMSG #a :half").len(), 0);
        parser.clear();
        assert_eq!(parser.buffered(), 0);
        let out = collect(&mut parser, b"NICK z\r\n");
        assert_eq!(out.len(), 1);
        assert!(out[0].is_ok());
    }
}
