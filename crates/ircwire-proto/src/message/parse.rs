use std::str::FromStr;

use super::types::Message;
use crate::error::ParseError;
use crate::parser::parse_line;

impl FromStr for Message {
    type Err = ParseError;

    /// Parses a single line. A trailing CRLF is accepted but not required.
    fn from_str(s: &str) -> Result<Message, Self::Err> {
        parse_line(s.as_bytes()).unwrap_or(Err(ParseError::SyntaxError))
    }
}
