//! CAP sub-commands.
//!
//! Only the verbs are modelled here. Negotiation itself is up to the caller.
//!
//! # Reference
//! - IRCv3 capability negotiation: <https://ircv3.net/specs/extensions/capability-negotiation>

use std::str::FromStr;

use crate::error::ParseError;

/// The verb of a `CAP` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapSubCommand {
    /// List capabilities the server supports.
    LS,
    /// List capabilities enabled on this connection.
    LIST,
    /// Request capabilities.
    REQ,
    /// Server accepted a request.
    ACK,
    /// Server rejected a request.
    NAK,
    /// Finish negotiation.
    END,
    /// Server advertises new capabilities (cap-notify).
    NEW,
    /// Server withdraws capabilities (cap-notify).
    DEL,
}

impl CapSubCommand {
    /// The wire token.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LS => "LS",
            Self::LIST => "LIST",
            Self::REQ => "REQ",
            Self::ACK => "ACK",
            Self::NAK => "NAK",
            Self::END => "END",
            Self::NEW => "NEW",
            Self::DEL => "DEL",
        }
    }
}

impl FromStr for CapSubCommand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LS" => Ok(Self::LS),
            "LIST" => Ok(Self::LIST),
            "REQ" => Ok(Self::REQ),
            "ACK" => Ok(Self::ACK),
            "NAK" => Ok(Self::NAK),
            "END" => Ok(Self::END),
            "NEW" => Ok(Self::NEW),
            "DEL" => Ok(Self::DEL),
            _ => Err(ParseError::InvalidCapCommand(s.to_owned())),
        }
    }
}

impl std::fmt::Display for CapSubCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
