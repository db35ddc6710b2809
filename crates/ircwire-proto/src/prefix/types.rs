//! `nick!user@host` user identifiers.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format (`prefix` production)

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::nick::NickName;

/// A user as named in a message origin: nickname plus optional user and host.
///
/// Equality compares all three parts, the nickname case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId {
    /// Nickname.
    pub nick: NickName,
    /// Username (ident), if present.
    pub user: Option<String>,
    /// Hostname, if present.
    pub host: Option<String>,
}

impl UserId {
    /// A bare nickname with no user or host.
    pub fn new(nick: NickName) -> Self {
        Self {
            nick,
            user: None,
            host: None,
        }
    }

    /// Parses `nick`, `nick@host` or `nick!user@host`.
    ///
    /// Returns `None` if the nickname part is not a valid nickname, which is
    /// the case for server origins such as `irc.example.net`.
    pub fn parse(s: &str) -> Option<Self> {
        let Some((front, host)) = s.split_once('@') else {
            return NickName::new(s).map(Self::new);
        };
        let (nick, user) = match front.split_once('!') {
            Some((nick, user)) => (nick, Some(user.to_owned())),
            None => (front, None),
        };
        Some(Self {
            nick: NickName::new(nick)?,
            user,
            host: Some(host.to_owned()),
        })
    }
}

impl FromStr for UserId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::InvalidNickName(s.to_owned()))
    }
}

impl fmt::Display for UserId {
    /// The user part is only printed together with a host.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nick.as_str())?;
        if let Some(host) = &self.host {
            if let Some(user) = &self.user {
                write!(f, "!{user}")?;
            }
            write!(f, "@{host}")?;
        }
        Ok(())
    }
}
