//! Targets of PRIVMSG, NOTICE and MODE.

use std::fmt;
use std::str::FromStr;

use crate::chan::ChannelName;
use crate::error::ParseError;
use crate::nick::NickName;

/// A message recipient.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// A channel.
    Channel(ChannelName),
    /// A user.
    Nickname(NickName),
    /// `*`
    Everything,
}

impl Recipient {
    /// Channel names win over nicknames; `*` is [`Recipient::Everything`].
    pub fn parse(s: &str) -> Option<Self> {
        if s == "*" {
            return Some(Self::Everything);
        }
        ChannelName::new(s)
            .map(Self::Channel)
            .or_else(|| NickName::new(s).map(Self::Nickname))
    }

    /// The wire form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Channel(c) => c.as_str(),
            Self::Nickname(n) => n.as_str(),
            Self::Everything => "*",
        }
    }
}

impl FromStr for Recipient {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::InvalidMessageTarget(s.to_owned()))
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Recipient {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ChannelName> for Recipient {
    fn from(c: ChannelName) -> Self {
        Self::Channel(c)
    }
}

impl From<NickName> for Recipient {
    fn from(n: NickName) -> Self {
        Self::Nickname(n)
    }
}
