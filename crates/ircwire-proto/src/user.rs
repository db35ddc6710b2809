//! The `USER` registration record.

use std::fmt;

use crate::mode::{ModeType, UserMode};

/// Parameters of the `USER` command.
///
/// RFC 1459 sends `<username> <hostname> <servername> <realname>`; RFC 2812
/// replaced hostname with a numeric user mode mask. A record carries one form
/// or the other: `usermask` is set, or `hostname`/`servername` are.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserInfo {
    /// Username (ident).
    pub username: String,
    /// Initial user modes (RFC 2812 form).
    #[cfg_attr(feature = "serde", serde(default, with = "mask_serde"))]
    pub usermask: Option<UserMode>,
    /// Client hostname (RFC 1459 form).
    pub hostname: Option<String>,
    /// Server name (RFC 1459 form).
    pub servername: Option<String>,
    /// Real name, sent as the trailing argument.
    pub realname: String,
}

impl UserInfo {
    /// RFC 2812 form with a mode mask.
    pub fn with_mask(
        username: impl Into<String>,
        usermask: UserMode,
        realname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            usermask: Some(usermask),
            hostname: None,
            servername: None,
            realname: realname.into(),
        }
    }

    /// RFC 1459 form with host and server names.
    pub fn with_host(
        username: impl Into<String>,
        hostname: impl Into<String>,
        servername: impl Into<String>,
        realname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            usermask: None,
            hostname: Some(hostname.into()),
            servername: Some(servername.into()),
            realname: realname.into(),
        }
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)?;
        if let Some(mask) = &self.usermask {
            write!(f, " mask=+{}", mask.letters())?;
        }
        if let Some(host) = &self.hostname {
            write!(f, " host={host}")?;
        }
        if let Some(server) = &self.servername {
            write!(f, " srv={server}")?;
        }
        write!(f, " '{}'", self.realname)
    }
}

#[cfg(feature = "serde")]
mod mask_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::mode::UserMode;

    pub fn serialize<S: Serializer>(mask: &Option<UserMode>, s: S) -> Result<S::Ok, S::Error> {
        match mask {
            Some(mask) => s.serialize_some(&mask.mask()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<UserMode>, D::Error> {
        Ok(Option::<u16>::deserialize(d)?.map(UserMode::from_mask))
    }
}
