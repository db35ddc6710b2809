//! Code conversion and classification for [`Response`].

use super::Response;
use std::str::FromStr;

impl Response {
    /// Returns the numeric code.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Error replies are 400 and above.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.code() >= 400
    }

    /// Replies that tell a registering client it has been accepted.
    ///
    /// Some servers skip 001 and start with the MOTD, so those count too.
    pub fn signals_registration(&self) -> bool {
        matches!(
            self,
            Response::RPL_WELCOME
                | Response::RPL_YOURHOST
                | Response::RPL_MOTD
                | Response::RPL_ENDOFMOTD
        )
    }
}

impl FromStr for Response {
    type Err = ParseResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: u16 = s.parse().map_err(|_| ParseResponseError::InvalidFormat)?;
        Response::from_code(code).ok_or(ParseResponseError::UnknownCode(code))
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

/// Error when parsing a response code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseResponseError {
    /// The string was not a valid number
    #[error("invalid response code format")]
    InvalidFormat,
    /// The numeric code is not a known response
    #[error("unknown response code: {0}")]
    UnknownCode(u16),
}
