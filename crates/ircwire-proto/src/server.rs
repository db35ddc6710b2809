//! Server names.

use crate::casemap::irc_to_lower;
use crate::ident::folded_identifier;

/// A server name, at most 63 characters.
#[derive(Clone, Debug)]
pub struct ServerName {
    raw: String,
    folded: String,
}

/// Maximum server name length from RFC 2812 Section 2.3.1.
pub const SERVER_MAX_LEN: usize = 63;

impl ServerName {
    /// Validates and wraps `s`.
    pub fn new(s: impl Into<String>) -> Option<Self> {
        let raw = s.into();
        if !Self::validate(&raw) {
            return None;
        }
        let folded = irc_to_lower(&raw);
        Some(Self { raw, folded })
    }

    /// 1 to 63 characters with no whitespace, control bytes, commas or colons.
    pub fn validate(s: &str) -> bool {
        !s.is_empty()
            && s.chars().count() <= SERVER_MAX_LEN
            && !s
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || c == ',' || c == ':')
    }
}

folded_identifier!(ServerName, InvalidServerName);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_server_names() {
        assert!(ServerName::new("irc.example.net").is_some());
        assert!(ServerName::new("x").is_some());
        assert!(ServerName::new("").is_none());
        assert!(ServerName::new("irc example").is_none());
        assert!(ServerName::new("a".repeat(64)).is_none());
    }

    #[test]
    fn compares_case_insensitively() {
        assert_eq!(
            ServerName::new("IRC.Example.NET").unwrap(),
            ServerName::new("irc.example.net").unwrap()
        );
    }
}
