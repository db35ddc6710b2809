//! Channel names.
//!
//! # Reference
//! - RFC 2812 Section 1.3: Channels

use crate::casemap::irc_to_lower;
use crate::ident::folded_identifier;

/// A validated channel name such as `#rust` or `&local`.
#[derive(Clone, Debug)]
pub struct ChannelName {
    raw: String,
    folded: String,
}

/// Maximum channel name length, prefix included.
pub const CHANNEL_MAX_LEN: usize = 50;

impl ChannelName {
    /// Validates and wraps `s`.
    pub fn new(s: impl Into<String>) -> Option<Self> {
        let raw = s.into();
        if !Self::validate(&raw) {
            return None;
        }
        let folded = irc_to_lower(&raw);
        Some(Self { raw, folded })
    }

    /// A channel name is 2 to 50 characters, starts with one of `&#+!` and
    /// holds no space, comma or BEL. Bytes the line grammar cannot carry in
    /// a middle parameter (NUL, CR, LF, `:`) are rejected too.
    pub fn validate(s: &str) -> bool {
        let len = s.chars().count();
        if !(2..=CHANNEL_MAX_LEN).contains(&len) {
            return false;
        }
        if !matches!(s.as_bytes()[0], b'&' | b'#' | b'+' | b'!') {
            return false;
        }
        !s
            .bytes()
            .any(|b| matches!(b, 0 | 7 | b'\r' | b'\n' | b' ' | b',' | b':'))
    }
}

folded_identifier!(ChannelName, InvalidChannelName);

/// Returns `true` if `s` starts with a channel prefix character.
///
/// Used to decide between user and channel forms before full validation.
pub fn has_channel_prefix(s: &str) -> bool {
    matches!(s.as_bytes().first(), Some(b'&' | b'#' | b'+' | b'!'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_channels() {
        for name in ["#channel", "&local", "+modeless", "!safe12345", "#Ünïcode"] {
            assert!(ChannelName::new(name).is_some(), "{name}");
        }
    }

    #[test]
    fn invalid_channels() {
        for name in ["", "#", "channel", "#chan nel", "#chan,nel", "#bell\x07", "#a:b"] {
            assert!(ChannelName::new(name).is_none(), "{name:?}");
        }
        assert!(ChannelName::new(format!("#{}", "x".repeat(49))).is_some());
        assert!(ChannelName::new(format!("#{}", "x".repeat(50))).is_none());
    }

    #[test]
    fn folded_comparison() {
        let a = ChannelName::new("#Rust[Lang]").unwrap();
        let b = ChannelName::new("#rust{lang}").unwrap();
        assert_eq!(a, b);
        assert_eq!(b.as_str(), "#rust{lang}");
    }
}
