//! Nicknames.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1 (`nickname` production)

use crate::casemap::irc_to_lower;
use crate::ident::folded_identifier;

/// A validated IRC nickname.
///
/// Equality and hashing use the RFC 1459 folded form, so `Foo[Bar]` and
/// `foo{bar}` name the same user. The original casing is kept for display
/// and re-encoding.
///
/// ```
/// use ircwire_proto::NickName;
///
/// let a = NickName::new("Foo[Bar]").unwrap();
/// let b = NickName::new("foo{bar}").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Foo[Bar]");
/// assert!(NickName::new("9lives").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct NickName {
    raw: String,
    folded: String,
}

/// Length limit used when validating nicknames received from servers.
pub const NICK_MAX_LEN: usize = 1024;

/// Length limit from RFC 2812, applied by [`NickName::new_strict`].
pub const NICK_STRICT_MAX_LEN: usize = 9;

/// `[ ] \ ` _ ^ { | }`
#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

impl NickName {
    /// Validates `s` with the relaxed length limit.
    pub fn new(s: impl Into<String>) -> Option<Self> {
        Self::with_limit(s.into(), NICK_MAX_LEN)
    }

    /// Validates `s` with the RFC 2812 nine character limit.
    pub fn new_strict(s: impl Into<String>) -> Option<Self> {
        Self::with_limit(s.into(), NICK_STRICT_MAX_LEN)
    }

    fn with_limit(raw: String, max_len: usize) -> Option<Self> {
        if !Self::validate(&raw, max_len) {
            return None;
        }
        let folded = irc_to_lower(&raw);
        Some(Self { raw, folded })
    }

    /// Checks the nickname grammar without allocating.
    ///
    /// The first character must be a letter or special, the rest may also
    /// be digits or `-`. Letters and digits are Unicode ones, and the limit
    /// counts characters.
    pub fn validate(s: &str, max_len: usize) -> bool {
        if s.is_empty() || s.chars().count() > max_len {
            return false;
        }
        let mut chars = s.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || is_special(first) => {}
            _ => return false,
        }
        chars.all(|c| c.is_alphanumeric() || is_special(c) || c == '-')
    }
}

folded_identifier!(NickName, InvalidNickName);
