//! RFC 1459 case folding.
//!
//! Identifiers compare equal when they differ only in ASCII case or in one of
//! the four "Scandinavian" pairs: `[`/`{`, `]`/`}`, `\`/`|` and `~`/`^`.
//! The folded form is what identifier types hash and compare on.

/// Fold a single character.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => (c as u8 + 32) as char,
        _ => c,
    }
}

/// Fold a whole string.
pub fn irc_to_lower(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    out.extend(s.chars().map(irc_lower_char));
    out
}

/// Returns `true` if `s` is already in folded form.
pub fn is_folded(s: &str) -> bool {
    s.chars().all(|c| irc_lower_char(c) == c)
}

/// Case-insensitive comparison under RFC 1459 folding.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .chars()
            .zip(b.chars())
            .all(|(ca, cb)| irc_lower_char(ca) == irc_lower_char(cb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_scandinavian_pairs() {
        assert_eq!(irc_to_lower("Foo[Bar]"), "foo{bar}");
        assert_eq!(irc_to_lower("A\\B~C"), "a|b^c");
        assert_eq!(irc_lower_char('#'), '#');
    }

    #[test]
    fn folding_is_idempotent() {
        for s in ["Foo[Bar]", "#Rust~Lang", "plain", "ÄÖÜ", ""] {
            let once = irc_to_lower(s);
            assert_eq!(irc_to_lower(&once), once);
            assert!(is_folded(&once));
        }
        assert!(!is_folded("Nick"));
    }

    #[test]
    fn eq_ignores_case_and_pairs() {
        assert!(irc_eq("Foo[Bar]", "foo{bar}"));
        assert!(irc_eq("nick\\away", "NICK|AWAY"));
        assert!(!irc_eq("nick", "nick_"));
        assert!(!irc_eq("nick", "nock"));
    }
}
