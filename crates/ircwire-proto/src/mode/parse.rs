//! MODE argument parsing.

use super::types::ModeType;

/// Flags added and removed by one MODE command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModeChanges<T> {
    /// Flags following a `+`.
    pub add: T,
    /// Flags following a `-`.
    pub remove: T,
}

impl<T: ModeType> ModeChanges<T> {
    /// Whether neither side has a flag.
    pub fn is_empty(&self) -> bool {
        self.add.is_none() && self.remove.is_none()
    }

    /// The change as a single token, e.g. `+iw-o`.
    ///
    /// Empty when nothing changes.
    pub fn to_token(&self) -> String {
        let mut out = String::new();
        if !self.add.is_none() {
            out.push('+');
            out.push_str(&self.add.letters());
        }
        if !self.remove.is_none() {
            out.push('-');
            out.push_str(&self.remove.letters());
        }
        out
    }
}

/// Parses `+xyz -abc` style tokens.
///
/// Letters before any sign count as additions. A sign stays in effect across
/// token boundaries until the next sign. A token that does not start with a
/// sign is taken as the parameter of a pending parameterised flag (such as
/// the nickname after `+o`) if there is one, and skipped. Unknown letters are
/// skipped with a warning.
pub fn parse_mode_changes<T: ModeType, S: AsRef<str>>(tokens: &[S]) -> ModeChanges<T> {
    let mut changes = ModeChanges::<T>::default();
    let mut adding = true;
    let mut pending_params = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let signed = token.starts_with(['+', '-']);
        if i > 0 && !signed && pending_params > 0 {
            pending_params -= 1;
            continue;
        }
        for c in token.chars() {
            match c {
                '+' => adding = true,
                '-' => adding = false,
                _ => match T::from_letter(c) {
                    Some(flag) => {
                        if T::takes_param(flag, adding) {
                            pending_params += 1;
                        }
                        if adding {
                            changes.add.add(flag);
                        } else {
                            changes.remove.add(flag);
                        }
                    }
                    None => {
                        tracing::warn!(letter = %c, token, "skipping unknown mode letter")
                    }
                },
            }
        }
    }
    changes
}
