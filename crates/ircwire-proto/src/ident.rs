//! Shared plumbing for case-folded identifier newtypes.

/// Implements equality, hashing, display and parsing for a newtype holding
/// `raw` (original casing) and `folded` (RFC 1459 folded) strings.
///
/// The type must provide `fn new(impl Into<String>) -> Option<Self>`.
macro_rules! folded_identifier {
    ($ty:ident, $err:ident) => {
        impl $ty {
            /// The identifier as it was received or constructed.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.raw
            }

            /// The case-folded form used for comparisons.
            #[inline]
            pub fn normalized(&self) -> &str {
                &self.folded
            }

            /// Consumes the identifier, returning the original string.
            pub fn into_string(self) -> String {
                self.raw
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.folded == other.folded
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.folded.hash(state);
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.raw)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.raw
            }
        }

        impl std::str::FromStr for $ty {
            type Err = crate::error::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::new(s).ok_or_else(|| crate::error::ParseError::$err(s.to_owned()))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = crate::error::ParseError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> String {
                id.raw
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.raw)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use folded_identifier;
