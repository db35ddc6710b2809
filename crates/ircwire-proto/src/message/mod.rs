//! IRC message types and parsing.

mod parse;
#[cfg(feature = "serde")]
mod record;
mod serialize;
mod types;

pub(crate) use self::serialize::write_message;
pub use self::types::Message;
