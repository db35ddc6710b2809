//! User and channel mode bitsets.
//!
//! Both sets serialize to letters in a fixed canonical order, not in the order
//! they were parsed. That order is part of the wire format.

mod parse;
mod types;

pub use self::parse::{parse_mode_changes, ModeChanges};
pub use self::types::{ChannelMode, ModeType, UserMode};
