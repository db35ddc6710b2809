//! Message origins that identify a user.

mod types;

pub use self::types::UserId;
