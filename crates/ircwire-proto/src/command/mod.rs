//! The typed command model.

mod parse;
pub(crate) mod serialize;
/// CAP sub-commands.
pub mod subcommands;
mod types;
pub(crate) mod util;

pub use subcommands::CapSubCommand;
pub use types::Command;
