//! Client options and their TOML loading.
//!
//! - [`types`]: [`ClientOptions`], [`RetryConfig`] and the on-disk layout
//! - [`validation`]: checks run on a loaded file, reporting every problem at once

mod types;
mod validation;

pub use types::{ClientOptions, ConfigError, DEFAULT_PORT, DEFAULT_REALNAME, RetryConfig};
pub use validation::ValidationError;
