//! # ircwire
//!
//! An async IRC client engine on top of [`ircwire_proto`]: it connects,
//! registers, answers PINGs, tracks its own nickname, modes and channels, and
//! reports everything else to a [`ClientDelegate`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ircwire::{ClientEvent, ClientOptions, EventDelegate, IrcClient, MessageTarget};
//! use ircwire_proto::{ChannelName, NickName, Recipient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ClientOptions::new(NickName::new("noze").ok_or("bad nick")?)
//!     .with_host("irc.example.net");
//! let (delegate, mut events) = EventDelegate::channel();
//! let client = IrcClient::new(options, Arc::new(delegate));
//! client.connect();
//!
//! while let Some(event) = events.recv().await {
//!     if let ClientEvent::Registered { .. } = event {
//!         let rust = ChannelName::new("#rust").ok_or("bad channel")?;
//!         client.join(vec![rust.clone()], None);
//!         client.send_text("hello", &[Recipient::Channel(rust)]).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]

pub mod client;
pub mod config;
pub mod connector;
pub mod delegate;
pub mod error;
mod link;
pub mod machine;
pub mod retry;
pub mod state;
pub mod target;

pub use self::client::{ClientSnapshot, IrcClient};
pub use self::config::{ClientOptions, ConfigError, RetryConfig, ValidationError};
pub use self::connector::{Connector, TcpConnector};
pub use self::delegate::{ClientDelegate, ClientEvent, EventDelegate, NoopDelegate};
pub use self::error::ClientError;
pub use self::machine::{ClientMachine, Effects};
pub use self::retry::{RetryDecision, RetryInfo, RetryStrategy};
pub use self::state::ClientState;
pub use self::target::MessageTarget;
