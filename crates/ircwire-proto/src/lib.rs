//! # ircwire-proto
//!
//! The protocol half of an IRC client: validated identifiers, a typed
//! command model, an incremental line parser, an encoder and a dispatcher.
//!
//! ## Features
//!
//! - Incremental, resumable parsing of raw socket bytes into [`Message`]s
//! - One error per malformed line, never a stalled stream
//! - Typed commands with argument-count validation
//! - Byte-exact encoding straight into buffers
//! - Optional Tokio codec (`tokio` feature, on by default)
//! - Optional serde representation of messages (`serde` feature)
//!
//! ## Quick Start
//!
//! ### Parsing a byte stream
//!
//! ```rust
//! use ircwire_proto::{Command, MessageParser};
//!
//! let mut parser = MessageParser::new();
//! let results: Vec<_> = parser.feed(b"NICK\r\nNICK bob\r\n").collect();
//!
//! assert!(results[0].is_err());
//! assert!(matches!(results[1].as_ref().unwrap().command, Command::NICK(_)));
//! ```
//!
//! ### Creating messages
//!
//! ```rust
//! use ircwire_proto::{ChannelName, Message};
//!
//! let msg = Message::privmsg(ChannelName::new("#rust").unwrap(), "Hello, world!")
//!     .with_origin("bot!bot@example.com");
//! assert_eq!(msg.to_string(), ":bot!bot@example.com PRIVMSG #rust :Hello, world!\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod casemap;
pub mod chan;
pub mod command;
pub mod dispatch;
pub mod encode;
pub mod error;
mod ident;
#[cfg(feature = "tokio")]
pub mod irc;
pub mod line;
pub mod message;
pub mod mode;
pub mod nick;
pub mod parser;
pub mod prefix;
pub mod recipient;
pub mod response;
pub mod server;
pub mod user;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::chan::ChannelName;
pub use self::command::{CapSubCommand, Command};
pub use self::dispatch::{DispatchError, Dispatcher, HandlerError, HandlerResult};
pub use self::encode::IrcEncode;
pub use self::error::{ParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::irc::IrcCodec;
pub use self::message::Message;
pub use self::mode::{ChannelMode, ModeChanges, ModeType, UserMode};
pub use self::nick::NickName;
pub use self::parser::{MessageParser, MAX_ARGUMENTS};
pub use self::prefix::UserId;
pub use self::recipient::Recipient;
pub use self::response::Response;
pub use self::server::ServerName;
pub use self::user::UserInfo;
