//! Routing typed commands to handler methods.
//!
//! Implement [`Dispatcher`] and override only the `on_*` methods you care
//! about. Every method defaults to [`HandlerError::NotImplemented`], which
//! [`Dispatcher::dispatch`] turns into [`DispatchError::DoesNotRespondTo`].

use thiserror::Error;

use crate::chan::ChannelName;
use crate::command::{CapSubCommand, Command};
use crate::message::Message;
use crate::mode::{ChannelMode, ModeChanges, UserMode};
use crate::nick::NickName;
use crate::prefix::UserId;
use crate::recipient::Recipient;
use crate::user::UserInfo;

/// Errors surfaced by [`Dispatcher::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// No handler for this message. Usually just logged.
    #[error("no handler for {}", .0.command.name())]
    DoesNotRespondTo(Box<Message>),
    /// The nickname is taken.
    #[error("nickname in use: {0}")]
    NicknameInUse(NickName),
    /// No user by that nickname.
    #[error("no such nick: {0}")]
    NoSuchNick(NickName),
    /// No channel by that name.
    #[error("no such channel: {0}")]
    NoSuchChannel(ChannelName),
    /// Registration was attempted twice.
    #[error("already registered")]
    AlreadyRegistered,
    /// The command needs a registered connection.
    #[error("not registered")]
    NotRegistered,
    /// A MODE change addressed someone else.
    #[error("cannot change mode for other users")]
    CantChangeModeForOtherUsers,
}

/// What an `on_*` method returns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The method was not overridden.
    #[error("not implemented")]
    NotImplemented,
    /// A real failure, passed through by `dispatch`.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Result type for handler methods.
pub type HandlerResult = Result<(), HandlerError>;

/// One handler method per command family.
///
/// `sender` is the origin of the message when it names a user.
#[allow(unused_variables)]
pub trait Dispatcher {
    /// PING
    fn on_ping(&mut self, server: &str, server2: Option<&str>) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// PONG
    fn on_pong(&mut self, server: &str, server2: Option<&str>) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// CAP
    fn on_cap(&mut self, sub: CapSubCommand, ids: &[String]) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// NICK
    fn on_nick(&mut self, sender: Option<&UserId>, nick: &NickName) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// USER
    fn on_user(&mut self, info: &UserInfo) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// `MODE <nick>` query
    fn on_mode_get(&mut self, nick: &NickName) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// `MODE <channel>` query
    fn on_channel_mode_get(&mut self, channel: &ChannelName) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// `MODE <channel> b`
    fn on_ban_mask_query(&mut self, channel: &ChannelName) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// User MODE change
    fn on_mode(
        &mut self,
        sender: Option<&UserId>,
        nick: &NickName,
        changes: &ModeChanges<UserMode>,
    ) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// Channel MODE change
    fn on_channel_mode(
        &mut self,
        sender: Option<&UserId>,
        channel: &ChannelName,
        changes: &ModeChanges<ChannelMode>,
    ) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// WHOIS
    fn on_whois(&mut self, server: Option<&str>, masks: &[String]) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// WHO
    fn on_who(&mut self, mask: Option<&str>, operators_only: bool) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// JOIN
    fn on_join(
        &mut self,
        sender: Option<&UserId>,
        channels: &[ChannelName],
        keys: Option<&[String]>,
    ) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// PART
    fn on_part(
        &mut self,
        sender: Option<&UserId>,
        channels: &[ChannelName],
        message: Option<&str>,
    ) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// `JOIN 0`
    fn on_part_all(&mut self, sender: Option<&UserId>) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// NOTICE
    fn on_notice(
        &mut self,
        sender: Option<&UserId>,
        recipients: &[Recipient],
        text: &str,
    ) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// PRIVMSG
    fn on_privmsg(
        &mut self,
        sender: Option<&UserId>,
        recipients: &[Recipient],
        text: &str,
    ) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// ISON
    fn on_ison(&mut self, nicks: &[NickName]) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// LIST
    fn on_list(
        &mut self,
        channels: Option<&[ChannelName]>,
        target: Option<&str>,
    ) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// QUIT
    fn on_quit(&mut self, sender: Option<&UserId>, message: Option<&str>) -> HandlerResult {
        Err(HandlerError::NotImplemented)
    }

    /// Route `msg` to its handler method.
    ///
    /// Numeric replies and unrecognised commands have no handler method and
    /// always yield [`DispatchError::DoesNotRespondTo`], as does any method
    /// left at its default.
    fn dispatch(&mut self, msg: &Message) -> Result<(), DispatchError> {
        let sender = msg.source_user();
        let sender = sender.as_ref();
        let result = match &msg.command {
            Command::PING(s, s2) => self.on_ping(s, s2.as_deref()),
            Command::PONG(s, s2) => self.on_pong(s, s2.as_deref()),
            Command::CAP(sub, ids) => self.on_cap(*sub, ids),
            Command::NICK(nick) => self.on_nick(sender, nick),
            Command::USER(info) => self.on_user(info),
            Command::UserMODEGET(nick) => self.on_mode_get(nick),
            Command::ChannelMODEGET(channel) => self.on_channel_mode_get(channel),
            Command::ChannelMODEGETBANMASK(channel) => self.on_ban_mask_query(channel),
            Command::UserMODE(nick, changes) => self.on_mode(sender, nick, changes),
            Command::ChannelMODE(channel, changes) => {
                self.on_channel_mode(sender, channel, changes)
            }
            Command::WHOIS(server, masks) => self.on_whois(server.as_deref(), masks),
            Command::WHO(mask, operators_only) => self.on_who(mask.as_deref(), *operators_only),
            Command::JOIN(channels, keys) => self.on_join(sender, channels, keys.as_deref()),
            Command::JOIN0 => self.on_part_all(sender),
            Command::PART(channels, message) => self.on_part(sender, channels, message.as_deref()),
            Command::NOTICE(recipients, text) => self.on_notice(sender, recipients, text),
            Command::PRIVMSG(recipients, text) => self.on_privmsg(sender, recipients, text),
            Command::ISON(nicks) => self.on_ison(nicks),
            Command::LIST(channels, target) => self.on_list(channels.as_deref(), target.as_deref()),
            Command::QUIT(message) => self.on_quit(sender, message.as_deref()),
            Command::Response(..) | Command::Other(..) | Command::OtherNumeric(..) => {
                Err(HandlerError::NotImplemented)
            }
        };
        match result {
            Ok(()) => Ok(()),
            Err(HandlerError::NotImplemented) => {
                Err(DispatchError::DoesNotRespondTo(Box::new(msg.clone())))
            }
            Err(HandlerError::Dispatch(e)) => Err(e),
        }
    }
}
