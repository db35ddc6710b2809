//! Outward notifications.
//!
//! Every callback is fire-and-forget and defaults to doing nothing. Callbacks
//! run on the connection task, so they must not block.

use ircwire_proto::{ChannelName, Message, NickName, Recipient, UserId, UserInfo, UserMode};
use tokio::sync::mpsc;

use crate::error::ClientError;

/// Receives what a client sees happen on its connection.
#[allow(unused_variables)]
pub trait ClientDelegate: Send + Sync {
    fn on_registered(&self, nick: &NickName, user_info: &UserInfo) {}

    fn on_registration_failed(&self, error: &ClientError) {}

    /// A message the client did not handle itself.
    fn on_unhandled(&self, message: &Message) {}

    /// The complete message of the day, one line per `\n`.
    fn on_motd(&self, text: &str) {}

    fn on_notice(&self, text: &str, recipients: &[Recipient]) {}

    fn on_message(&self, text: &str, sender: &UserId, recipients: &[Recipient]) {}

    fn on_user_mode_changed(&self, mode: UserMode) {}

    /// Our own nickname changed.
    fn on_nick_changed(&self, nick: &NickName) {}

    fn on_join(&self, user: &UserId, channels: &[ChannelName]) {}

    fn on_part(&self, user: &UserId, channels: &[ChannelName], message: Option<&str>) {}

    fn on_topic(&self, topic: &str, channel: &ChannelName) {}
}

/// A delegate that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelegate;

impl ClientDelegate for NoopDelegate {}

/// One [`ClientDelegate`] callback, as a value.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    Registered {
        nick: NickName,
        user_info: UserInfo,
    },
    RegistrationFailed(ClientError),
    Unhandled(Message),
    Motd(String),
    Notice {
        text: String,
        recipients: Vec<Recipient>,
    },
    Message {
        text: String,
        sender: UserId,
        recipients: Vec<Recipient>,
    },
    UserModeChanged(UserMode),
    NickChanged(NickName),
    Joined {
        user: UserId,
        channels: Vec<ChannelName>,
    },
    Parted {
        user: UserId,
        channels: Vec<ChannelName>,
        message: Option<String>,
    },
    Topic {
        topic: String,
        channel: ChannelName,
    },
}

/// Forwards every callback into an unbounded channel.
///
/// Events are dropped once the receiver is gone.
#[derive(Debug, Clone)]
pub struct EventDelegate {
    tx: mpsc::UnboundedSender<ClientEvent>,
}

impl EventDelegate {
    pub fn new(tx: mpsc::UnboundedSender<ClientEvent>) -> Self {
        Self { tx }
    }

    /// A delegate plus the receiving end of its events.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ClientEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn emit(&self, event: ClientEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event receiver dropped");
        }
    }
}

impl ClientDelegate for EventDelegate {
    fn on_registered(&self, nick: &NickName, user_info: &UserInfo) {
        self.emit(ClientEvent::Registered {
            nick: nick.clone(),
            user_info: user_info.clone(),
        });
    }

    fn on_registration_failed(&self, error: &ClientError) {
        self.emit(ClientEvent::RegistrationFailed(error.clone()));
    }

    fn on_unhandled(&self, message: &Message) {
        self.emit(ClientEvent::Unhandled(message.clone()));
    }

    fn on_motd(&self, text: &str) {
        self.emit(ClientEvent::Motd(text.to_owned()));
    }

    fn on_notice(&self, text: &str, recipients: &[Recipient]) {
        self.emit(ClientEvent::Notice {
            text: text.to_owned(),
            recipients: recipients.to_vec(),
        });
    }

    fn on_message(&self, text: &str, sender: &UserId, recipients: &[Recipient]) {
        self.emit(ClientEvent::Message {
            text: text.to_owned(),
            sender: sender.clone(),
            recipients: recipients.to_vec(),
        });
    }

    fn on_user_mode_changed(&self, mode: UserMode) {
        self.emit(ClientEvent::UserModeChanged(mode));
    }

    fn on_nick_changed(&self, nick: &NickName) {
        self.emit(ClientEvent::NickChanged(nick.clone()));
    }

    fn on_join(&self, user: &UserId, channels: &[ChannelName]) {
        self.emit(ClientEvent::Joined {
            user: user.clone(),
            channels: channels.to_vec(),
        });
    }

    fn on_part(&self, user: &UserId, channels: &[ChannelName], message: Option<&str>) {
        self.emit(ClientEvent::Parted {
            user: user.clone(),
            channels: channels.to_vec(),
            message: message.map(str::to_owned),
        });
    }

    fn on_topic(&self, topic: &str, channel: &ChannelName) {
        self.emit(ClientEvent::Topic {
            topic: topic.to_owned(),
            channel: channel.clone(),
        });
    }
}
