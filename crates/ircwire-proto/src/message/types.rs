use crate::command::Command;
use crate::prefix::UserId;
use crate::recipient::Recipient;

/// One protocol line: an optional origin, an optional target and a command.
///
/// The target is only ever set on outbound messages. It is written between
/// the command token and the command's own arguments, which is how numeric
/// replies address the recipient.
///
/// # Example
///
/// ```
/// use ircwire_proto::Message;
///
/// let msg: Message = ":nick!user@host PRIVMSG #channel :Hello!".parse().unwrap();
/// assert_eq!(msg.source_nickname(), Some("nick"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Server name or `nick!user@host` of the sender.
    pub origin: Option<String>,
    /// Bare argument written right after the command token.
    pub target: Option<String>,
    /// The command and its arguments.
    pub command: Command,
}

impl Message {
    /// Wrap a command with no origin or target.
    pub fn new(command: Command) -> Self {
        Message {
            origin: None,
            target: None,
            command,
        }
    }

    /// Set the origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// The sender as a user id, if the origin names a user.
    pub fn source_user(&self) -> Option<UserId> {
        self.origin.as_deref().and_then(UserId::parse)
    }

    /// The nickname part of the origin, without validating it.
    pub fn source_nickname(&self) -> Option<&str> {
        let origin = self.origin.as_deref()?;
        let end = origin.find(['!', '@']).unwrap_or(origin.len());
        Some(&origin[..end])
    }

    /// Create a PRIVMSG to one recipient.
    #[must_use]
    pub fn privmsg(to: impl Into<Recipient>, text: impl Into<String>) -> Self {
        Command::PRIVMSG(vec![to.into()], text.into()).into()
    }

    /// Create a NOTICE to one recipient.
    #[must_use]
    pub fn notice(to: impl Into<Recipient>, text: impl Into<String>) -> Self {
        Command::NOTICE(vec![to.into()], text.into()).into()
    }

    /// Create a PONG answering `server`.
    #[must_use]
    pub fn pong(server: impl Into<String>) -> Self {
        Command::PONG(server.into(), None).into()
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Message::new(command)
    }
}
