//! The client state machine.
//!
//! [`ClientMachine`] owns every piece of per-connection state and is driven by
//! plain method calls: transport events in, [`Effects`] out. It does no I/O,
//! which keeps it usable on a single task and easy to test.

use std::mem;
use std::sync::Arc;

use ircwire_proto::{
    ChannelName, Command, DispatchError, Dispatcher, HandlerError, HandlerResult, Message,
    ModeChanges, NickName, Recipient, Response, UserId, UserMode,
};
use tracing::{debug, info, warn};

use crate::config::ClientOptions;
use crate::delegate::ClientDelegate;
use crate::error::ClientError;
use crate::retry::RetryInfo;
use crate::state::ClientState;

/// Work the machine asks its owner to perform on the link.
#[derive(Debug, Default)]
pub struct Effects {
    /// Messages to write, in order, as one batch.
    pub messages: Vec<Message>,
    /// Close the link once `messages` are written.
    pub close_link: bool,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && !self.close_link
    }
}

pub struct ClientMachine {
    options: Arc<ClientOptions>,
    delegate: Arc<dyn ClientDelegate>,
    state: ClientState,
    retry_info: RetryInfo,
    user_mode: UserMode,
    motd: String,
    /// Channels we joined, in join order, re-joined after registration.
    subscribed: Vec<ChannelName>,
    effects: Effects,
}

impl ClientMachine {
    pub fn new(options: Arc<ClientOptions>, delegate: Arc<dyn ClientDelegate>) -> Self {
        Self {
            options,
            delegate,
            state: ClientState::Disconnected,
            retry_info: RetryInfo::default(),
            user_mode: UserMode::empty(),
            motd: String::new(),
            subscribed: Vec::new(),
            effects: Effects::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> &ClientState {
        &self.state
    }

    #[inline]
    pub fn retry_info(&self) -> &RetryInfo {
        &self.retry_info
    }

    #[inline]
    pub fn user_mode(&self) -> UserMode {
        self.user_mode
    }

    #[inline]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn subscribed_channels(&self) -> &[ChannelName] {
        &self.subscribed
    }

    /// `nick!~user@host` while registered.
    pub fn usermask(&self) -> Option<String> {
        let ClientState::Registered { nick, user_info } = &self.state else {
            return None;
        };
        let host = user_info
            .servername
            .as_deref()
            .unwrap_or(self.options.host.as_str());
        Some(format!("{nick}!~{}@{host}", user_info.username))
    }

    /// Drains the work queued since the last call.
    pub fn take_effects(&mut self) -> Effects {
        mem::take(&mut self.effects)
    }

    /// Queues a message for the current link.
    pub fn send(&mut self, message: Message) {
        self.effects.messages.push(message);
    }

    fn send_command(&mut self, command: Command) {
        self.send(Message::from(command));
    }

    fn set_state(&mut self, next: ClientState) {
        debug!(from = %self.state, to = %next, "state change");
        self.state = next;
    }

    fn clear_collectors(&mut self) {
        self.motd.clear();
    }

    // === Lifecycle ===

    /// Starts a connection attempt. Returns `false` if one is not allowed now.
    pub fn connect(&mut self) -> bool {
        if !self.state.can_start_connection() {
            debug!(state = %self.state, "connect ignored");
            return false;
        }
        self.clear_collectors();
        self.user_mode = UserMode::empty();
        self.retry_info.record_attempt();
        self.set_state(ClientState::Connecting);
        true
    }

    /// The transport is up: register.
    pub fn on_connected(&mut self) -> Result<(), ClientError> {
        if !matches!(self.state, ClientState::Connecting) {
            return Err(ClientError::InternalInconsistency(
                "transport came up while not connecting",
            ));
        }
        self.retry_info.record_connected();

        let nick = self.options.nickname.clone();
        let user_info = self.options.user_info();
        self.set_state(ClientState::Registering {
            nick: nick.clone(),
            user_info: user_info.clone(),
        });

        if let Some(password) = self.options.password.clone() {
            self.send_command(Command::Other("PASS".to_owned(), vec![password]));
        }
        self.send_command(Command::NICK(nick));
        self.send_command(Command::USER(user_info));
        Ok(())
    }

    /// The transport could not be established.
    pub fn on_connect_failed(&mut self, error: std::io::Error) {
        let error = ClientError::from(error);
        warn!(host = %self.options.host, port = self.options.port, error = %error, "connect failed");
        self.fail(error);
    }

    /// The link reported an error.
    pub fn on_transport_error(&mut self, error: ClientError) {
        warn!(error = %error, state = %self.state, "transport error");
        self.fail(error);
    }

    fn fail(&mut self, error: ClientError) {
        let interrupted = matches!(
            self.state,
            ClientState::Connecting | ClientState::Registering { .. }
        );
        self.retry_info.record_error(error.clone());
        self.set_state(ClientState::Error(error.clone()));
        self.effects.close_link = true;
        if interrupted {
            self.delegate.on_registration_failed(&error);
        }
    }

    /// The link went down.
    pub fn on_disconnected(&mut self) {
        match self.state {
            ClientState::Error(_) | ClientState::Quit | ClientState::Disconnected => {}
            ClientState::RequestedQuit => self.set_state(ClientState::Quit),
            ClientState::Connecting | ClientState::Registering { .. } => {
                self.delegate.on_registration_failed(&ClientError::Stopped);
                self.set_state(ClientState::Disconnected);
            }
            ClientState::Registered { .. } => self.set_state(ClientState::Disconnected),
        }
    }

    /// Drops the link without a QUIT.
    pub fn close(&mut self) {
        self.effects.close_link = true;
        self.clear_collectors();
        match self.state {
            ClientState::Connecting | ClientState::Registering { .. } => {
                self.delegate.on_registration_failed(&ClientError::Stopped);
                self.set_state(ClientState::Disconnected);
            }
            ClientState::Registered { .. } => self.set_state(ClientState::Disconnected),
            _ => {}
        }
    }

    /// Sends QUIT and closes the link behind it.
    pub fn quit(&mut self, message: Option<String>) {
        if !self.state.is_connected() {
            debug!(state = %self.state, "quit ignored");
            return;
        }
        self.send_command(Command::QUIT(message));
        self.effects.close_link = true;
        self.set_state(ClientState::RequestedQuit);
    }

    // === Inbound ===

    /// Processes one parsed inbound message.
    pub fn handle_message(&mut self, msg: &Message) -> Result<(), ClientError> {
        if !self.state.is_connected() {
            return Err(ClientError::UnexpectedInput(msg.command.name()));
        }

        if matches!(self.state, ClientState::Registering { .. }) {
            if signals_registration(&msg.command) {
                self.registration_done();
            } else if let Some(code) = error_code(&msg.command) {
                self.registration_failed(code);
                return Ok(());
            }
        }

        match self.dispatch(msg) {
            Ok(()) => {}
            Err(DispatchError::DoesNotRespondTo(_)) => self.handle_unrouted(msg),
            Err(e) => warn!(error = %e, command = %msg.command.name(), "dispatch failed"),
        }
        Ok(())
    }

    fn registration_done(&mut self) {
        let ClientState::Registering { nick, user_info } = &self.state else {
            return;
        };
        let (nick, user_info) = (nick.clone(), user_info.clone());
        self.set_state(ClientState::Registered {
            nick: nick.clone(),
            user_info: user_info.clone(),
        });
        info!(nick = %nick, "registered");
        self.delegate.on_registered(&nick, &user_info);

        if !self.subscribed.is_empty() {
            debug!(count = self.subscribed.len(), "rejoining channels");
            self.send_command(Command::JOIN(self.subscribed.clone(), None));
        }
    }

    fn registration_failed(&mut self, code: u16) {
        let error = ClientError::RegistrationFailed(code);
        warn!(nick = ?self.state.nick(), code, "registration failed");
        self.set_state(ClientState::Error(error.clone()));
        self.effects.close_link = true;
        self.delegate.on_registration_failed(&error);
    }

    fn handle_unrouted(&mut self, msg: &Message) {
        let Command::Response(response, args) = &msg.command else {
            self.delegate.on_unhandled(msg);
            return;
        };
        match response {
            Response::RPL_MOTDSTART => {
                self.motd.clear();
                self.push_motd_line(args);
            }
            Response::RPL_MOTD => self.push_motd_line(args),
            Response::RPL_ENDOFMOTD => {
                if !self.motd.is_empty() {
                    self.delegate.on_motd(&self.motd);
                }
                self.motd.clear();
            }
            Response::RPL_TOPIC => {
                // <me> <channel> :<topic>
                let channel = args.get(1).and_then(|c| ChannelName::new(c.as_str()));
                match (channel, args.get(2)) {
                    (Some(channel), Some(topic)) => self.delegate.on_topic(topic, &channel),
                    _ => warn!(args = ?args, "dropping malformed topic reply"),
                }
            }
            _ => self.delegate.on_unhandled(msg),
        }
    }

    fn push_motd_line(&mut self, args: &[String]) {
        if let Some(line) = args.last() {
            self.motd.push_str(line);
            self.motd.push('\n');
        }
    }

    fn is_me(&self, user: &UserId) -> bool {
        self.state.nick() == Some(&user.nick)
    }

    fn track_join(&mut self, channels: &[ChannelName]) {
        for channel in channels {
            if !self.subscribed.contains(channel) {
                self.subscribed.push(channel.clone());
            }
        }
    }

    fn track_part(&mut self, channels: &[ChannelName]) {
        self.subscribed.retain(|c| !channels.contains(c));
    }
}

/// Replies after which a registering client counts as registered.
fn signals_registration(command: &Command) -> bool {
    match command {
        Command::Response(response, _) => response.signals_registration(),
        Command::UserMODE(..) => true,
        _ => false,
    }
}

/// The numeric code of an error reply.
fn error_code(command: &Command) -> Option<u16> {
    match command {
        Command::Response(response, _) if response.is_error() => Some(response.code()),
        Command::OtherNumeric(code, _) if *code >= 400 => Some(*code),
        _ => None,
    }
}

impl Dispatcher for ClientMachine {
    fn on_ping(&mut self, server: &str, _server2: Option<&str>) -> HandlerResult {
        self.send_command(Command::PONG(server.to_owned(), None));
        Ok(())
    }

    fn on_nick(&mut self, sender: Option<&UserId>, nick: &NickName) -> HandlerResult {
        if let Some(sender) = sender
            && !self.is_me(sender)
        {
            // Someone else renamed.
            return Err(HandlerError::NotImplemented);
        }
        self.state.set_nick(nick.clone());
        self.delegate.on_nick_changed(nick);
        Ok(())
    }

    fn on_mode(
        &mut self,
        _sender: Option<&UserId>,
        nick: &NickName,
        changes: &ModeChanges<UserMode>,
    ) -> HandlerResult {
        if self.state.nick() != Some(nick) {
            return Err(DispatchError::CantChangeModeForOtherUsers.into());
        }
        let mode = (self.user_mode - changes.remove) | changes.add;
        if mode != self.user_mode {
            self.user_mode = mode;
            self.delegate.on_user_mode_changed(mode);
        }
        Ok(())
    }

    fn on_join(
        &mut self,
        sender: Option<&UserId>,
        channels: &[ChannelName],
        _keys: Option<&[String]>,
    ) -> HandlerResult {
        let Some(sender) = sender else {
            warn!("JOIN without a user origin");
            return Ok(());
        };
        if self.is_me(sender) {
            self.track_join(channels);
        }
        self.delegate.on_join(sender, channels);
        Ok(())
    }

    fn on_part(
        &mut self,
        sender: Option<&UserId>,
        channels: &[ChannelName],
        message: Option<&str>,
    ) -> HandlerResult {
        let Some(sender) = sender else {
            warn!("PART without a user origin");
            return Ok(());
        };
        if self.is_me(sender) {
            self.track_part(channels);
        }
        self.delegate.on_part(sender, channels, message);
        Ok(())
    }

    fn on_part_all(&mut self, sender: Option<&UserId>) -> HandlerResult {
        match sender {
            Some(sender) if !self.is_me(sender) => Err(HandlerError::NotImplemented),
            _ => {
                self.subscribed.clear();
                Ok(())
            }
        }
    }

    fn on_notice(
        &mut self,
        _sender: Option<&UserId>,
        recipients: &[Recipient],
        text: &str,
    ) -> HandlerResult {
        self.delegate.on_notice(text, recipients);
        Ok(())
    }

    fn on_privmsg(
        &mut self,
        sender: Option<&UserId>,
        recipients: &[Recipient],
        text: &str,
    ) -> HandlerResult {
        let Some(sender) = sender else {
            warn!("PRIVMSG without a user origin");
            return Ok(());
        };
        self.delegate.on_message(text, sender, recipients);
        Ok(())
    }
}
