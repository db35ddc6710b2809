//! The client handle and the task that owns its connection.
//!
//! [`IrcClient`] is a cloneable handle. Every call is forwarded over a channel
//! to a single task that owns the [`ClientMachine`], the link and the reader,
//! so connection state is only ever touched from that task:
//!
//! ```text
//!  IrcClient ──requests──▶ ┌──────────────────────────┐
//!                          │  client task (select!)   │──▶ Link ──▶ writer task
//!  reader task ──events──▶ │   ClientMachine          │
//!  connect task ─events──▶ └────────────┬─────────────┘
//!                                       └──▶ watch: ClientSnapshot
//! ```
//!
//! Events carry the generation of the connection attempt that produced them;
//! events from an earlier attempt are dropped.

use std::io;
use std::sync::Arc;

use futures_util::StreamExt;
use ircwire_proto::{
    ChannelName, Command, IrcCodec, Message, NickName, ParseError, ProtocolError, UserMode,
};
use tokio::io::AsyncRead;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::codec::FramedRead;
use tracing::{debug, instrument, trace, warn};

use crate::config::ClientOptions;
use crate::connector::{Connector, TcpConnector};
use crate::delegate::ClientDelegate;
use crate::error::ClientError;
use crate::link::{Completion, Link};
use crate::machine::ClientMachine;
use crate::retry::{RetryDecision, RetryInfo};
use crate::state::ClientState;

/// What a client looked like after its task last ran.
#[derive(Debug, Clone)]
pub struct ClientSnapshot {
    pub state: ClientState,
    pub retry_info: RetryInfo,
    pub user_mode: UserMode,
    /// `nick!~user@host` while registered.
    pub usermask: Option<String>,
}

impl ClientSnapshot {
    fn of(machine: &ClientMachine) -> Self {
        Self {
            state: machine.state().clone(),
            retry_info: machine.retry_info().clone(),
            user_mode: machine.user_mode(),
            usermask: machine.usermask(),
        }
    }
}

enum Request {
    Connect,
    Close,
    Quit(Option<String>),
    Send {
        messages: Vec<Message>,
        done: Option<Completion>,
    },
}

enum Event<S> {
    Connected {
        generation: u64,
        result: io::Result<S>,
    },
    Inbound {
        generation: u64,
        item: Result<Message, ParseError>,
    },
    ReadFailed {
        generation: u64,
        error: ProtocolError,
    },
    ReadClosed {
        generation: u64,
    },
    WriteFailed {
        generation: u64,
        error: ClientError,
    },
}

impl<S> Event<S> {
    fn generation(&self) -> u64 {
        match self {
            Self::Connected { generation, .. }
            | Self::Inbound { generation, .. }
            | Self::ReadFailed { generation, .. }
            | Self::ReadClosed { generation }
            | Self::WriteFailed { generation, .. } => *generation,
        }
    }
}

/// Handle to an IRC client connection.
///
/// Dropping every handle stops the client task and closes the link.
#[derive(Clone)]
pub struct IrcClient {
    requests: mpsc::UnboundedSender<Request>,
    snapshot: watch::Receiver<ClientSnapshot>,
    options: Arc<ClientOptions>,
}

impl IrcClient {
    /// Spawns a client that connects over TCP.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(options: ClientOptions, delegate: Arc<dyn ClientDelegate>) -> Self {
        Self::with_connector(options, delegate, TcpConnector)
    }

    /// Spawns a client that opens its streams through `connector`.
    pub fn with_connector<C: Connector>(
        options: ClientOptions,
        delegate: Arc<dyn ClientDelegate>,
        connector: C,
    ) -> Self {
        let options = Arc::new(options);
        let machine = ClientMachine::new(Arc::clone(&options), delegate);
        let (snapshot_tx, snapshot) = watch::channel(ClientSnapshot::of(&machine));
        let (requests, requests_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let task = ClientTask {
            machine,
            connector: Arc::new(connector),
            requests: requests_rx,
            events_tx,
            events: events_rx,
            link: None,
            reader: None,
            generation: 0,
            snapshot: snapshot_tx,
        };
        tokio::spawn(task.run());

        Self {
            requests,
            snapshot,
            options,
        }
    }

    /// Starts connecting. Ignored unless disconnected or failed.
    pub fn connect(&self) {
        self.request(Request::Connect);
    }

    /// Drops the connection without a QUIT.
    pub fn close(&self) {
        self.request(Request::Close);
    }

    /// Sends QUIT and closes the connection.
    pub fn quit(&self, message: Option<String>) {
        self.request(Request::Quit(message));
    }

    /// Sends one command, ignoring the outcome.
    pub fn send(&self, command: Command) {
        self.request(Request::Send {
            messages: vec![Message::from(command)],
            done: None,
        });
    }

    /// Sends a batch with a single flush and waits for it to be written.
    pub async fn send_batch(&self, messages: Vec<Message>) -> Result<(), ClientError> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send(Request::Send {
                messages,
                done: Some(tx),
            })
            .map_err(|_| ClientError::Stopped)?;
        rx.await.unwrap_or(Err(ClientError::Stopped))
    }

    pub fn change_nick(&self, nick: NickName) {
        self.send(Command::NICK(nick));
    }

    pub fn join(&self, channels: Vec<ChannelName>, keys: Option<Vec<String>>) {
        self.send(Command::JOIN(channels, keys));
    }

    pub fn part(&self, channels: Vec<ChannelName>, message: Option<String>) {
        self.send(Command::PART(channels, message));
    }

    pub fn state(&self) -> ClientState {
        self.snapshot.borrow().state.clone()
    }

    pub fn retry_info(&self) -> RetryInfo {
        self.snapshot.borrow().retry_info.clone()
    }

    pub fn user_mode(&self) -> UserMode {
        self.snapshot.borrow().user_mode
    }

    /// `nick!~user@host` while registered.
    pub fn usermask(&self) -> Option<String> {
        self.snapshot.borrow().usermask.clone()
    }

    /// Asks the retry policy what to do about the current connection history.
    pub fn retry_decision(&self) -> RetryDecision {
        self.options.retry_decision(&self.retry_info())
    }

    /// Follows state changes.
    pub fn watch(&self) -> watch::Receiver<ClientSnapshot> {
        self.snapshot.clone()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn request(&self, request: Request) {
        if self.requests.send(request).is_err() {
            debug!("client task is gone");
        }
    }
}

struct ClientTask<C: Connector> {
    machine: ClientMachine,
    connector: Arc<C>,
    requests: mpsc::UnboundedReceiver<Request>,
    events_tx: mpsc::UnboundedSender<Event<C::Stream>>,
    events: mpsc::UnboundedReceiver<Event<C::Stream>>,
    link: Option<Link>,
    reader: Option<JoinHandle<()>>,
    generation: u64,
    snapshot: watch::Sender<ClientSnapshot>,
}

impl<C: Connector> ClientTask<C> {
    #[instrument(
        skip(self),
        fields(host = %self.machine.options().host, port = self.machine.options().port),
        name = "client"
    )]
    async fn run(mut self) {
        loop {
            tokio::select! {
                request = self.requests.recv() => match request {
                    Some(request) => self.on_request(request),
                    None => break,
                },
                Some(event) = self.events.recv() => self.on_event(event),
            }
            self.apply_effects();
            self.publish();
        }
        debug!("all handles dropped, shutting down");
        if let Some(link) = self.link.take() {
            link.close();
        }
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }

    fn on_request(&mut self, request: Request) {
        match request {
            Request::Connect => {
                if self.machine.connect() {
                    self.start_connect();
                }
            }
            Request::Close => self.machine.close(),
            Request::Quit(message) => self.machine.quit(message),
            Request::Send { messages, done } => match &self.link {
                Some(link) if self.machine.state().is_connected() => link.send(messages, done),
                _ => {
                    debug!(count = messages.len(), state = %self.machine.state(), "not connected, dropping send");
                    if let Some(done) = done {
                        let _ = done.send(Err(ClientError::Stopped));
                    }
                }
            },
        }
    }

    fn start_connect(&mut self) {
        self.detach();
        self.generation += 1;
        let generation = self.generation;
        let connector = Arc::clone(&self.connector);
        let events = self.events_tx.clone();
        let host = self.machine.options().host.clone();
        let port = self.machine.options().port;
        debug!(generation, "connecting");
        tokio::spawn(async move {
            let result = connector.connect(&host, port).await;
            let _ = events.send(Event::Connected { generation, result });
        });
    }

    fn on_event(&mut self, event: Event<C::Stream>) {
        if event.generation() != self.generation {
            trace!(generation = event.generation(), "dropping stale event");
            return;
        }
        match event {
            Event::Connected {
                result: Ok(stream), ..
            } => {
                if !matches!(self.machine.state(), ClientState::Connecting) {
                    debug!(state = %self.machine.state(), "connection no longer wanted");
                    return;
                }
                self.attach(stream);
                if let Err(e) = self.machine.on_connected() {
                    warn!(error = %e, "failed to start registration");
                }
            }
            Event::Connected {
                result: Err(e), ..
            } => {
                if matches!(self.machine.state(), ClientState::Connecting) {
                    self.machine.on_connect_failed(e);
                }
            }
            Event::Inbound { item: Ok(msg), .. } => {
                trace!(command = %msg.command.name(), "received");
                if let Err(e) = self.machine.handle_message(&msg) {
                    debug!(error = %e, "ignoring message");
                }
            }
            Event::Inbound { item: Err(e), .. } => {
                debug!(error = %e, "skipping malformed line");
            }
            Event::ReadFailed { error, .. } => {
                if self.machine.state().is_connected() {
                    self.machine
                        .on_transport_error(ClientError::Channel(Arc::new(error)));
                } else {
                    // A reset after we asked to leave is just the way out.
                    debug!(error = %error, "read failed after close");
                    self.detach();
                    self.machine.on_disconnected();
                }
            }
            Event::ReadClosed { .. } => {
                self.detach();
                self.machine.on_disconnected();
            }
            Event::WriteFailed { error, .. } => {
                if self.machine.state().is_connected() {
                    self.machine.on_transport_error(error);
                } else {
                    debug!(error = %error, "write failed after close");
                }
            }
        }
    }

    fn attach(&mut self, stream: C::Stream) {
        let (read_half, write_half) = tokio::io::split(stream);
        let generation = self.generation;

        let (link, writer) = Link::new(write_half);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            if let Err(error) = writer.await {
                let _ = events.send(Event::WriteFailed { generation, error });
            }
        });

        let events = self.events_tx.clone();
        self.reader = Some(tokio::spawn(read_lines(read_half, generation, events)));
        self.link = Some(link);
    }

    /// Forgets the current link and reader.
    fn detach(&mut self) {
        if let Some(link) = self.link.take() {
            link.close();
        }
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }

    fn apply_effects(&mut self) {
        let effects = self.machine.take_effects();
        if effects.is_empty() {
            return;
        }
        let Some(link) = &self.link else {
            if !effects.messages.is_empty() {
                warn!(count = effects.messages.len(), "no link for queued messages");
            }
            return;
        };
        if !effects.messages.is_empty() {
            link.send(effects.messages, None);
        }
        if effects.close_link {
            // The reader stays up until the peer closes, so the disconnect is
            // still observed.
            link.close();
            self.link = None;
        }
    }

    fn publish(&self) {
        self.snapshot.send_replace(ClientSnapshot::of(&self.machine));
    }
}

async fn read_lines<S, R>(reader: R, generation: u64, events: mpsc::UnboundedSender<Event<S>>)
where
    R: AsyncRead + Unpin,
{
    let mut frames = FramedRead::new(reader, IrcCodec::new());
    while let Some(item) = frames.next().await {
        let event = match item {
            Ok(item) => Event::Inbound { generation, item },
            Err(error) => {
                let _ = events.send(Event::ReadFailed { generation, error });
                return;
            }
        };
        if events.send(event).is_err() {
            return;
        }
    }
    let _ = events.send(Event::ReadClosed { generation });
}
