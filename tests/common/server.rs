//! Scripted test server.
//!
//! Listens on an ephemeral local port. Each accepted connection is driven by
//! the test line by line.

use std::time::Duration;

use ircwire_proto::{Command, Message};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

use super::TIMEOUT;

/// A listening test server.
pub struct TestServer {
    listener: TcpListener,
}

impl TestServer {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// Waits for the client to connect.
    pub async fn accept(&self) -> anyhow::Result<ServerConn> {
        let (stream, _) = timeout(TIMEOUT, self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(ServerConn {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }
}

/// The server side of one client connection.
pub struct ServerConn {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl ServerConn {
    /// Send a raw line, adding CRLF if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single message from the client.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        self.recv_timeout(TIMEOUT).await
    }

    /// Receive a message with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Message> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("client closed the connection");
        }
        line.parse::<Message>()
            .map_err(|e| anyhow::anyhow!("parse error: {e}"))
    }

    /// Reads the registration burst, up to and including USER.
    pub async fn expect_registration(&mut self) -> anyhow::Result<Vec<Message>> {
        let mut messages = Vec::new();
        loop {
            let msg = self.recv().await?;
            let done = matches!(msg.command, Command::USER(_));
            messages.push(msg);
            if done {
                return Ok(messages);
            }
        }
    }

    /// Sends RPL_WELCOME.
    pub async fn welcome(&mut self, nick: &str) -> anyhow::Result<()> {
        self.send_raw(&format!(":irc.test 001 {nick} :Welcome to the test network"))
            .await
    }

    /// Reads until the client closes its side, returning what arrived.
    pub async fn read_to_close(&mut self) -> anyhow::Result<Vec<Message>> {
        let mut messages = Vec::new();
        loop {
            let mut line = String::new();
            let n = timeout(TIMEOUT, self.reader.read_line(&mut line)).await??;
            if n == 0 {
                return Ok(messages);
            }
            if let Ok(msg) = line.parse::<Message>() {
                messages.push(msg);
            }
        }
    }
}
