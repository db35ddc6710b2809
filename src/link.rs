//! The write half of a connection.
//!
//! A [`Link`] is a cheap handle feeding a writer task. Each submitted batch is
//! encoded in order and flushed once. A message the encoder refuses fails its
//! batch only; an I/O failure ends the writer. Any write queued behind a close
//! or a failure completes with [`ClientError::Stopped`].

use std::future::Future;
use std::sync::Arc;

use futures_util::SinkExt;
use ircwire_proto::{IrcCodec, Message, ProtocolError};
use tokio::io::AsyncWrite;
use tokio::sync::{mpsc, oneshot};
use tokio_util::codec::FramedWrite;
use tracing::{debug, trace, warn};

use crate::error::ClientError;

/// Completion of one submitted batch.
pub(crate) type Completion = oneshot::Sender<Result<(), ClientError>>;

enum LinkOp {
    Write {
        messages: Vec<Message>,
        done: Option<Completion>,
    },
    Close,
}

#[derive(Clone)]
pub(crate) struct Link {
    tx: mpsc::UnboundedSender<LinkOp>,
}

impl Link {
    /// A handle plus the writer future that must be spawned to drive it.
    pub(crate) fn new<W>(
        writer: W,
    ) -> (
        Self,
        impl Future<Output = Result<(), ClientError>> + Send + 'static,
    )
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = FramedWrite::new(writer, IrcCodec::new());
        (Self { tx }, drive_writes(sink, rx))
    }

    /// Queues a batch. `done` fires once it is flushed or has failed.
    pub(crate) fn send(&self, messages: Vec<Message>, done: Option<Completion>) {
        if let Err(mpsc::error::SendError(LinkOp::Write {
            done: Some(done), ..
        })) = self.tx.send(LinkOp::Write { messages, done })
        {
            let _ = done.send(Err(ClientError::Stopped));
        }
    }

    /// Closes the stream after everything already queued.
    pub(crate) fn close(&self) {
        let _ = self.tx.send(LinkOp::Close);
    }
}

async fn drive_writes<W>(
    mut sink: FramedWrite<W, IrcCodec>,
    mut rx: mpsc::UnboundedReceiver<LinkOp>,
) -> Result<(), ClientError>
where
    W: AsyncWrite + Unpin,
{
    let result = loop {
        // Every handle dropped closes the stream too.
        let Some(op) = rx.recv().await else {
            break close_sink(&mut sink).await;
        };
        match op {
            LinkOp::Write { messages, done } => {
                let (result, fatal) = match write_batch(&mut sink, messages).await {
                    Ok(()) => (Ok(()), None),
                    Err(WriteFailure::Refused(e)) => (Err(e), None),
                    Err(WriteFailure::Fatal(e)) => (Err(e.clone()), Some(e)),
                };
                if let Some(done) = done {
                    let _ = done.send(result);
                }
                if let Some(e) = fatal {
                    break Err(e);
                }
            }
            LinkOp::Close => break close_sink(&mut sink).await,
        }
    };

    rx.close();
    while let Ok(op) = rx.try_recv() {
        if let LinkOp::Write {
            done: Some(done), ..
        } = op
        {
            let _ = done.send(Err(ClientError::Stopped));
        }
    }
    debug!("writer finished");
    result
}

enum WriteFailure {
    /// The encoder refused a message; what came before it is still flushed.
    Refused(ClientError),
    Fatal(ClientError),
}

async fn write_batch<W>(
    sink: &mut FramedWrite<W, IrcCodec>,
    messages: Vec<Message>,
) -> Result<(), WriteFailure>
where
    W: AsyncWrite + Unpin,
{
    if messages.is_empty() {
        return Ok(());
    }
    let count = messages.len();
    let mut refused = None;
    for msg in messages {
        match sink.feed(msg).await {
            Ok(()) => {}
            Err(e) if e.is_invalid_message() => {
                warn!(error = %e, "refusing to send message");
                refused = Some(write_error(e));
                break;
            }
            Err(e) => return Err(WriteFailure::Fatal(write_error(e))),
        }
    }
    SinkExt::<Message>::flush(sink)
        .await
        .map_err(|e| WriteFailure::Fatal(write_error(e)))?;
    trace!(count, "flushed batch");
    match refused {
        Some(e) => Err(WriteFailure::Refused(e)),
        None => Ok(()),
    }
}

async fn close_sink<W>(sink: &mut FramedWrite<W, IrcCodec>) -> Result<(), ClientError>
where
    W: AsyncWrite + Unpin,
{
    SinkExt::<Message>::close(sink).await.map_err(write_error)
}

fn write_error(e: ProtocolError) -> ClientError {
    ClientError::Write(Arc::new(e))
}
