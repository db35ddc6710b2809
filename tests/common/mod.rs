//! Integration test common infrastructure.
//!
//! Provides a scripted in-process IRC server and helpers for waiting on
//! client state and delegate events.

pub mod server;

#[allow(unused_imports)]
pub use server::{ServerConn, TestServer};

use std::time::Duration;

use ircwire::{ClientEvent, ClientState, IrcClient};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

/// Upper bound for any single wait in a test.
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Installs a subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Waits until the client's state satisfies `pred`.
pub async fn wait_for_state<F>(client: &IrcClient, mut pred: F) -> anyhow::Result<ClientState>
where
    F: FnMut(&ClientState) -> bool,
{
    let mut rx = client.watch();
    let snapshot = timeout(TIMEOUT, rx.wait_for(|s| pred(&s.state))).await??;
    Ok(snapshot.state.clone())
}

/// Next delegate event matching `pred`, skipping the rest.
pub async fn wait_for_event<F>(
    events: &mut UnboundedReceiver<ClientEvent>,
    mut pred: F,
) -> anyhow::Result<ClientEvent>
where
    F: FnMut(&ClientEvent) -> bool,
{
    timeout(TIMEOUT, async {
        while let Some(event) = events.recv().await {
            if pred(&event) {
                return Ok(event);
            }
        }
        anyhow::bail!("event channel closed")
    })
    .await?
}
