//! Reconnect bookkeeping and the retry policy hook.
//!
//! The client only records attempts and outcomes in [`RetryInfo`]. Deciding
//! whether and when to reconnect belongs to the caller, through
//! [`ClientOptions::retry_decision`](crate::ClientOptions::retry_decision).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::ClientError;

/// Connection history fed to the retry policy.
#[derive(Debug, Clone)]
pub struct RetryInfo {
    /// Connect attempts since the last successful connect.
    pub attempt: u32,
    /// When the transport last came up.
    pub last_connect: DateTime<Utc>,
    /// Successful connects over the client's lifetime.
    pub times_connected: u32,
    /// The most recent transport or connect error.
    pub last_error: Option<ClientError>,
}

impl Default for RetryInfo {
    fn default() -> Self {
        Self {
            attempt: 0,
            last_connect: Utc::now(),
            times_connected: 0,
            last_error: None,
        }
    }
}

impl RetryInfo {
    pub(crate) fn record_attempt(&mut self) {
        self.attempt = self.attempt.saturating_add(1);
    }

    pub(crate) fn record_connected(&mut self) {
        self.attempt = 0;
        self.last_connect = Utc::now();
        self.times_connected = self.times_connected.saturating_add(1);
        self.last_error = None;
    }

    pub(crate) fn record_error(&mut self, error: ClientError) {
        self.last_error = Some(error);
    }

    /// Time elapsed since the transport last came up.
    pub fn since_last_connect(&self) -> chrono::Duration {
        Utc::now() - self.last_connect
    }
}

/// What the retry policy wants done after a failed or lost connection.
#[derive(Debug, Clone)]
pub enum RetryDecision {
    /// Connect again after the delay.
    RetryAfter(Duration),
    /// Give up and report the error.
    Fail(ClientError),
    /// Give up quietly.
    Stop,
}

impl RetryDecision {
    /// `RetryAfter` with a delay in milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        Self::RetryAfter(Duration::from_millis(ms))
    }
}

/// A user supplied retry policy.
pub type RetryStrategy = Arc<dyn Fn(&RetryInfo) -> RetryDecision + Send + Sync>;
