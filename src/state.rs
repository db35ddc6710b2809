//! Connection lifecycle states.

use std::fmt;

use ircwire_proto::{NickName, UserInfo};

use crate::error::ClientError;

/// Where a client is in its connection lifecycle.
///
/// ```text
/// Disconnected|Error --connect--> Connecting --up--> Registering --001--> Registered
///                                          quit --> RequestedQuit --down--> Quit
/// ```
///
/// A state is a plain value that is cloned into snapshots. It never owns the
/// connection: the writer link and the reader task of a live connection are
/// held by the client task next to the state, which closes them when the
/// connection ends.
#[derive(Debug, Clone)]
pub enum ClientState {
    Disconnected,
    Connecting,
    /// Link up, waiting for the welcome. The link lives in the client task.
    Registering { nick: NickName, user_info: UserInfo },
    /// Welcomed by the server. The link lives in the client task.
    Registered { nick: NickName, user_info: UserInfo },
    Error(ClientError),
    RequestedQuit,
    Quit,
}

impl ClientState {
    /// `connect()` is only honoured from here.
    #[inline]
    pub fn can_start_connection(&self) -> bool {
        matches!(self, Self::Disconnected | Self::Error(_))
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }

    /// Registering or registered, i.e. a link is up.
    #[inline]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Registering { .. } | Self::Registered { .. })
    }

    /// The nickname in use while a link is up.
    pub fn nick(&self) -> Option<&NickName> {
        match self {
            Self::Registering { nick, .. } | Self::Registered { nick, .. } => Some(nick),
            _ => None,
        }
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        match self {
            Self::Registering { user_info, .. } | Self::Registered { user_info, .. } => {
                Some(user_info)
            }
            _ => None,
        }
    }

    pub(crate) fn set_nick(&mut self, new_nick: NickName) {
        if let Self::Registering { nick, .. } | Self::Registered { nick, .. } = self {
            *nick = new_nick;
        }
    }
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("disconnected"),
            Self::Connecting => f.write_str("connecting"),
            Self::Registering { nick, .. } => write!(f, "registering<{nick}>"),
            Self::Registered { nick, .. } => write!(f, "registered<{nick}>"),
            Self::Error(e) => write!(f, "error<{e}>"),
            Self::RequestedQuit => f.write_str("quitting"),
            Self::Quit => f.write_str("quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered() -> ClientState {
        ClientState::Registered {
            nick: NickName::new("noze").unwrap(),
            user_info: UserInfo::with_host("noze", "h", "s", "r"),
        }
    }

    #[test]
    fn only_idle_states_start_connections() {
        assert!(ClientState::Disconnected.can_start_connection());
        assert!(ClientState::Error(ClientError::Stopped).can_start_connection());
        assert!(!ClientState::Connecting.can_start_connection());
        assert!(!registered().can_start_connection());
        assert!(!ClientState::RequestedQuit.can_start_connection());
        assert!(!ClientState::Quit.can_start_connection());
    }

    #[test]
    fn states_are_plain_shareable_values() {
        fn shareable<T: Clone + Send + Sync + 'static>() {}
        shareable::<ClientState>();

        let state = registered();
        let copy = state.clone();
        drop(state);
        assert!(copy.is_connected());
        assert_eq!(copy.nick().unwrap().as_str(), "noze");
    }

    #[test]
    fn nick_is_replaced_in_place() {
        let mut state = registered();
        state.set_nick(NickName::new("other").unwrap());
        assert!(state.is_registered());
        assert_eq!(state.nick().unwrap().as_str(), "other");
        assert_eq!(state.to_string(), "registered<other>");

        let mut idle = ClientState::Disconnected;
        idle.set_nick(NickName::new("x").unwrap());
        assert!(idle.nick().is_none());
    }
}
