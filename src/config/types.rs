//! Core option types and loading.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use ircwire_proto::{NickName, UserInfo};
use serde::Deserialize;
use thiserror::Error;

use super::validation::{self, ValidationError};
use crate::retry::{RetryDecision, RetryInfo, RetryStrategy};

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 6667;

/// Real name sent in `USER` when none is configured.
pub const DEFAULT_REALNAME: &str = "NIO IRC User";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The file as it sits on disk.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ConfigFile {
    pub server: ServerSection,
    pub identity: IdentitySection,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// `[server]`
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ServerSection {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub password: Option<String>,
}

/// `[identity]`
#[derive(Debug, Clone, Deserialize)]
pub(super) struct IdentitySection {
    pub nickname: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub realname: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_attempts() -> u32 {
    10
}

fn default_step_ms() -> u64 {
    200
}

/// Settings for the built-in linear retry policy (`[retry]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RetryConfig {
    /// Attempts after which the policy gives up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay added per attempt, in milliseconds.
    #[serde(default = "default_step_ms")]
    pub step_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            step_ms: default_step_ms(),
        }
    }
}

impl RetryConfig {
    /// Retry after `attempt * step_ms` while attempts remain, else stop.
    pub fn decide(&self, info: &RetryInfo) -> RetryDecision {
        if info.attempt < self.max_attempts {
            RetryDecision::RetryAfter(Duration::from_millis(
                self.step_ms.saturating_mul(u64::from(info.attempt)),
            ))
        } else {
            RetryDecision::Stop
        }
    }
}

/// Everything a client needs to connect and register.
#[derive(Clone)]
pub struct ClientOptions {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Connection password, sent as `PASS` before registering.
    pub password: Option<String>,
    /// Nickname to register with.
    pub nickname: NickName,
    /// Explicit `USER` record. See [`ClientOptions::user_info`].
    pub user_info: Option<UserInfo>,
    /// Built-in retry policy settings.
    pub retry: RetryConfig,
    /// Replaces the built-in policy when set.
    pub retry_strategy: Option<RetryStrategy>,
}

impl ClientOptions {
    /// Options for `localhost` on the default port.
    pub fn new(nickname: NickName) -> Self {
        Self {
            host: "localhost".to_owned(),
            port: DEFAULT_PORT,
            password: None,
            nickname,
            user_info: None,
            retry: RetryConfig::default(),
            retry_strategy: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_user_info(mut self, info: UserInfo) -> Self {
        self.user_info = Some(info);
        self
    }

    pub fn with_retry_strategy(
        mut self,
        strategy: impl Fn(&RetryInfo) -> RetryDecision + Send + Sync + 'static,
    ) -> Self {
        self.retry_strategy = Some(Arc::new(strategy));
        self
    }

    /// The `USER` record to register with.
    ///
    /// Defaults to the nickname as username, the host as both hostname and
    /// servername, and [`DEFAULT_REALNAME`].
    pub fn user_info(&self) -> UserInfo {
        self.user_info.clone().unwrap_or_else(|| {
            UserInfo::with_host(
                self.nickname.as_str(),
                self.host.as_str(),
                self.host.as_str(),
                DEFAULT_REALNAME,
            )
        })
    }

    /// Asks the configured retry policy what to do next.
    pub fn retry_decision(&self, info: &RetryInfo) -> RetryDecision {
        match &self.retry_strategy {
            Some(strategy) => strategy(info),
            None => self.retry.decide(info),
        }
    }

    /// Load options from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        validation::validate(&file).map_err(ConfigError::Invalid)?;

        let ConfigFile {
            server,
            identity,
            retry,
        } = file;
        let nickname = NickName::new(identity.nickname.as_str()).ok_or_else(|| {
            ConfigError::Invalid(vec![ValidationError::InvalidNickname(
                identity.nickname.clone(),
            )])
        })?;

        let user_info = if identity.username.is_some() || identity.realname.is_some() {
            Some(UserInfo::with_host(
                identity
                    .username
                    .unwrap_or_else(|| nickname.as_str().to_owned()),
                server.host.as_str(),
                server.host.as_str(),
                identity
                    .realname
                    .unwrap_or_else(|| DEFAULT_REALNAME.to_owned()),
            ))
        } else {
            None
        };

        Ok(Self {
            host: server.host,
            port: server.port,
            password: server.password,
            nickname,
            user_info,
            retry,
            retry_strategy: None,
        })
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("nickname", &self.nickname)
            .field("user_info", &self.user_info)
            .field("retry", &self.retry)
            .field(
                "retry_strategy",
                &self.retry_strategy.as_ref().map(|_| "<custom>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn nick(s: &str) -> NickName {
        NickName::new(s).unwrap()
    }

    #[test]
    fn default_user_info_follows_host_and_nick() {
        let opts = ClientOptions::new(nick("noze")).with_host("irc.example.net");
        let info = opts.user_info();
        assert_eq!(info.username, "noze");
        assert_eq!(info.hostname.as_deref(), Some("irc.example.net"));
        assert_eq!(info.servername.as_deref(), Some("irc.example.net"));
        assert_eq!(info.realname, DEFAULT_REALNAME);
        assert_eq!(opts.port, 6667);
    }

    #[test]
    fn loads_full_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            [server]
            host = "irc.example.net"
            port = 6697
            password = "secret"

            [identity]
            nickname = "noze"
            username = "nz"
            realname = "Noze Bot"

            [retry]
            max_attempts = 3
            step_ms = 50
            "#
        )
        .unwrap();

        let opts = ClientOptions::load(tmp.path()).unwrap();
        assert_eq!(opts.host, "irc.example.net");
        assert_eq!(opts.port, 6697);
        assert_eq!(opts.password.as_deref(), Some("secret"));
        assert_eq!(opts.nickname, nick("NOZE"));
        let info = opts.user_info();
        assert_eq!(info.username, "nz");
        assert_eq!(info.realname, "Noze Bot");
        assert_eq!(
            opts.retry,
            RetryConfig {
                max_attempts: 3,
                step_ms: 50
            }
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientOptions::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let err = ClientOptions::from_toml_str("[server\nhost=").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_reported_together() {
        let err = ClientOptions::from_toml_str(
            r#"
            [server]
            host = ""
            port = 0
            [identity]
            nickname = "-bad"
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn builtin_policy_is_linear_then_stops() {
        let cfg = RetryConfig::default();
        let mut info = RetryInfo::default();
        info.attempt = 3;
        match cfg.decide(&info) {
            RetryDecision::RetryAfter(d) => assert_eq!(d, Duration::from_millis(600)),
            other => panic!("unexpected {other:?}"),
        }
        info.attempt = 10;
        assert!(matches!(cfg.decide(&info), RetryDecision::Stop));
    }

    #[test]
    fn custom_strategy_overrides_builtin() {
        let opts = ClientOptions::new(nick("noze")).with_retry_strategy(|_| RetryDecision::Stop);
        assert!(matches!(
            opts.retry_decision(&RetryInfo::default()),
            RetryDecision::Stop
        ));
        assert!(format!("{opts:?}").contains("<custom>"));
    }
}
