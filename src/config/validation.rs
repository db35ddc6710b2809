//! Configuration validation.
//!
//! Runs on the parsed file before any option is built.

use ircwire_proto::NickName;
use thiserror::Error;

use super::types::ConfigFile;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("identity.nickname is not a valid nickname: '{0}'")]
    InvalidNickname(String),
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must not be 0")]
    InvalidPort,
    #[error("identity.username must not be empty")]
    EmptyUsername,
}

/// Validate a configuration file, returning all errors found.
pub(super) fn validate(file: &ConfigFile) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if NickName::new(file.identity.nickname.as_str()).is_none() {
        errors.push(ValidationError::InvalidNickname(
            file.identity.nickname.clone(),
        ));
    }

    if file.server.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if file.server.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    if let Some(ref username) = file.identity.username
        && username.trim().is_empty()
    {
        errors.push(ValidationError::EmptyUsername);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(toml: &str) -> ConfigFile {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn accepts_minimal_file() {
        let f = file(
            r#"
            [server]
            host = "irc.example.net"
            [identity]
            nickname = "noze"
            "#,
        );
        assert!(validate(&f).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let f = file(
            r#"
            [server]
            host = " "
            port = 0
            [identity]
            nickname = "9lives"
            username = ""
            "#,
        );
        let errors = validate(&f).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidNickname("9lives".into()),
                ValidationError::MissingHost,
                ValidationError::InvalidPort,
                ValidationError::EmptyUsername,
            ]
        );
    }
}
