//! Wire serialization shared by `Display` and [`IrcEncode`](crate::encode::IrcEncode).

use std::fmt;

use super::types::Command;
use super::util::{
    write_args_with_trailing, write_csv, write_middle, write_trailing, IrcSink,
};
use crate::mode::{ModeChanges, ModeType};

/// `+add-remove` as one trailing argument when both sides are set, a bare
/// token when one side is, and an empty trailing argument when neither is.
fn write_mode_changes<S: IrcSink, T: ModeType>(
    sink: &mut S,
    changes: &ModeChanges<T>,
) -> Result<usize, S::Error> {
    let token = changes.to_token();
    if changes.add.is_none() || changes.remove.is_none() {
        if token.is_empty() {
            return write_trailing(sink, "");
        }
        return write_middle(sink, &token);
    }
    write_trailing(sink, &token)
}

/// Writes the command token, the optional `target`, then the arguments.
///
/// No line terminator is written.
pub(crate) fn write_command<S: IrcSink>(
    sink: &mut S,
    command: &Command,
    target: Option<&str>,
) -> Result<usize, S::Error> {
    let mut n = match command.static_name() {
        Some(name) => sink.write_str(name)?,
        None => sink.write_str(&command.name())?,
    };
    if let Some(target) = target {
        n += write_middle(sink, target)?;
    }

    n += match command {
        Command::NICK(nick) | Command::UserMODEGET(nick) => write_middle(sink, nick.as_str())?,
        Command::USER(info) => {
            let mut n = write_middle(sink, &info.username)?;
            match info.usermask {
                Some(mask) => {
                    n += write_middle(sink, &mask.mask().to_string())?;
                    n += write_middle(sink, "*")?;
                }
                None => {
                    n += write_middle(sink, info.hostname.as_deref().unwrap_or("*"))?;
                    n += write_middle(sink, info.servername.as_deref().unwrap_or("*"))?;
                }
            }
            n + write_trailing(sink, &info.realname)?
        }
        Command::ISON(nicks) => {
            let mut n = 0;
            for nick in nicks {
                n += write_middle(sink, nick.as_str())?;
            }
            n
        }
        Command::QUIT(None) => 0,
        Command::QUIT(Some(message)) => write_trailing(sink, message)?,
        Command::PING(server, None) | Command::PONG(server, None) => write_trailing(sink, server)?,
        Command::PING(server, Some(server2)) | Command::PONG(server, Some(server2)) => {
            write_middle(sink, server)? + write_trailing(sink, server2)?
        }
        Command::JOIN(channels, keys) => {
            let mut n = write_csv(sink, channels)?;
            if let Some(keys) = keys.as_ref().filter(|k| !k.is_empty()) {
                n += write_csv(sink, keys)?;
            }
            n
        }
        Command::JOIN0 => write_middle(sink, "0")?,
        Command::PART(channels, message) => {
            let mut n = write_csv(sink, channels)?;
            if let Some(message) = message {
                n += write_trailing(sink, message)?;
            }
            n
        }
        Command::LIST(channels, target) => {
            let mut n = 0;
            match channels {
                Some(channels) => n += write_csv(sink, channels)?,
                None if target.is_some() => n += write_middle(sink, "*")?,
                None => {}
            }
            if let Some(target) = target {
                n += write_trailing(sink, target)?;
            }
            n
        }
        Command::PRIVMSG(recipients, text) | Command::NOTICE(recipients, text) => {
            write_csv(sink, recipients)? + write_trailing(sink, text)?
        }
        Command::UserMODE(nick, changes) => {
            write_middle(sink, nick.as_str())? + write_mode_changes(sink, changes)?
        }
        Command::ChannelMODE(channel, changes) => {
            write_middle(sink, channel.as_str())? + write_mode_changes(sink, changes)?
        }
        Command::ChannelMODEGET(channel) => write_middle(sink, channel.as_str())?,
        Command::ChannelMODEGETBANMASK(channel) => {
            write_middle(sink, channel.as_str())? + write_middle(sink, "b")?
        }
        Command::WHOIS(server, masks) => {
            let mut n = 0;
            if let Some(server) = server {
                n += write_middle(sink, server)?;
            }
            n + write_csv(sink, masks)?
        }
        Command::WHO(mask, operators_only) => {
            let mut n = 0;
            if mask.is_some() || *operators_only {
                n += write_middle(sink, mask.as_deref().unwrap_or("*"))?;
            }
            if *operators_only {
                n += write_middle(sink, "o")?;
            }
            n
        }
        Command::CAP(sub, ids) => {
            write_middle(sink, sub.as_str())? + write_trailing(sink, &ids.join(" "))?
        }
        Command::Response(_, args) | Command::Other(_, args) | Command::OtherNumeric(_, args) => {
            write_args_with_trailing(sink, args)?
        }
    };
    Ok(n)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_command(f, self, None).map(|_| ())
    }
}
