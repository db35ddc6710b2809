//! Command variants and their canonical `(name, arguments)` view.
//!
//! # Reference
//! - RFC 1459 Section 4, RFC 2812 Section 3

use crate::chan::ChannelName;
use crate::mode::{ChannelMode, ModeChanges, UserMode};
use crate::nick::NickName;
use crate::recipient::Recipient;
use crate::response::Response;
use crate::user::UserInfo;

use super::subcommands::CapSubCommand;

/// An IRC command with typed parameters.
///
/// Named commands the model does not know become [`Command::Other`], numeric
/// codes outside the reply table become [`Command::OtherNumeric`]. Both keep
/// their raw arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `NICK <nickname>`
    NICK(NickName),
    /// `USER <username> <mask|hostname> <*|servername> :<realname>`
    USER(UserInfo),
    /// `ISON <nickname>...`
    ISON(Vec<NickName>),
    /// `QUIT [:<message>]`
    QUIT(Option<String>),
    /// `PING <server> [<server2>]`
    PING(String, Option<String>),
    /// `PONG <server> [<server2>]`
    PONG(String, Option<String>),

    /// `JOIN <channel>{,<channel>} [<key>{,<key>}]`
    JOIN(Vec<ChannelName>, Option<Vec<String>>),
    /// `JOIN 0`, leave every channel.
    JOIN0,
    /// `PART <channel>{,<channel>} [:<message>]`
    PART(Vec<ChannelName>, Option<String>),
    /// `LIST [<channel>{,<channel>} [<target>]]`
    LIST(Option<Vec<ChannelName>>, Option<String>),

    /// `PRIVMSG <target>{,<target>} :<text>`
    PRIVMSG(Vec<Recipient>, String),
    /// `NOTICE <target>{,<target>} :<text>`
    NOTICE(Vec<Recipient>, String),

    /// `MODE <nickname> <changes>`
    UserMODE(NickName, ModeChanges<UserMode>),
    /// `MODE <nickname>`
    UserMODEGET(NickName),
    /// `MODE <channel> <changes>`
    ChannelMODE(ChannelName, ModeChanges<ChannelMode>),
    /// `MODE <channel>`
    ChannelMODEGET(ChannelName),
    /// `MODE <channel> b`, list the ban masks.
    ChannelMODEGETBANMASK(ChannelName),

    /// `WHOIS [<server>] <mask>{,<mask>}`
    WHOIS(Option<String>, Vec<String>),
    /// `WHO [<mask> [o]]`, the flag restricting the reply to operators.
    WHO(Option<String>, bool),

    /// `CAP <subcommand> [:<capability>...]`
    CAP(CapSubCommand, Vec<String>),

    /// A known numeric reply.
    Response(Response, Vec<String>),
    /// A named command the model does not know, uppercased.
    Other(String, Vec<String>),
    /// A numeric code outside the reply table.
    OtherNumeric(u16, Vec<String>),
}

fn csv<T: AsRef<str>>(items: &[T]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(item.as_ref());
    }
    out
}

impl Command {
    /// The wire command token. Numerics are zero padded to three digits.
    pub fn name(&self) -> String {
        match self {
            Command::Response(r, _) => r.to_string(),
            Command::OtherNumeric(code, _) => format!("{code:03}"),
            Command::Other(name, _) => name.clone(),
            _ => self.static_name().unwrap_or_default().to_owned(),
        }
    }

    /// The token of a named command without allocating.
    pub(crate) fn static_name(&self) -> Option<&'static str> {
        Some(match self {
            Command::NICK(_) => "NICK",
            Command::USER(_) => "USER",
            Command::ISON(_) => "ISON",
            Command::QUIT(_) => "QUIT",
            Command::PING(..) => "PING",
            Command::PONG(..) => "PONG",
            Command::JOIN(..) | Command::JOIN0 => "JOIN",
            Command::PART(..) => "PART",
            Command::LIST(..) => "LIST",
            Command::PRIVMSG(..) => "PRIVMSG",
            Command::NOTICE(..) => "NOTICE",
            Command::UserMODE(..)
            | Command::UserMODEGET(_)
            | Command::ChannelMODE(..)
            | Command::ChannelMODEGET(_)
            | Command::ChannelMODEGETBANMASK(_) => "MODE",
            Command::WHOIS(..) => "WHOIS",
            Command::WHO(..) => "WHO",
            Command::CAP(..) => "CAP",
            Command::Response(..) | Command::Other(..) | Command::OtherNumeric(..) => return None,
        })
    }

    /// Whether this is a numeric reply, known or not.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Command::Response(..) | Command::OtherNumeric(..))
    }

    /// The argument list this command encodes to.
    ///
    /// Parsing `name()` with these arguments gives back an equal list.
    pub fn arguments(&self) -> Vec<String> {
        match self {
            Command::NICK(nick) | Command::UserMODEGET(nick) => vec![nick.to_string()],
            Command::USER(info) => {
                let (second, third) = match info.usermask {
                    Some(mask) => (mask.mask().to_string(), "*".to_owned()),
                    None => (
                        info.hostname.clone().unwrap_or_else(|| "*".into()),
                        info.servername.clone().unwrap_or_else(|| "*".into()),
                    ),
                };
                vec![info.username.clone(), second, third, info.realname.clone()]
            }
            Command::ISON(nicks) => nicks.iter().map(|n| n.to_string()).collect(),
            Command::QUIT(message) => message.iter().cloned().collect(),
            Command::PING(server, server2) | Command::PONG(server, server2) => {
                std::iter::once(server.clone()).chain(server2.clone()).collect()
            }
            Command::JOIN(channels, keys) => std::iter::once(csv(channels))
                .chain(keys.as_deref().filter(|k| !k.is_empty()).map(csv))
                .collect(),
            Command::JOIN0 => vec!["0".to_owned()],
            Command::PART(channels, message) => std::iter::once(csv(channels))
                .chain(message.clone())
                .collect(),
            Command::LIST(channels, target) => match (channels, target) {
                (None, None) => Vec::new(),
                (Some(channels), None) => vec![csv(channels)],
                (channels, Some(target)) => vec![
                    channels.as_deref().map(csv).unwrap_or_else(|| "*".into()),
                    target.clone(),
                ],
            },
            Command::PRIVMSG(recipients, text) | Command::NOTICE(recipients, text) => {
                vec![csv(recipients), text.clone()]
            }
            Command::UserMODE(nick, changes) => vec![nick.to_string(), changes.to_token()],
            Command::ChannelMODE(channel, changes) => {
                vec![channel.to_string(), changes.to_token()]
            }
            Command::ChannelMODEGET(channel) => vec![channel.to_string()],
            Command::ChannelMODEGETBANMASK(channel) => vec![channel.to_string(), "b".into()],
            Command::WHOIS(server, masks) => server.iter().cloned().chain([csv(masks)]).collect(),
            Command::WHO(mask, operators_only) => {
                let mut args = Vec::new();
                if mask.is_some() || *operators_only {
                    args.push(mask.clone().unwrap_or_else(|| "*".into()));
                }
                if *operators_only {
                    args.push("o".into());
                }
                args
            }
            Command::CAP(sub, ids) => vec![sub.as_str().to_owned(), ids.join(" ")],
            Command::Response(_, args) | Command::Other(_, args) | Command::OtherNumeric(_, args) => {
                args.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chan(s: &str) -> ChannelName {
        ChannelName::new(s).unwrap()
    }

    #[test]
    fn names_are_wire_tokens() {
        assert_eq!(Command::JOIN0.name(), "JOIN");
        assert_eq!(Command::ChannelMODEGET(chan("#a")).name(), "MODE");
        assert_eq!(Command::Response(Response::RPL_WELCOME, vec![]).name(), "001");
        assert_eq!(Command::OtherNumeric(42, vec![]).name(), "042");
        assert_eq!(Command::Other("FOO".into(), vec![]).name(), "FOO");
    }

    #[test]
    fn list_without_channels_uses_star() {
        let cmd = Command::LIST(None, Some("irc.example".into()));
        assert_eq!(cmd.arguments(), ["*", "irc.example"]);
        assert!(Command::LIST(None, None).arguments().is_empty());
    }

    #[test]
    fn user_arguments_follow_form() {
        let cmd = Command::USER(UserInfo::with_mask("u", UserMode::INVISIBLE, "Real Name"));
        assert_eq!(cmd.arguments(), ["u", "8", "*", "Real Name"]);
        let cmd = Command::USER(UserInfo::with_host("u", "h", "s", "R"));
        assert_eq!(cmd.arguments(), ["u", "h", "s", "R"]);
    }

    #[test]
    fn ban_mask_query_arguments() {
        let cmd = Command::ChannelMODEGETBANMASK(chan("#rust"));
        assert_eq!(cmd.arguments(), ["#rust", "b"]);
    }
}
