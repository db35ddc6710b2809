use super::super::types::Command;
use super::{expect_between, split_channels};
use crate::error::ParseError;
use crate::mode::{parse_mode_changes, ChannelMode, ModeChanges, UserMode};
use crate::recipient::Recipient;

pub(super) fn parse<S: AsRef<str>>(cmd: &str, args: &[S]) -> Result<Command, ParseError> {
    let arg = |i: usize| args[i].as_ref();
    let result = match cmd {
        "JOIN" => {
            expect_between(cmd, args, 1, 2)?;
            if arg(0) == "0" {
                Command::JOIN0
            } else {
                let channels = split_channels(arg(0))?;
                let keys = args
                    .get(1)
                    .map(|k| k.as_ref())
                    .filter(|k| !k.is_empty())
                    .map(|k| k.split(',').map(str::to_owned).collect());
                Command::JOIN(channels, keys)
            }
        }
        "PART" => {
            expect_between(cmd, args, 1, 2)?;
            Command::PART(
                split_channels(arg(0))?,
                args.get(1).map(|m| m.as_ref().to_owned()),
            )
        }
        "LIST" => {
            expect_between(cmd, args, 0, 2)?;
            let channels = match args.first().map(|c| c.as_ref()) {
                None | Some("") | Some("*") => None,
                Some(list) => Some(split_channels(list)?),
            };
            Command::LIST(channels, args.get(1).map(|t| t.as_ref().to_owned()))
        }
        "MODE" => {
            expect_between(cmd, args, 1, usize::MAX)?;
            parse_mode(arg(0), &args[1..])?
        }
        _ => Command::Other(cmd.to_owned(), super::owned(args)),
    };
    Ok(result)
}

/// The target decides between user and channel modes. A channel query for
/// exactly `b` is the ban-mask listing, not a change.
fn parse_mode<S: AsRef<str>>(target: &str, changes: &[S]) -> Result<Command, ParseError> {
    match target.parse::<Recipient>()? {
        Recipient::Everything => Err(ParseError::InvalidMessageTarget(target.to_owned())),
        Recipient::Nickname(nick) if changes.is_empty() => Ok(Command::UserMODEGET(nick)),
        Recipient::Nickname(nick) => {
            let changes: ModeChanges<UserMode> = parse_mode_changes(changes);
            Ok(Command::UserMODE(nick, changes))
        }
        Recipient::Channel(channel) if changes.is_empty() => Ok(Command::ChannelMODEGET(channel)),
        Recipient::Channel(channel) => {
            let changes: ModeChanges<ChannelMode> = parse_mode_changes(changes);
            if changes.add == ChannelMode::BAN_MASK && changes.remove.is_empty() {
                Ok(Command::ChannelMODEGETBANMASK(channel))
            } else {
                Ok(Command::ChannelMODE(channel, changes))
            }
        }
    }
}
