use super::super::types::Command;
use super::{expect_between, expect_exactly};
use crate::command::CapSubCommand;
use crate::error::ParseError;
use crate::mode::UserMode;
use crate::nick::NickName;
use crate::user::UserInfo;

pub(super) fn parse<S: AsRef<str>>(cmd: &str, args: &[S]) -> Result<Command, ParseError> {
    let arg = |i: usize| args[i].as_ref();
    let result = match cmd {
        "NICK" => {
            expect_exactly(cmd, args, 1)?;
            Command::NICK(arg(0).parse::<NickName>()?)
        }
        "USER" => {
            // RFC 1459: <username> <hostname> <servername> <realname>
            // RFC 2812: <username> <mode> <unused> <realname>
            expect_exactly(cmd, args, 4)?;
            let info = match arg(1).parse::<u16>() {
                Ok(mask) => UserInfo::with_mask(arg(0), UserMode::from_mask(mask), arg(3)),
                Err(_) => UserInfo::with_host(arg(0), arg(1), arg(2), arg(3)),
            };
            Command::USER(info)
        }
        "QUIT" => {
            expect_between(cmd, args, 0, 1)?;
            Command::QUIT(args.first().map(|s| s.as_ref().to_owned()))
        }
        "PING" | "PONG" => {
            expect_between(cmd, args, 1, 2)?;
            let server = arg(0).to_owned();
            let server2 = args.get(1).map(|s| s.as_ref().to_owned());
            if cmd == "PING" {
                Command::PING(server, server2)
            } else {
                Command::PONG(server, server2)
            }
        }
        "CAP" => {
            expect_between(cmd, args, 1, 3)?;
            // Server replies carry the client's nick (or `*`) first.
            let targeted = args.len() == 3
                || (args.len() == 2 && arg(0).parse::<CapSubCommand>().is_err());
            let args = if targeted {
                tracing::debug!(cap_target = arg(0), "skipping CAP target");
                &args[1..]
            } else {
                args
            };
            let sub = args[0].as_ref().parse::<CapSubCommand>()?;
            let ids = args
                .get(1)
                .map(|ids| ids.as_ref().split_whitespace().map(str::to_owned).collect())
                .unwrap_or_default();
            Command::CAP(sub, ids)
        }
        _ => Command::Other(cmd.to_owned(), super::owned(args)),
    };
    Ok(result)
}
