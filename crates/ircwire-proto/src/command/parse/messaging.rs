use super::super::types::Command;
use super::{expect_between, expect_exactly, split_recipients};
use crate::error::ParseError;
use crate::nick::NickName;

pub(super) fn parse<S: AsRef<str>>(cmd: &str, args: &[S]) -> Result<Command, ParseError> {
    let result = match cmd {
        "PRIVMSG" | "NOTICE" => {
            expect_exactly(cmd, args, 2)?;
            let recipients = split_recipients(args[0].as_ref())?;
            let text = args[1].as_ref().to_owned();
            if cmd == "PRIVMSG" {
                Command::PRIVMSG(recipients, text)
            } else {
                Command::NOTICE(recipients, text)
            }
        }
        "ISON" => {
            expect_between(cmd, args, 1, usize::MAX)?;
            let nicks = args
                .iter()
                .flat_map(|arg| arg.as_ref().split_whitespace())
                .map(str::parse::<NickName>)
                .collect::<Result<_, _>>()?;
            Command::ISON(nicks)
        }
        _ => Command::Other(cmd.to_owned(), super::owned(args)),
    };
    Ok(result)
}
