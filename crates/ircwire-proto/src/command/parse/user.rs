use super::super::types::Command;
use super::expect_between;
use crate::error::ParseError;

pub(super) fn parse<S: AsRef<str>>(cmd: &str, args: &[S]) -> Result<Command, ParseError> {
    let result = match cmd {
        "WHOIS" => {
            expect_between(cmd, args, 1, 2)?;
            let raw_masks = args[args.len() - 1].as_ref();
            let server = (args.len() == 2).then(|| args[0].as_ref().to_owned());
            let masks: Vec<String> = raw_masks
                .split(',')
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
                .collect();
            if masks.is_empty() {
                return Err(ParseError::InvalidMask {
                    command: cmd.to_owned(),
                    mask: raw_masks.to_owned(),
                });
            }
            Command::WHOIS(server, masks)
        }
        "WHO" => {
            expect_between(cmd, args, 0, 2)?;
            let mask = args.first().map(|m| m.as_ref().to_owned());
            let operators_only = args.get(1).is_some_and(|o| o.as_ref() == "o");
            Command::WHO(mask, operators_only)
        }
        _ => Command::Other(cmd.to_owned(), super::owned(args)),
    };
    Ok(result)
}
