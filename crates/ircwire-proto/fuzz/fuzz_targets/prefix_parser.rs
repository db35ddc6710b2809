//! Fuzz target for `nick!user@host` origin parsing.

#![no_main]

use ircwire_proto::UserId;
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > 256 {
            return;
        }
        if let Some(user) = UserId::parse(input) {
            let _ = user.to_string();
        }
    }
});
