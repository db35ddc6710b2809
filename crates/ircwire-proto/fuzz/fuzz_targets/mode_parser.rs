//! Fuzz target for mode change parsing.

#![no_main]

use ircwire_proto::mode::{parse_mode_changes, ChannelMode, UserMode};
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > 256 {
            return;
        }
        let pieces: Vec<&str> = input.split_whitespace().collect();
        let _ = parse_mode_changes::<ChannelMode, _>(&pieces).to_token();
        let _ = parse_mode_changes::<UserMode, _>(&pieces).to_token();
    }
});
