//! Fuzz target for the incremental message parser.
//!
//! Feeds arbitrary bytes in two chunks and checks that the parser never
//! panics and never yields more results than there are line feeds.

#![no_main]

use ircwire_proto::MessageParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let split = data[0] as usize % data.len();
    let (head, tail) = data.split_at(split);

    let mut parser = MessageParser::new();
    let mut results = parser.feed(head).count();
    results += parser.feed(tail).count();

    let newlines = data.iter().filter(|&&b| b == b'\n').count();
    assert!(results <= newlines);

    // Whatever parsed must encode without panicking.
    let mut parser = MessageParser::new();
    for message in parser.feed(data).flatten() {
        let _ = message.to_string();
    }
});
