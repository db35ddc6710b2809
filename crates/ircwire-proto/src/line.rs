//! Line framing shared by [`MessageParser`](crate::parser::MessageParser)
//! and the tokio codec.

use bytes::BytesMut;

/// Splits newline-terminated lines off the front of a buffer.
///
/// Remembers how far the buffer was already scanned, so bytes that arrive in
/// small chunks are only looked at once.
#[derive(Debug, Default)]
pub struct LineFramer {
    /// Index of next byte to check for newline
    next_index: usize,
}

impl LineFramer {
    /// Create a framer with nothing scanned yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the next complete line from `buf`, terminator included.
    ///
    /// Returns `None` and leaves the partial line in place when no line feed
    /// has arrived yet.
    pub fn next_line(&mut self, buf: &mut BytesMut) -> Option<BytesMut> {
        // The caller may have drained the buffer behind our back.
        if self.next_index > buf.len() {
            self.next_index = 0;
        }
        match buf[self.next_index..].iter().position(|b| *b == b'\n') {
            Some(offset) => {
                let line = buf.split_to(self.next_index + offset + 1);
                self.next_index = 0;
                Some(line)
            }
            None => {
                self.next_index = buf.len();
                None
            }
        }
    }

    /// Forget the scan position, for when the buffer is cleared.
    pub fn reset(&mut self) {
        self.next_index = 0;
    }
}

/// Strips a trailing `\n` and the `\r` before it, if any.
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
