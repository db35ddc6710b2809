use std::fmt;
use std::io;

/// A trait for abstracting over `fmt::Formatter` and `io::Write`.
/// This allows sharing serialization logic between `Display` and `IrcEncode`.
pub trait IrcSink {
    type Error;
    fn write_str(&mut self, s: &str) -> Result<usize, Self::Error>;
    fn write_char(&mut self, c: char) -> Result<usize, Self::Error>;
    fn return_error(&self, msg: &str) -> Self::Error;
}

impl<'a> IrcSink for fmt::Formatter<'a> {
    type Error = fmt::Error;

    fn write_str(&mut self, s: &str) -> Result<usize, Self::Error> {
        fmt::Write::write_str(self, s).map(|_| s.len())
    }

    fn write_char(&mut self, c: char) -> Result<usize, Self::Error> {
        fmt::Write::write_char(self, c).map(|_| c.len_utf8())
    }

    fn return_error(&self, _msg: &str) -> Self::Error {
        fmt::Error
    }
}

/// Wrapper to adapt `io::Write` to `IrcSink`.
pub struct IoWriteSink<'a, W: ?Sized>(pub &'a mut W);

impl<'a, W: io::Write + ?Sized> IrcSink for IoWriteSink<'a, W> {
    type Error = io::Error;

    fn write_str(&mut self, s: &str) -> Result<usize, Self::Error> {
        self.0.write_all(s.as_bytes()).map(|_| s.len())
    }

    fn write_char(&mut self, c: char) -> Result<usize, Self::Error> {
        let mut buf = [0u8; 4];
        let s = c.encode_utf8(&mut buf);
        self.0.write_all(s.as_bytes()).map(|_| s.len())
    }

    fn return_error(&self, msg: &str) -> Self::Error {
        io::Error::new(io::ErrorKind::InvalidInput, msg)
    }
}

/// Whether a final argument must be written in colon form to survive parsing.
///
/// Middle arguments end at a space or a colon, so either forces the colon
/// form, as does the empty string.
pub fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains([' ', ':'])
}

/// Rejects CR, LF and NUL, which would split or truncate the line.
pub fn validate_param<S: IrcSink + ?Sized>(sink: &S, param: &str) -> Result<(), S::Error> {
    if param
        .as_bytes()
        .iter()
        .any(|&b| b == b'\r' || b == b'\n' || b == 0)
    {
        return Err(sink.return_error("parameter contains CR, LF or NUL"));
    }
    Ok(())
}

/// Writes ` param`, failing if it could not be read back as one middle argument.
pub fn write_middle<S: IrcSink>(sink: &mut S, param: &str) -> Result<usize, S::Error> {
    validate_param(sink, param)?;
    if needs_colon_prefix(param) {
        return Err(sink.return_error("middle parameter is empty or contains space or colon"));
    }
    Ok(sink.write_char(' ')? + sink.write_str(param)?)
}

/// Writes ` :param`.
pub fn write_trailing<S: IrcSink>(sink: &mut S, param: &str) -> Result<usize, S::Error> {
    validate_param(sink, param)?;
    Ok(sink.write_str(" :")? + sink.write_str(param)?)
}

/// Writes the items as one comma separated middle argument.
pub fn write_csv<S, I, T>(sink: &mut S, items: I) -> Result<usize, S::Error>
where
    S: IrcSink,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return Err(sink.return_error("empty list"));
    }
    let mut count = sink.write_char(' ')?;
    for (i, item) in items.enumerate() {
        let item = item.as_ref();
        validate_param(sink, item)?;
        if item.is_empty() || item.contains([' ', ',', ':']) {
            return Err(sink.return_error("list item is empty or contains space, comma or colon"));
        }
        if i > 0 {
            count += sink.write_char(',')?;
        }
        count += sink.write_str(item)?;
    }
    Ok(count)
}

/// Writes raw arguments, using the colon form for the last one only when needed.
pub fn write_args_with_trailing<S, T>(sink: &mut S, args: &[T]) -> Result<usize, S::Error>
where
    S: IrcSink,
    T: AsRef<str>,
{
    let mut count = 0;
    if let Some((last, middle)) = args.split_last() {
        for arg in middle {
            count += write_middle(sink, arg.as_ref())?;
        }
        let last = last.as_ref();
        if needs_colon_prefix(last) {
            count += write_trailing(sink, last)?;
        } else {
            count += write_middle(sink, last)?;
        }
    }
    Ok(count)
}
