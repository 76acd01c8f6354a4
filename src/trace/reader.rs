//! Forward-only line source over a trace stream.

use std::io::BufRead;

use super::error::TraceError;

/// Yields trace lines one at a time and tracks the current line number.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, since
/// make prints file names verbatim. Trailing `\n` and `\r\n` are removed.
pub(crate) struct TraceLines<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> TraceLines<R> {
    pub(crate) const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
        }
    }

    /// Number of the line most recently returned by [`Self::next_line`].
    pub(crate) const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line, or `None` at end of input.
    pub(crate) fn next_line(&mut self) -> Result<Option<String>, TraceError> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| TraceError::Io {
                line_number: self.line_number,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
