//! Incremental UTF-8 decoding over a buffered reader.

use std::io::{self, BufRead};

/// Reads one `char` at a time from a [`BufRead`] source.
///
/// Invalid or truncated UTF-8 decodes to [`char::REPLACEMENT_CHARACTER`],
/// consuming a single byte per bad sequence, so one stray byte never costs
/// the rest of the document. Only failures of the underlying reader are
/// errors.
#[derive(Debug)]
pub(crate) struct CharReader<R> {
    inner: R,
    /// Bytes read but not yet decoded, at most one sequence long.
    lookahead: Vec<u8>,
}

impl<R: BufRead> CharReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            lookahead: Vec::with_capacity(4),
        }
    }

    /// Read the next character, or `None` at end of input.
    pub(crate) fn next_char(&mut self) -> io::Result<Option<char>> {
        if !self.fill_lookahead(1)? {
            return Ok(None);
        }

        let width = utf8_width(self.lookahead[0]).unwrap_or(1);
        self.fill_lookahead(width)?;

        let decoded = self
            .lookahead
            .get(..width)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.chars().next());

        match decoded {
            Some(c) => {
                self.lookahead.drain(..width);
                Ok(Some(c))
            }
            None => {
                let byte = self.lookahead.remove(0);
                tracing::trace!(byte, "Replaced invalid UTF-8 byte");
                Ok(Some(char::REPLACEMENT_CHARACTER))
            }
        }
    }

    /// Read until the lookahead holds `n` bytes. Returns `false` on end of
    /// input before that.
    fn fill_lookahead(&mut self, n: usize) -> io::Result<bool> {
        while self.lookahead.len() < n {
            match self.read_byte()? {
                Some(byte) => self.lookahead.push(byte),
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let byte = buf[0];
                    self.inner.consume(1);
                    return Ok(Some(byte));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

/// Encoded length of a UTF-8 sequence, from its leading byte.
fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FFFD: char = char::REPLACEMENT_CHARACTER;

    fn read_all<R: BufRead>(reader: R) -> String {
        let mut reader = CharReader::new(reader);
        let mut out = String::new();
        while let Some(c) = reader.next_char().unwrap() {
            out.push(c);
        }
        out
    }

    #[test]
    fn test_ascii() {
        assert_eq!(read_all(&b"plain text"[..]), "plain text");
    }

    #[test]
    fn test_multibyte() {
        let input = "“hi”—½ ₀ 🎉";
        assert_eq!(read_all(input.as_bytes()), input);
    }

    #[test]
    fn test_empty() {
        assert_eq!(read_all(&b""[..]), "");
    }

    #[test]
    fn test_invalid_leading_byte_replaced() {
        assert_eq!(read_all(&b"ab\xffcd"[..]), format!("ab{FFFD}cd"));
    }

    #[test]
    fn test_latin1_byte_replaced() {
        assert_eq!(read_all(&b"caf\xe9 ok"[..]), format!("caf{FFFD} ok"));
    }

    #[test]
    fn test_truncated_sequence_at_end() {
        // First two bytes of a three-byte em dash: one replacement per byte.
        assert_eq!(read_all(&b"a\xe2\x80"[..]), format!("a{FFFD}{FFFD}"));
    }

    #[test]
    fn test_bad_continuation_byte_consumes_one_byte() {
        assert_eq!(read_all(&b"\xe2\x28\xa1"[..]), format!("{FFFD}({FFFD}"));
    }

    #[test]
    fn test_valid_after_invalid() {
        assert_eq!(read_all("\u{0}".as_bytes()), "\u{0}");
        assert_eq!(read_all(&b"\xc3\xe2\x80\x94"[..]), format!("{FFFD}—"));
    }

    #[test]
    fn test_chars_span_buffer_boundaries() {
        // A one-byte buffer forces every multi-byte char across fill_buf calls.
        let input = "a—b";
        assert_eq!(
            read_all(io::BufReader::with_capacity(1, input.as_bytes())),
            input
        );
        assert_eq!(
            read_all(io::BufReader::with_capacity(1, &b"x\xe2\x28y"[..])),
            format!("x{FFFD}(y")
        );
    }
}
