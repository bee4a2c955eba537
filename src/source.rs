//! The byte-source abstraction the driver peeks/discards through.
//!
//! This is intentionally the only place in the crate that touches
//! `std::io::Read` directly — everything above [`ByteSource`] is
//! agnostic to where the bytes came from, which is what lets the driver
//! be fed from a TCP stream, a TLS session, or (in tests) a plain
//! in-memory cursor without caring which.

use std::io::{self, Read};

/// Peek/discard access to a stream of bytes, buffered by the
/// implementation.
///
/// `peek` never discards what it has already buffered; it only grows
/// the window. `discard` is the only way bytes leave the front of the
/// window, and invalidates any slice previously returned by `peek`.
pub trait ByteSource {
    /// Ensure at least `min(len, bytes remaining until EOF)` bytes are
    /// buffered from the current logical position, and return them.
    ///
    /// The returned slice is `mut` because the parser normalises header
    /// case in place; callers that don't need that may ignore the
    /// mutability.
    fn peek(&mut self, len: usize) -> io::Result<&mut [u8]>;

    /// Drop `len` bytes from the front of the buffered window. `len`
    /// must not exceed the length of the slice most recently returned
    /// by `peek`.
    fn discard(&mut self, len: usize);
}

/// A [`ByteSource`] backed by any blocking [`Read`], with its own
/// growable buffer and front-compaction — the same shape as the
/// teacher's `InnerBuffer<R: Read>`, minus the per-byte marker API that
/// made sense for a byte-at-a-time parser but not for this crate's
/// slice-oriented one.
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
    filled: usize,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            buf: Vec::new(),
            filled: 0,
        }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn peek(&mut self, len: usize) -> io::Result<&mut [u8]> {
        if self.buf.len() < len {
            self.buf.resize(len, 0);
        }
        while self.filled < len {
            let n = self.reader.read(&mut self.buf[self.filled..len])?;
            if n == 0 {
                break;
            }
            self.filled += n;
        }
        Ok(&mut self.buf[..self.filled.min(len)])
    }

    fn discard(&mut self, len: usize) {
        assert!(len <= self.filled, "discard past the buffered window");
        self.buf.copy_within(len..self.filled, 0);
        self.filled -= len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn peek_returns_everything_available_up_to_len() {
        let mut src = ReaderSource::new(Cursor::new(b"hello world".to_vec()));
        let got = src.peek(5).unwrap();
        assert_eq!(got, b"hello");
    }

    #[test]
    fn peek_past_eof_returns_a_shorter_slice() {
        let mut src = ReaderSource::new(Cursor::new(b"hi".to_vec()));
        let got = src.peek(100).unwrap();
        assert_eq!(got, b"hi");
    }

    #[test]
    fn discard_then_peek_continues_from_the_new_front() {
        let mut src = ReaderSource::new(Cursor::new(b"hello world".to_vec()));
        let _ = src.peek(5).unwrap();
        src.discard(5);
        let got = src.peek(6).unwrap();
        assert_eq!(got, b" world");
    }

    #[test]
    fn peek_can_grow_the_window_across_calls() {
        let mut src = ReaderSource::new(Cursor::new(b"abcdef".to_vec()));
        let got = src.peek(2).unwrap();
        assert_eq!(got, b"ab");
        let got = src.peek(4).unwrap();
        assert_eq!(got, b"abcd");
    }
}
