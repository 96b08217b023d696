//! Byte sources the reader pulls from.

use alloc::vec::Vec;

/// A single-pass stream of bytes.
///
/// The reader owns its source exclusively; mutating a source from outside
/// the reader between operations is undefined. Sources are conceptually
/// non-seekable: once a byte is consumed it is gone.
pub trait ByteSource {
    /// Returns the next byte without consuming it, or `None` at end of input.
    fn peek(&mut self) -> Option<u8>;

    /// Consumes and returns the next byte, or `None` at end of input.
    fn next_byte(&mut self) -> Option<u8>;

    /// Consumes up to `n` bytes, appending them to `out`.
    ///
    /// Returns the number of bytes actually read; fewer than `n` means the
    /// source hit end of input.
    fn read_into(&mut self, n: usize, out: &mut Vec<u8>) -> usize;

    /// Advances past the next byte, discarding it.
    #[inline]
    fn skip_byte(&mut self) {
        let _ = self.next_byte();
    }

    /// Returns `true` when no more bytes are available.
    fn is_eof(&mut self) -> bool;

    /// Count of bytes consumed so far.
    fn position(&self) -> usize;
}

/// A source over an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Wrap a byte slice.
    #[inline]
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn peek(&mut self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        let b = self.data.get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }

    fn read_into(&mut self, n: usize, out: &mut Vec<u8>) -> usize {
        let end = self.pos.saturating_add(n).min(self.data.len());
        let got = end - self.pos;
        out.extend_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        got
    }

    #[inline]
    fn is_eof(&mut self) -> bool {
        self.pos == self.data.len()
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }
}

/// A source over any [`std::io::Read`], with one byte of lookahead.
///
/// The [`ByteSource`] contract has no error channel, so I/O failures
/// surface as end of input; the underlying error stays available through
/// [`io_error`](Self::io_error) and the decode fails with `UnexpectedEof`
/// at the position the stream broke.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
    lookahead: Option<u8>,
    pos: usize,
    failed: Option<std::io::Error>,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ReadSource<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lookahead: None,
            pos: 0,
            failed: None,
        }
    }

    /// The I/O error that ended the stream, if any.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        self.failed.as_ref()
    }

    /// Consume the source, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self) -> Option<u8> {
        if self.lookahead.is_none() && self.failed.is_none() {
            let mut byte = [0u8; 1];
            loop {
                match self.inner.read(&mut byte) {
                    Ok(0) => break,
                    Ok(_) => {
                        self.lookahead = Some(byte[0]);
                        break;
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        self.failed = Some(e);
                        break;
                    }
                }
            }
        }
        self.lookahead
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for ReadSource<R> {
    fn peek(&mut self) -> Option<u8> {
        self.fill()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.fill()?;
        self.lookahead = None;
        self.pos += 1;
        Some(b)
    }

    fn read_into(&mut self, n: usize, out: &mut Vec<u8>) -> usize {
        // Bounded chunks: a hostile declared length must not translate into
        // one huge allocation before any byte arrives.
        const CHUNK: usize = 8 * 1024;

        let mut got = 0;
        if n > 0 {
            if let Some(b) = self.lookahead.take() {
                out.push(b);
                self.pos += 1;
                got = 1;
            }
        }

        while got < n && self.failed.is_none() {
            let want = (n - got).min(CHUNK);
            let start = out.len();
            out.resize(start + want, 0);
            match self.inner.read(&mut out[start..]) {
                Ok(0) => {
                    out.truncate(start);
                    break;
                }
                Ok(k) => {
                    out.truncate(start + k);
                    self.pos += k;
                    got += k;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => out.truncate(start),
                Err(e) => {
                    out.truncate(start);
                    self.failed = Some(e);
                    break;
                }
            }
        }
        got
    }

    fn is_eof(&mut self) -> bool {
        self.fill().is_none()
    }

    fn position(&self) -> usize {
        self.pos
    }
}
