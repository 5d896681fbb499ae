//! Bounds-checked reads over a captured frame.
//!
//! Every structured read goes through [`Cursor::read`], which checks
//! `position + H::LEN <= len` before any byte is touched.

use core::fmt;

/// A fixed-size wire header that can be decoded from its leading bytes.
pub trait Header: Sized {
    const LEN: usize;

    /// Decode from `bytes`; `None` if fewer than `LEN` bytes are present.
    fn decode(bytes: &[u8]) -> Option<Self>;
}

/// Not enough bytes left in the frame for the requested header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferTooShort {
    pub needed: usize,
    pub remaining: usize,
}

impl BufferTooShort {
    pub const fn new(needed: usize, remaining: usize) -> Self {
        Self { needed, remaining }
    }
}

impl fmt::Display for BufferTooShort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "buffer too short: need {} bytes, {} remaining",
            self.needed, self.remaining
        )
    }
}

impl core::error::Error for BufferTooShort {}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[inline(always)]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Offset of the next unread byte, kept crate-private so stages never
    /// compute addresses themselves.
    #[inline(always)]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Read a header at the current position and advance past it.
    /// The cursor does not move on failure.
    #[inline(always)]
    pub fn read<H: Header>(&mut self) -> Result<H, BufferTooShort> {
        let short = BufferTooShort::new(H::LEN, self.remaining());
        let bytes = self
            .buf
            .get(self.pos..)
            .and_then(|rest| rest.get(..H::LEN))
            .ok_or(short)?;
        let hdr = H::decode(bytes).ok_or(short)?;
        self.pos += H::LEN;
        Ok(hdr)
    }
}
