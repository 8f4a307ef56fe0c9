use bytes::Buf;

use crate::{PktBuf, PktBufMut};

/// A read-only frame window over a byte slice.
///
/// The bytes in `buf[..start]` are the headroom and `buf[start..end]` is the
/// frame.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    start: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor covering the whole of `buf`, with no headroom.
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor {
            buf,
            start: 0,
            end: buf.len(),
        }
    }

    /// The underlying slice, headroom included.
    #[inline]
    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// The frame bytes with the lifetime of the underlying slice.
    #[inline]
    pub fn chunk_shared_lifetime(&self) -> &'a [u8] {
        &self.buf[self.start..self.end]
    }

    /// Offset of the frame start inside the underlying slice.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.start
    }
}

impl<'a> Buf for Cursor<'a> {
    #[inline]
    fn remaining(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.start += cnt;
    }
}

impl<'a> PktBuf for Cursor<'a> {
    #[inline]
    fn move_back(&mut self, cnt: usize) {
        assert!(cnt <= self.start);
        self.start -= cnt;
    }

    #[inline]
    fn trim_off(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.end -= cnt;
    }
}

/// A writable frame window over a byte slice, with headroom before the start.
///
/// A tunnel reads a frame into `buf[headroom..]` and advances the cursor past
/// the reserved bytes so that a tag can later be prepended in place.
#[derive(Debug)]
pub struct CursorMut<'a> {
    buf: &'a mut [u8],
    start: usize,
    end: usize,
}

impl<'a> CursorMut<'a> {
    /// Create a cursor covering the whole of `buf`, with no headroom.
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        let end = buf.len();
        CursorMut { buf, start: 0, end }
    }

    /// Create a cursor over `buf[headroom..headroom + len]`.
    ///
    /// # Panics
    /// Panics if `headroom + len` exceeds the slice length.
    #[inline]
    pub fn with_headroom(buf: &'a mut [u8], headroom: usize, len: usize) -> Self {
        assert!(headroom + len <= buf.len());
        CursorMut {
            buf,
            start: headroom,
            end: headroom + len,
        }
    }

    /// The underlying slice, headroom included.
    #[inline]
    pub fn buf(&self) -> &[u8] {
        self.buf
    }

    /// Consume the cursor and return the frame bytes with the slice lifetime.
    #[inline]
    pub fn chunk_mut_shared_lifetime(self) -> &'a mut [u8] {
        &mut self.buf[self.start..self.end]
    }

    /// Offset of the frame start inside the underlying slice.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.start
    }
}

impl<'a> Buf for CursorMut<'a> {
    #[inline]
    fn remaining(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.start += cnt;
    }
}

impl<'a> PktBuf for CursorMut<'a> {
    #[inline]
    fn move_back(&mut self, cnt: usize) {
        assert!(cnt <= self.start);
        self.start -= cnt;
    }

    #[inline]
    fn trim_off(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.end -= cnt;
    }
}

impl<'a> PktBufMut for CursorMut<'a> {
    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.start..self.end]
    }

    #[inline]
    fn chunk_headroom(&self) -> usize {
        self.start
    }
}
