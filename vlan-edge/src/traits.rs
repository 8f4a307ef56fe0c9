pub use bytes::Buf;

/// A frame buffer whose start can move backward into reserved headroom.
///
/// `Buf::remaining` is the frame length and `Buf::advance` drops leading
/// bytes.
pub trait PktBuf: Buf {
    /// Move the start back by `cnt` bytes, growing the frame at the front.
    ///
    /// # Panics
    /// Implementations panic if `cnt` exceeds the available headroom.
    fn move_back(&mut self, cnt: usize);

    /// Remove `cnt` trailing bytes.
    ///
    /// # Panics
    /// Implementations panic if `cnt` exceeds `remaining()`.
    fn trim_off(&mut self, cnt: usize);

    /// Shrink the frame to zero length, the marker for a dropped frame.
    #[inline]
    fn clear(&mut self) {
        let len = self.remaining();
        self.trim_off(len);
    }
}

/// A frame buffer that can be written in place.
pub trait PktBufMut: PktBuf {
    /// Number of bytes that can be prepended without reallocation.
    fn chunk_headroom(&self) -> usize;

    /// A mutable view of the frame, starting at the current start.
    fn chunk_mut(&mut self) -> &mut [u8];

    /// Grow the frame by `cnt` bytes at the front if the headroom allows it.
    ///
    /// Returns `false` and leaves the buffer alone otherwise.
    #[inline]
    fn try_move_back(&mut self, cnt: usize) -> bool {
        if self.chunk_headroom() < cnt {
            return false;
        }
        self.move_back(cnt);
        true
    }
}

// Header views take their buffer by value; these let them borrow one.

impl<T: PktBuf + ?Sized> PktBuf for &mut T {
    #[inline]
    fn move_back(&mut self, cnt: usize) {
        T::move_back(self, cnt)
    }

    #[inline]
    fn trim_off(&mut self, cnt: usize) {
        T::trim_off(self, cnt)
    }

    #[inline]
    fn clear(&mut self) {
        T::clear(self)
    }
}

impl<T: PktBufMut + ?Sized> PktBufMut for &mut T {
    #[inline]
    fn chunk_headroom(&self) -> usize {
        T::chunk_headroom(self)
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        T::chunk_mut(self)
    }

    #[inline]
    fn try_move_back(&mut self, cnt: usize) -> bool {
        T::try_move_back(self, cnt)
    }
}
