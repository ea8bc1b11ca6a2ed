//! Nibble packing: two nibbles per byte, low half first.

/// Writes nibbles into a caller-supplied byte buffer
///
/// Nibble `i` lands in byte `i / 2`; even indices take the low half and
/// overwrite the whole byte, odd indices OR into the high half. Stale bytes
/// in the buffer are therefore never mixed into the stream, and a trailing
/// odd nibble leaves the high half zero.
pub(crate) struct NibbleWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> NibbleWriter<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Total nibble slots the buffer offers
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len() * 2
    }

    /// Nibbles written so far
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Check that `n` more nibbles fit
    #[inline]
    pub fn fits(&self, n: usize) -> bool {
        self.pos + n <= self.capacity()
    }

    /// Write one nibble; caller has checked `fits`
    #[inline]
    pub fn put(&mut self, nibble: u8) {
        debug_assert!(self.fits(1), "nibble write past capacity");
        let byte = &mut self.buf[self.pos / 2];
        if self.pos % 2 == 0 {
            *byte = nibble & 0xF;
        } else {
            *byte |= (nibble & 0xF) << 4;
        }
        self.pos += 1;
    }

    /// Bytes touched so far (a half-filled last byte counts)
    #[inline]
    pub fn bytes_written(&self) -> usize {
        self.pos.div_ceil(2)
    }
}

/// Reads nibbles from a packed byte buffer
pub(crate) struct NibbleReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> NibbleReader<'a> {
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Index of the next nibble
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Nibbles left in the stream
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() * 2 - self.pos
    }

    #[inline]
    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    /// Read one nibble; caller has checked `remaining`
    #[inline]
    pub fn take(&mut self) -> u8 {
        let byte = self.buf[self.pos / 2];
        let nibble = (byte >> ((self.pos % 2) * 4)) & 0xF;
        self.pos += 1;
        nibble
    }
}
