//! Length-checked sequential reader over an immutable byte slice.
//!
//! Every primitive either advances the cursor on success or leaves it
//! untouched on failure. Callers rely on this to write fail-closed parsers:
//! a failed read never leaves the cursor in a partially-advanced state.

/// A view `(buf, offset)` over a byte slice that never copies the slice
/// itself and never advances past `buf.len()`.
#[derive(Clone, Copy, Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Wraps `buf` with the cursor positioned at the start.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// A cursor over an empty slice.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(&[])
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    /// Number of unconsumed bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len() - self.offset
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advances past `n` bytes without returning them. Fails (leaving the
    /// cursor unchanged) if fewer than `n` bytes remain.
    pub fn skip(&mut self, n: usize) -> Option<()> {
        if n > self.len() {
            return None;
        }
        self.offset += n;
        Some(())
    }

    /// Reads exactly `n` bytes and advances past them.
    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        if n > self.len() {
            return None;
        }
        let slice = &self.buf[self.offset..self.offset + n];
        self.offset += n;
        Some(slice)
    }

    /// Reads a single big-endian byte.
    pub fn read_u8(&mut self) -> Option<u8> {
        let bytes = self.read_bytes(1)?;
        Some(bytes[0])
    }

    /// Reads a 16-bit big-endian integer.
    pub fn read_u16_be(&mut self) -> Option<u16> {
        let bytes = self.read_bytes(2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a 24-bit big-endian integer, widened into a `u32`.
    pub fn read_u24_be(&mut self) -> Option<u32> {
        let bytes = self.read_bytes(3)?;
        Some(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Reads an 8-bit length prefix, then a sub-cursor over exactly that many
    /// bytes. The parent cursor advances past the whole sub-region regardless
    /// of whether the caller fully consumes the returned sub-cursor.
    pub fn read_u8_length_prefixed(&mut self) -> Option<Reader<'a>> {
        let len = usize::from(self.read_u8()?);
        let bytes = self.read_bytes(len)?;
        Some(Reader::new(bytes))
    }

    /// Same as [`Reader::read_u8_length_prefixed`] but with a 16-bit prefix.
    pub fn read_u16_length_prefixed(&mut self) -> Option<Reader<'a>> {
        let len = usize::from(self.read_u16_be()?);
        let bytes = self.read_bytes(len)?;
        Some(Reader::new(bytes))
    }

    /// Same as [`Reader::read_u8_length_prefixed`] but with a 24-bit prefix.
    pub fn read_u24_length_prefixed(&mut self) -> Option<Reader<'a>> {
        let len = self.read_u24_be()? as usize;
        let bytes = self.read_bytes(len)?;
        Some(Reader::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_u8_advances_by_one() {
        let mut r = Reader::new(&[0x01, 0x02]);
        assert_eq!(r.read_u8(), Some(0x01));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn read_u16_be_is_big_endian() {
        let mut r = Reader::new(&[0x03, 0x03]);
        assert_eq!(r.read_u16_be(), Some(0x0303));
    }

    #[test]
    fn read_u24_be_widens_into_u32() {
        let mut r = Reader::new(&[0x00, 0x01, 0x02]);
        assert_eq!(r.read_u24_be(), Some(0x0001_02));
    }

    #[test]
    fn failing_read_leaves_cursor_unchanged() {
        let mut r = Reader::new(&[0x01]);
        let before = r.len();
        assert_eq!(r.read_u16_be(), None);
        assert_eq!(r.len(), before);
    }

    #[test]
    fn length_prefixed_sub_cursor_advances_parent_past_whole_region() {
        // prefix says 3 bytes, but the caller only reads 1 of them.
        let mut r = Reader::new(&[0x03, 0xAA, 0xBB, 0xCC, 0xFF]);
        let mut sub = r.read_u8_length_prefixed().unwrap();
        assert_eq!(sub.read_u8(), Some(0xAA));
        // parent must be positioned after the whole 3-byte region.
        assert_eq!(r.read_u8(), Some(0xFF));
    }

    #[test]
    fn length_prefix_exceeding_remaining_bytes_fails_closed() {
        let mut r = Reader::new(&[0x05, 0xAA]);
        assert_eq!(r.read_u8_length_prefixed().is_none(), true);
        // unchanged: the length byte is still unread.
        assert_eq!(r.len(), 2);
    }

    proptest::proptest! {
        #[test]
        fn skip_then_read_bytes_never_panics(data: Vec<u8>, n in 0usize..64, m in 0usize..64) {
            let mut r = Reader::new(&data);
            let _ = r.skip(n);
            let _ = r.read_bytes(m);
        }

        #[test]
        fn read_bytes_of_len_n_consumes_exactly_n(data: Vec<u8>, n in 0usize..128) {
            let mut r = Reader::new(&data);
            let before = r.len();
            if let Some(slice) = r.read_bytes(n) {
                proptest::prop_assert_eq!(slice.len(), n);
                proptest::prop_assert_eq!(r.len(), before - n);
            } else {
                proptest::prop_assert!(n > before);
                proptest::prop_assert_eq!(r.len(), before);
            }
        }
    }
}
