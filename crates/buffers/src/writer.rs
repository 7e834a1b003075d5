//! Append-only big-endian writer.

use crate::{BufferError, MAX_STR_LEN};

/// A binary buffer writer backed by a growable `Vec<u8>`.
///
/// # Example
///
/// ```
/// use enumviz_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u32(0x0203_0405);
/// assert_eq!(writer.flush(), [0x01, 0x02, 0x03, 0x04, 0x05]);
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Creates an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Discards anything written since the last flush.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Returns the written bytes and leaves the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Borrows the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes raw bytes.
    #[inline]
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Writes raw UTF-8 bytes with no length prefix.
    pub fn utf8(&mut self, s: &str) {
        self.buf(s.as_bytes());
    }

    /// Writes a string as a `u32` byte length followed by its UTF-8 bytes.
    ///
    /// Fails without writing anything if the string is longer than
    /// [`MAX_STR_LEN`].
    pub fn str(&mut self, s: &str) -> Result<(), BufferError> {
        if s.len() > MAX_STR_LEN {
            return Err(BufferError::StringTooLong { len: s.len() });
        }
        self.u32(s.len() as u32);
        self.utf8(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_big_endian_u32() {
        let mut writer = Writer::new();
        writer.u32(0x0102_0304);
        assert_eq!(writer.flush(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn str_is_length_prefixed() {
        let mut writer = Writer::new();
        writer.str("ab").unwrap();
        assert_eq!(writer.flush(), vec![0, 0, 0, 2, b'a', b'b']);
    }

    #[test]
    fn flush_empties_the_writer() {
        let mut writer = Writer::new();
        writer.u8(7);
        assert_eq!(writer.len(), 1);
        let _ = writer.flush();
        assert!(writer.is_empty());
    }
}
