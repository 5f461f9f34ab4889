//! Binary buffer writer with auto-growing capacity.

/// A binary buffer writer that appends big-endian primitives to an owned,
/// auto-growing byte buffer.
///
/// # Example
///
/// ```
/// use map_patch_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.i16(0x0203);
/// assert_eq!(writer.into_bytes(), [0x01, 0x02, 0x03]);
/// ```
#[derive(Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Writes a signed 16-bit big-endian integer.
    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit big-endian integer.
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit big-endian integer.
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes the UTF-8 bytes of a string, without a length prefix.
    pub fn utf8(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Returns the written bytes, consuming the writer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Borrows the written bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_primitives_big_endian() {
        let mut writer = Writer::new();
        writer.u8(0xab);
        writer.i16(-1000);
        writer.i32(-123456);
        assert_eq!(
            writer.into_bytes(),
            [0xab, 0xfc, 0x18, 0xff, 0xfe, 0x1d, 0xc0]
        );
    }

    #[test]
    fn writes_i64() {
        let mut writer = Writer::new();
        writer.i64(0x0102030405060708);
        assert_eq!(writer.into_bytes(), 0x0102030405060708i64.to_be_bytes());
    }

    #[test]
    fn writes_strings_and_raw_bytes() {
        let mut writer = Writer::new();
        writer.utf8("hi");
        writer.buf(&[0x00, 0xff]);
        assert_eq!(writer.into_bytes(), [b'h', b'i', 0x00, 0xff]);
    }

    #[test]
    fn roundtrip_with_reader() {
        let mut writer = Writer::new();
        writer.i32(42);
        writer.i16(-7);
        let bytes = writer.into_bytes();
        let mut reader = crate::Reader::new(&bytes);
        assert_eq!(reader.try_i32(), Ok(42));
        assert_eq!(reader.try_i16(), Ok(-7));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn empty_writer() {
        let writer = Writer::new();
        assert!(writer.is_empty());
        assert_eq!(writer.len(), 0);
    }
}
