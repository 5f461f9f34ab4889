//! Binary buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A binary buffer reader over a borrowed byte slice.
///
/// The reader maintains a cursor position and reads big-endian integers and
/// length-prefixed strings. Every read is bounds-checked and returns
/// [`BufferError::EndOfBuffer`] instead of panicking; the cursor does not
/// advance on a failed read.
///
/// # Example
///
/// ```
/// use map_patch_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u8(), Ok(0x01));
/// assert_eq!(reader.try_i16(), Ok(0x0203));
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub data: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader positioned at the start of the slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// Returns the number of bytes remaining from the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.x
    }

    /// Checks that `n` more bytes are available from the current cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if self.x + n > self.data.len() {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    /// Advances the cursor by `n` bytes without reading them.
    pub fn try_skip(&mut self, n: usize) -> Result<(), BufferError> {
        self.check(n)?;
        self.x += n;
        Ok(())
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.data[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads a signed 16-bit big-endian integer.
    #[inline]
    pub fn try_i16(&mut self) -> Result<i16, BufferError> {
        self.check(2)?;
        let val = i16::from_be_bytes([self.data[self.x], self.data[self.x + 1]]);
        self.x += 2;
        Ok(val)
    }

    /// Reads a signed 32-bit big-endian integer.
    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        self.check(4)?;
        let val = i32::from_be_bytes([
            self.data[self.x],
            self.data[self.x + 1],
            self.data[self.x + 2],
            self.data[self.x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads a signed 64-bit big-endian integer.
    #[inline]
    pub fn try_i64(&mut self) -> Result<i64, BufferError> {
        self.check(8)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[self.x..self.x + 8]);
        self.x += 8;
        Ok(i64::from_be_bytes(bytes))
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.data[start..self.x])
    }

    /// Reads a UTF-8 string of `size` bytes.
    pub fn try_utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.check(size)?;
        let start = self.x;
        let slice = &self.data[start..start + size];
        let s = str::from_utf8(slice).map_err(|_| BufferError::InvalidUtf8)?;
        self.x += size;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_reads_advance_cursor() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Ok(0x01));
        assert_eq!(reader.try_u8(), Ok(0x02));
        assert_eq!(reader.try_u8(), Ok(0x03));
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn u8_end_of_buffer_keeps_cursor() {
        let data: [u8; 0] = [];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn i16_big_endian() {
        let data = [0xfc, 0x18]; // -1000
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i16(), Ok(-1000));
    }

    #[test]
    fn i16_partial_is_error() {
        let data = [0x01];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i16(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn i32_big_endian() {
        let data = [0xff, 0xfe, 0x1d, 0xc0]; // -123456
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i32(), Ok(-123456));
    }

    #[test]
    fn i64_big_endian() {
        let data = 0x0102030405060708i64.to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i64(), Ok(0x0102030405060708));
    }

    #[test]
    fn skip_advances() {
        let data = [1, 2, 3, 4];
        let mut reader = Reader::new(&data);
        reader.try_skip(2).unwrap();
        assert_eq!(reader.try_u8(), Ok(3));
    }

    #[test]
    fn skip_past_end_is_error() {
        let data = [1, 2];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_skip(3), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn utf8_reads_string() {
        let data = b"hello world";
        let mut reader = Reader::new(data);
        assert_eq!(reader.try_utf8(5), Ok("hello"));
        assert_eq!(reader.try_utf8(6), Ok(" world"));
    }

    #[test]
    fn utf8_invalid_is_error() {
        let data = [0xff, 0xfe];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_utf8(2), Err(BufferError::InvalidUtf8));
    }

    #[test]
    fn utf8_end_of_buffer_keeps_cursor() {
        let data = b"hi";
        let mut reader = Reader::new(data);
        assert_eq!(reader.try_utf8(10), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn buf_reads_raw_bytes() {
        let data = [1u8, 2, 3, 4, 5];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_buf(3), Ok([1u8, 2, 3].as_ref()));
        assert_eq!(reader.remaining(), 2);
    }
}
