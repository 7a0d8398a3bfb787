use crate::{copy, CodecError, Result};

/// Append-only little-endian byte writer.
///
/// The underlying `Vec<u8>` is the sole output artifact; [`into_vec`]
/// surrenders it without copying. Writes never fail except for
/// [`write_short_vec_len`], which rejects lengths above `u16::MAX`.
///
/// [`into_vec`]: Writer::into_vec
/// [`write_short_vec_len`]: Writer::write_short_vec_len
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Reserve room for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(additional);
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append raw bytes with no length prefix.
    ///
    /// Large payloads take the non-temporal path in [`crate::append_bytes`];
    /// the output bytes are identical either way.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        copy::append_bytes(&mut self.buf, bytes);
    }

    /// Append a ShortVec length prefix (1-3 bytes).
    #[inline]
    pub fn write_short_vec_len(&mut self, len: usize) -> Result<()> {
        let len = u16::try_from(len).map_err(|_| CodecError::LengthOverflow(len))?;
        let mut encoded = [0u8; limcode_short_vec::MAX_ENCODED_LEN];
        let n = limcode_short_vec::encode_len(len, &mut encoded);
        self.buf.extend_from_slice(&encoded[..n]);
        Ok(())
    }

    /// Append an unbounded LEB128 varint.
    #[inline]
    pub fn write_varint_u64(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches};

    #[test]
    fn test_primitive_writes_are_little_endian() {
        let mut writer = Writer::new();
        writer.write_u8(0xab);
        writer.write_u16(0x0102);
        writer.write_u32(0x03040506);
        writer.write_u64(0x0708090a0b0c0d0e);
        assert_eq!(
            writer.into_vec(),
            vec![
                0xab, 0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 0x0e, 0x0d, 0x0c, 0x0b, 0x0a, 0x09,
                0x08, 0x07,
            ],
        );
    }

    #[test]
    fn test_short_vec_len_overflow() {
        let mut writer = Writer::new();
        assert_matches!(
            writer.write_short_vec_len(65536),
            Err(CodecError::LengthOverflow(65536))
        );
        assert!(writer.is_empty());
    }

    #[test]
    fn test_varint_u64() {
        let mut writer = Writer::new();
        writer.write_varint_u64(0);
        writer.write_varint_u64(127);
        writer.write_varint_u64(128);
        writer.write_varint_u64(u64::MAX);
        let bytes = writer.into_vec();
        assert_eq!(&bytes[..2], &[0x00, 0x7f]);
        assert_eq!(&bytes[2..4], &[0x80, 0x01]);
        // u64::MAX takes the full ten bytes.
        assert_eq!(bytes.len(), 4 + 10);
        assert_eq!(bytes[13], 0x01);
    }
}
