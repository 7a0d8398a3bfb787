use {
    crate::{CodecError, Result},
    limcode_short_vec::ShortVecError,
};

/// Bounds-checked cursor over a borrowed byte region.
///
/// Reads advance the cursor; [`peek_u8`] does not. Byte-slice reads hand
/// back subslices of the input rather than copying.
///
/// [`peek_u8`]: Reader::peek_u8
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes left between the cursor and the end of the region.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Current cursor offset from the start of the region.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(CodecError::BufferUnderflow { needed, remaining });
        }
        Ok(())
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let byte = self.bytes[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Next byte without advancing the cursor.
    #[inline]
    pub fn peek_u8(&self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.bytes[self.pos])
    }

    /// Borrow the next `len` bytes and advance past them.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read a fixed-size array by value.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.read_bytes(N)?;
        // Length was just checked.
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }

    #[inline]
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.ensure(len)?;
        self.pos += len;
        Ok(())
    }

    /// Read a ShortVec length prefix (1-3 bytes).
    pub fn read_short_vec_len(&mut self) -> Result<u16> {
        let offset = self.pos;
        let (value, consumed) =
            limcode_short_vec::decode_len(&self.bytes[self.pos..]).map_err(|err| match err {
                ShortVecError::Truncated => CodecError::BufferUnderflow {
                    needed: self.remaining() + 1,
                    remaining: self.remaining(),
                },
                ShortVecError::Malformed | ShortVecError::Alias => {
                    CodecError::InvalidEncoding { offset }
                }
            })?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read an unbounded LEB128 varint.
    pub fn read_varint_u64(&mut self) -> Result<u64> {
        let offset = self.pos;
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            if shift == 63 && byte > 0x01 {
                return Err(CodecError::InvalidEncoding { offset });
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift > 63 {
                return Err(CodecError::InvalidEncoding { offset });
            }
        }
    }
}
