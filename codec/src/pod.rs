//! Plain-old-data sequences.
//!
//! A slice of fixed-width integers serializes as a fixed u64 count
//! followed by each element in little-endian form, the same layout in
//! every dialect. This is the hot path for raw numeric columns, where
//! the per-element walk of the full codec would be pure overhead.

use limcode_io::{CodecError, Reader, Result, Writer};

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// A fixed-width little-endian integer with no internal structure.
pub trait Pod: private::Sealed + Copy {
    const SIZE: usize;

    fn write(self, writer: &mut Writer);
    fn read(reader: &mut Reader<'_>) -> Result<Self>;
}

macro_rules! impl_pod {
    ($ty:ty, $write:ident, $read:ident) => {
        impl Pod for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn write(self, writer: &mut Writer) {
                writer.$write(self);
            }

            #[inline]
            fn read(reader: &mut Reader<'_>) -> Result<Self> {
                reader.$read()
            }
        }
    };
}

impl_pod!(u8, write_u8, read_u8);
impl_pod!(u16, write_u16, read_u16);
impl_pod!(u32, write_u32, read_u32);
impl_pod!(u64, write_u64, read_u64);

/// Encode a slice as a u64 count plus little-endian elements. The
/// output size is known up front, so the buffer is allocated once.
pub fn serialize_slice<T: Pod>(values: &[T]) -> Vec<u8> {
    let mut writer = Writer::with_capacity(8 + values.len() * T::SIZE);
    writer.write_u64(values.len() as u64);
    for value in values {
        value.write(&mut writer);
    }
    writer.into_vec()
}

pub fn deserialize_vec<T: Pod>(bytes: &[u8]) -> Result<Vec<T>> {
    let mut reader = Reader::new(bytes);
    let len = reader.read_u64()?;
    let len = usize::try_from(len).map_err(|_| CodecError::LengthOverflow(usize::MAX))?;
    // The count is validated against the bytes actually present before
    // any allocation.
    let needed = len.saturating_mul(T::SIZE);
    if reader.remaining() < needed {
        return Err(CodecError::BufferUnderflow {
            needed,
            remaining: reader.remaining(),
        });
    }
    let mut values = Vec::with_capacity(len);
    for _ in 0..len {
        values.push(T::read(&mut reader)?);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches};

    #[test]
    fn test_u64_sequence_reference_bytes() {
        let values: Vec<u64> = (0..10).collect();
        let bytes = serialize_slice(&values);
        assert_eq!(bytes.len(), 88);
        assert_eq!(&bytes[..8], &[0x0a, 0, 0, 0, 0, 0, 0, 0]);
        for (i, chunk) in bytes[8..].chunks(8).enumerate() {
            assert_eq!(chunk, (i as u64).to_le_bytes());
        }
        assert_eq!(deserialize_vec::<u64>(&bytes).unwrap(), values);
    }

    #[test]
    fn test_hostile_count_rejected_before_allocation() {
        let mut bytes = vec![0xff; 8];
        bytes.extend_from_slice(&[0; 16]);
        assert_matches!(
            deserialize_vec::<u64>(&bytes),
            Err(CodecError::BufferUnderflow { .. })
        );
    }

    #[test]
    fn test_u16_roundtrip() {
        let values = vec![0u16, 1, 0xbeef, u16::MAX];
        let bytes = serialize_slice(&values);
        assert_eq!(bytes.len(), 8 + 4 * 2);
        assert_eq!(deserialize_vec::<u16>(&bytes).unwrap(), values);
    }
}
