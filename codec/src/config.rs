//! Dialect configuration.
//!
//! The two wire dialects walk the domain tree identically and disagree
//! only on inner vector length prefixes. [`Config`] captures that one
//! degree of freedom so the walkers in this crate can be written once.

use limcode_io::{Reader, Result, Writer};

mod private {
    pub trait Sealed {}
    impl Sealed for super::Wincode {}
    impl Sealed for super::Bincode {}
}

/// Length-prefix rule of a wire dialect.
///
/// Sealed: the dialect set is fixed by the wire protocol.
pub trait Config: private::Sealed {
    /// Append an inner vector length prefix.
    fn write_len(writer: &mut Writer, len: usize) -> Result<()>;

    /// Consume an inner vector length prefix.
    fn read_len(reader: &mut Reader<'_>) -> Result<usize>;

    /// Encoded size of an inner vector length prefix.
    fn len_size(len: usize) -> usize;
}

/// ShortVec length prefixes (1-3 bytes). Shared by the wincode and
/// limcode encoders, which must tie byte-for-byte.
pub struct Wincode;

/// Fixed u64 length prefixes (8 bytes).
pub struct Bincode;

impl Config for Wincode {
    #[inline]
    fn write_len(writer: &mut Writer, len: usize) -> Result<()> {
        writer.write_short_vec_len(len)
    }

    #[inline]
    fn read_len(reader: &mut Reader<'_>) -> Result<usize> {
        Ok(usize::from(reader.read_short_vec_len()?))
    }

    #[inline]
    fn len_size(len: usize) -> usize {
        // Lengths above u16::MAX fail at write time; saturate for sizing.
        let len = u16::try_from(len).unwrap_or(u16::MAX);
        limcode_short_vec::encoded_len(len)
    }
}

impl Config for Bincode {
    #[inline]
    fn write_len(writer: &mut Writer, len: usize) -> Result<()> {
        writer.write_u64(len as u64);
        Ok(())
    }

    #[inline]
    fn read_len(reader: &mut Reader<'_>) -> Result<usize> {
        let len = reader.read_u64()?;
        usize::try_from(len).map_err(|_| limcode_io::CodecError::LengthOverflow(usize::MAX))
    }

    #[inline]
    fn len_size(_len: usize) -> usize {
        8
    }
}
