use std::fmt;

/// Errors shared by every wire dialect.
///
/// Encoders only produce [`LengthOverflow`] and [`InvalidHeader`];
/// the remaining kinds are decode failures. No partial output survives
/// an error on either path.
///
/// [`LengthOverflow`]: CodecError::LengthOverflow
/// [`InvalidHeader`]: CodecError::InvalidHeader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A read required more bytes than the buffer holds.
    BufferUnderflow { needed: usize, remaining: usize },
    /// A varint did not terminate within its maximum length.
    InvalidEncoding { offset: usize },
    /// A message's first byte had the top bit set but was not exactly 0x80.
    InvalidVersion(u8),
    /// A ShortVec length prefix was asked to carry a value above u16::MAX.
    LengthOverflow(usize),
    /// A legacy message's num_required_signatures collides with the
    /// version-prefix space.
    InvalidHeader(u8),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferUnderflow { needed, remaining } => {
                write!(f, "buffer underflow: need {needed} bytes, have {remaining}")
            }
            Self::InvalidEncoding { offset } => {
                write!(f, "invalid encoding at byte {offset}")
            }
            Self::InvalidVersion(byte) => {
                write!(f, "invalid message version byte {byte:#04x}")
            }
            Self::LengthOverflow(len) => {
                write!(f, "length {len} exceeds the ShortVec maximum of 65535")
            }
            Self::InvalidHeader(num) => write!(
                f,
                "legacy message with num_required_signatures={num} collides with the version prefix"
            ),
        }
    }
}

impl std::error::Error for CodecError {}
