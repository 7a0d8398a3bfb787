//! Compact encoding of vector lengths.
//!
//! Solana's wire format prefixes variable-length sequences with a "ShortVec"
//! length: a little-endian base-128 varint of at most three bytes, capped at
//! `u16::MAX`. Lengths below 128 fit in one byte, which over real ledger
//! traffic is almost every length, so the common case costs a single byte
//! where classic bincode spends eight.
//!
//! The core of this crate is byte-level and serde-free: [`encoded_len`],
//! [`encode_len`] and [`decode_len`]. With the `serde` feature enabled the
//! crate additionally works as a `#[serde(with = "limcode_short_vec")]`
//! field attribute, encoding a `Vec<T>` with a ShortVec length prefix.

#[cfg(feature = "serde")]
use {
    serde::{
        de::{self, Deserializer, SeqAccess, Visitor},
        ser::{self, SerializeTuple, Serializer},
        Deserialize, Serialize,
    },
    std::marker::PhantomData,
};
use std::fmt;

/// Maximum number of bytes a ShortVec length occupies.
pub const MAX_ENCODED_LEN: usize = 3;

/// Largest length value a ShortVec can carry.
pub const MAX_VALUE: u16 = u16::MAX;

/// Errors produced when decoding a ShortVec length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortVecError {
    /// The buffer ended before the continuation sequence terminated.
    Truncated,
    /// The third byte carried the continuation bit, or a byte encoded
    /// bits beyond the u16 range.
    Malformed,
    /// A non-minimal encoding (trailing zero continuation byte).
    Alias,
}

impl fmt::Display for ShortVecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "short-vec length ended mid-sequence"),
            Self::Malformed => write!(f, "short-vec length did not terminate within 3 bytes"),
            Self::Alias => write!(f, "short-vec length is not minimally encoded"),
        }
    }
}

impl std::error::Error for ShortVecError {}

/// Number of bytes [`encode_len`] emits for `value`.
///
/// Branchless: one byte plus one per crossed 7-bit boundary.
#[inline]
pub const fn encoded_len(value: u16) -> usize {
    1 + (value >= 0x80) as usize + (value >= 0x4000) as usize
}

/// Encode `value` into `buf`, returning the number of bytes written (1-3).
#[inline]
pub fn encode_len(value: u16, buf: &mut [u8; MAX_ENCODED_LEN]) -> usize {
    let mut rem = value;
    let mut n = 0;
    loop {
        let byte = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            buf[n] = byte;
            return n + 1;
        }
        buf[n] = byte | 0x80;
        n += 1;
    }
}

/// Decode a ShortVec length from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed. Rejects sequences
/// that run past three bytes, encode bits above the u16 range, or are not
/// minimal.
pub fn decode_len(bytes: &[u8]) -> Result<(u16, usize), ShortVecError> {
    let mut value = 0u16;
    for (nth, byte) in bytes.iter().take(MAX_ENCODED_LEN).copied().enumerate() {
        match visit_byte(byte, value, nth)? {
            VisitStatus::Done(value) => return Ok((value, nth + 1)),
            VisitStatus::More(more) => value = more,
        }
    }
    if bytes.len() < MAX_ENCODED_LEN {
        Err(ShortVecError::Truncated)
    } else {
        Err(ShortVecError::Malformed)
    }
}

enum VisitStatus {
    Done(u16),
    More(u16),
}

/// Fold one encoded byte into the accumulator.
///
/// `nth` is zero-based; the third byte (`nth == 2`) must not continue, and
/// its payload is limited to the two bits that remain of a u16.
fn visit_byte(byte: u8, value: u16, nth: usize) -> Result<VisitStatus, ShortVecError> {
    if nth >= MAX_ENCODED_LEN {
        return Err(ShortVecError::Malformed);
    }
    let continues = byte & 0x80 != 0;
    if nth == MAX_ENCODED_LEN - 1 && continues {
        return Err(ShortVecError::Malformed);
    }
    let payload = u32::from(byte & 0x7f);
    let shifted = payload
        .checked_shl(7 * nth as u32)
        .ok_or(ShortVecError::Malformed)?;
    if shifted > u32::from(u16::MAX) {
        return Err(ShortVecError::Malformed);
    }
    // A zero payload past the first byte re-encodes the same value in more
    // bytes; only the minimal form is accepted.
    if nth > 0 && payload == 0 && !continues {
        return Err(ShortVecError::Alias);
    }
    let value = value | shifted as u16;
    if continues {
        Ok(VisitStatus::More(value))
    } else {
        Ok(VisitStatus::Done(value))
    }
}

/// A u16 that serializes as a ShortVec length.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortU16(pub u16);

#[cfg(feature = "serde")]
impl Serialize for ShortU16 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serde tuples carry no length prefix of their own, so the encoded
        // bytes land back to back on the wire.
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let n = encode_len(self.0, &mut buf);
        let mut seq = serializer.serialize_tuple(n)?;
        for byte in &buf[..n] {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct ShortU16Visitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for ShortU16Visitor {
    type Value = ShortU16;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a ShortU16")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<ShortU16, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut value = 0u16;
        for nth in 0..MAX_ENCODED_LEN {
            let byte: u8 = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom(ShortVecError::Truncated))?;
            match visit_byte(byte, value, nth).map_err(de::Error::custom)? {
                VisitStatus::Done(value) => return Ok(ShortU16(value)),
                VisitStatus::More(more) => value = more,
            }
        }
        Err(de::Error::custom(ShortVecError::Malformed))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ShortU16 {
    fn deserialize<D>(deserializer: D) -> Result<ShortU16, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_tuple(MAX_ENCODED_LEN, ShortU16Visitor)
    }
}

/// Serialize a slice with a ShortVec length prefix.
///
/// Usable as a `#[serde(with = "limcode_short_vec")]` field attribute.
#[cfg(feature = "serde")]
pub fn serialize<S, T>(elements: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let len = u16::try_from(elements.len())
        .map_err(|_| ser::Error::custom("length exceeds u16::MAX"))?;
    let mut seq = serializer.serialize_tuple(1 + elements.len())?;
    seq.serialize_element(&ShortU16(len))?;
    for element in elements {
        seq.serialize_element(element)?;
    }
    seq.end()
}

#[cfg(feature = "serde")]
struct ShortVecVisitor<T> {
    _t: PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> Visitor<'de> for ShortVecVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Vec<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a Vec with a ShortVec length prefix")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Vec<T>, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let ShortU16(len) = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let len = usize::from(len);
        let mut elements = Vec::with_capacity(len.min(1024));
        for i in 0..len {
            let element = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i + 1, &self))?;
            elements.push(element);
        }
        Ok(elements)
    }
}

/// Deserialize a `Vec<T>` with a ShortVec length prefix.
#[cfg(feature = "serde")]
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let visitor = ShortVecVisitor { _t: PhantomData };
    deserializer.deserialize_tuple(usize::MAX, visitor)
}
