//! Byte-level input and output shared by the wire dialects.
//!
//! [`Writer`] is an append-only buffer over a growable `Vec<u8>`; every
//! write is unconditional and allocation is amortized through capacity
//! reservation. [`Reader`] is a cursor over a borrowed byte region; every
//! read is bounds-checked and fails with [`CodecError::BufferUnderflow`]
//! rather than panicking. All multi-byte integers are little-endian.

mod copy;
mod error;
mod reader;
mod writer;

pub use {
    copy::{append_bytes, NON_TEMPORAL_THRESHOLD},
    error::CodecError,
    reader::Reader,
    writer::Writer,
};

/// Shorthand for results carrying a [`CodecError`].
pub type Result<T> = std::result::Result<T, CodecError>;
