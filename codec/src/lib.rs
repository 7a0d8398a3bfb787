//! Wire codecs for ledger entries, transactions, and gossip contact
//! info, in three dialects.
//!
//! - [`wincode`]: the reference dialect. Inner vector lengths are
//!   ShortVec-encoded (1-3 bytes); everything else is little-endian
//!   fixed-width.
//! - [`bincode`]: the same walk with fixed u64 vector lengths.
//! - [`limcode`]: a sized rendition of wincode. It precomputes the
//!   exact encoded length, allocates once, and must tie wincode
//!   byte-for-byte on every input.
//!
//! In all three, a top-level slice of entries keeps a fixed u64 count,
//! fixed-size arrays are raw bytes, and the first byte of a message
//! discriminates legacy from v0: `0x80` means v0, any byte below `0x80`
//! is the legacy `num_required_signatures`. Encoders therefore refuse
//! legacy messages whose `num_required_signatures` exceeds 127.
//!
//! [`pod`] covers flat integer sequences and [`parallel`] fans batch
//! encoding out across threads without changing a single output byte.

pub mod bincode;
mod config;
mod de;
pub mod limcode;
pub mod parallel;
pub mod pod;
mod ser;
mod size;
pub mod wincode;

pub use limcode_io::{CodecError, Result};
