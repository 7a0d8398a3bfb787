//! Ledger data model shared by the limcode wire dialects.
//!
//! A [`Entry`] is the unit the dialects serialize: a proof-of-history
//! count, a hash, and the transactions recorded under it. Transactions
//! carry a [`VersionedMessage`], which is either the legacy message
//! format or the v0 format with address table lookups.
//!
//! The first serialized byte of a message does double duty: when its top
//! bit is clear it is the legacy `num_required_signatures`, and when the
//! top bit is set it is a version prefix. That overlap is why legacy
//! messages cap `num_required_signatures` at
//! [`MAX_LEGACY_REQUIRED_SIGNATURES`].
//!
//! With the `serde` feature enabled, the types here serialize through
//! `bincode` to the exact wincode wire bytes, which the codec tests use
//! as an independent oracle.

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

pub mod entry;
pub mod instruction;
pub mod legacy;
pub mod primitives;
pub mod transaction;
pub mod v0;
mod versions;

pub use {
    entry::Entry,
    instruction::CompiledInstruction,
    legacy::Message as LegacyMessage,
    primitives::{Hash, Pubkey, Signature, HASH_BYTES, PUBKEY_BYTES, SIGNATURE_BYTES},
    transaction::VersionedTransaction,
    v0::{AddressTableLookup, Message as V0Message},
    versions::{VersionedMessage, MAX_LEGACY_REQUIRED_SIGNATURES, MESSAGE_VERSION_PREFIX},
};

/// The length of a message header in bytes.
pub const MESSAGE_HEADER_LENGTH: usize = 3;

/// Describes the organization of a message's account keys.
///
/// The account list is ordered by required permissions: writable signers
/// first, then read-only signers, then writable non-signers, then
/// read-only non-signers. The three counters here describe that layout.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub struct MessageHeader {
    /// The number of signatures required for this message to be considered
    /// valid. The signers of those signatures must match the first
    /// `num_required_signatures` of the message's account keys.
    pub num_required_signatures: u8,

    /// The last `num_readonly_signed_accounts` of the signed keys are
    /// read-only accounts.
    pub num_readonly_signed_accounts: u8,

    /// The last `num_readonly_unsigned_accounts` of the unsigned keys are
    /// read-only accounts.
    pub num_readonly_unsigned_accounts: u8,
}
