//! The v0 message format, identified by a 0x80 prefix byte.
//!
//! v0 extends the legacy format with address table lookups, which load
//! additional account keys from on-chain lookup tables without carrying
//! the full 32-byte keys in the message.

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use crate::{
    instruction::CompiledInstruction,
    primitives::{Hash, Pubkey},
    MessageHeader,
};

/// A pointer into an on-chain address lookup table.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct AddressTableLookup {
    /// Address of the lookup table account.
    pub account_key: Pubkey,
    /// Indexes of table entries to load as writable accounts.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub writable_indexes: Vec<u8>,
    /// Indexes of table entries to load as read-only accounts.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub readonly_indexes: Vec<u8>,
}

/// A v0 message. Serialized after a [`crate::MESSAGE_VERSION_PREFIX`]
/// byte, which is not part of this struct.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Message {
    /// The message header, identifying signed and read-only account keys.
    /// Header values do not describe accounts loaded through lookups.
    pub header: MessageHeader,

    /// Account keys carried directly in the message.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub account_keys: Vec<Pubkey>,

    /// The id of a recent ledger entry.
    pub recent_blockhash: Hash,

    /// Instructions that will be executed in sequence and committed in one
    /// atomic transaction if all succeed. Account and program indexes
    /// count the static keys first, then writable lookups, then read-only
    /// lookups.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub instructions: Vec<CompiledInstruction>,

    /// Address table lookups used to load additional accounts.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub address_table_lookups: Vec<AddressTableLookup>,
}
