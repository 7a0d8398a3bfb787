//! The original message format, identified by a first byte below 0x80.

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use crate::{
    instruction::CompiledInstruction,
    primitives::{Hash, Pubkey},
    MessageHeader,
};

/// A legacy message: header, flat account list, blockhash, instructions.
///
/// The first serialized byte is `header.num_required_signatures`, which
/// shares its byte position with the version prefix of newer formats.
/// Values of 128 and above cannot be encoded; see
/// [`crate::MAX_LEGACY_REQUIRED_SIGNATURES`].
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Message {
    /// The message header, identifying signed and read-only account keys.
    pub header: MessageHeader,

    /// All account keys used by this message.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub account_keys: Vec<Pubkey>,

    /// The id of a recent ledger entry.
    pub recent_blockhash: Hash,

    /// Instructions that will be executed in sequence and committed in one
    /// atomic transaction if all succeed.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub instructions: Vec<CompiledInstruction>,
}
