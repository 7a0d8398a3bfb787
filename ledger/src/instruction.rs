#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// An instruction expressed against a message's shared account list.
///
/// `program_id_index` and each entry of `accounts` index into the
/// message's account keys. On the wire, `accounts` and `data` are
/// ShortVec-prefixed in the wincode dialects and u64-prefixed in bincode.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct CompiledInstruction {
    /// Index into the message's account keys of the program to invoke.
    pub program_id_index: u8,
    /// Indexes into the message's account keys of the accounts passed to
    /// the program.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub accounts: Vec<u8>,
    /// Opaque program input.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub data: Vec<u8>,
}

impl CompiledInstruction {
    pub fn new_from_raw_parts(program_id_index: u8, accounts: Vec<u8>, data: Vec<u8>) -> Self {
        Self {
            program_id_index,
            accounts,
            data,
        }
    }
}
